use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::content::Category;
use crate::error::{BlogError, Result};
use crate::paginator::{PaginatedResult, Paginator};
use crate::post::Post;

/// Classification axis, as used for the taxonomy index pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyKind {
    Categories,
    Tags,
}

impl TaxonomyKind {
    /// `categories` / `tags`
    pub fn plural(&self) -> &'static str {
        match self {
            TaxonomyKind::Categories => "categories",
            TaxonomyKind::Tags => "tags",
        }
    }

    /// `category` / `tag`
    pub fn singular(&self) -> &'static str {
        match self {
            TaxonomyKind::Categories => "category",
            TaxonomyKind::Tags => "tag",
        }
    }
}

impl Display for TaxonomyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// Exactly one taxonomy value to filter by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyFilter {
    Category(Category),
    Tag(String),
}

impl TaxonomyFilter {
    pub fn kind(&self) -> TaxonomyKind {
        match self {
            TaxonomyFilter::Category(_) => TaxonomyKind::Categories,
            TaxonomyFilter::Tag(_) => TaxonomyKind::Tags,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            TaxonomyFilter::Category(category) => category.as_str(),
            TaxonomyFilter::Tag(tag) => tag.as_str(),
        }
    }

    /// Builds the filter for a value listed by [`list_values`].
    pub fn from_value(kind: TaxonomyKind, value: &str) -> Result<TaxonomyFilter> {
        match kind {
            TaxonomyKind::Categories => Ok(TaxonomyFilter::Category(value.parse()?)),
            TaxonomyKind::Tags => Ok(TaxonomyFilter::Tag(value.to_string())),
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            TaxonomyFilter::Category(category) => post.data.categories.contains(category),
            TaxonomyFilter::Tag(tag) => post.data.tags.contains(tag),
        }
    }
}

/// Newest first. Posts of the same day are ordered by slug so that the
/// result never depends on the order files were enumerated.
pub fn compare_posts(a: &Post, b: &Post) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug))
}

pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(compare_posts);
}

pub fn filter_posts<'a>(posts: &'a [Post], filter: &TaxonomyFilter) -> Vec<&'a Post> {
    posts.iter().filter(|post| filter.matches(post)).collect()
}

/// Every distinct category or tag, sorted by code point.
pub fn list_values(posts: &[Post], kind: TaxonomyKind) -> Vec<String> {
    let values: BTreeSet<String> = match kind {
        TaxonomyKind::Categories => posts.iter()
            .flat_map(|post| post.data.categories.iter())
            .map(|category| category.as_str().to_string())
            .collect(),
        TaxonomyKind::Tags => posts.iter()
            .flat_map(|post| post.data.tags.iter())
            .cloned()
            .collect(),
    };
    values.into_iter().collect()
}

/// The whole set of posts of a build, sorted newest first.
pub struct PostCollection {
    posts: Vec<Post>,
}

impl PostCollection {
    pub fn new(mut posts: Vec<Post>) -> PostCollection {
        sort_posts(&mut posts);
        PostCollection { posts }
    }

    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn latest(&self, count: usize) -> &[Post] {
        &self.posts[..count.min(self.posts.len())]
    }

    pub fn filter(&self, filter: &TaxonomyFilter) -> Vec<&Post> {
        filter_posts(&self.posts, filter)
    }

    pub fn list_values(&self, kind: TaxonomyKind) -> Vec<String> {
        list_values(&self.posts, kind)
    }

    /// One page of the posts matching `filter`, or of every post when `None`.
    pub fn paginate(&self, page: u32, page_size: u32, filter: Option<&TaxonomyFilter>) -> Result<PaginatedResult<&Post>> {
        let posts: Vec<&Post> = match filter {
            Some(filter) => self.filter(filter),
            None => self.posts.iter().collect(),
        };
        Paginator::from(&posts, page_size)?.get_page(page)
    }

    pub fn find_by_url(&self, url: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.url == url)
    }

    /// `(older, newer)` posts around the one published at `url`.
    pub fn neighbors(&self, url: &str) -> Result<(Option<&Post>, Option<&Post>)> {
        let index = self.posts.iter()
            .position(|post| post.url == url)
            .ok_or_else(|| BlogError::NotFound(url.to_string()))?;

        let older = self.posts.get(index + 1);
        let newer = index.checked_sub(1).and_then(|i| self.posts.get(i));
        Ok((older, newer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::create_post;

    fn collection() -> PostCollection {
        PostCollection::new(vec![
            create_post("2024-01-01-new-year.md", &[Category::Ideas], &["life"]),
            create_post("2024-06-01-summer.md", &[Category::Development, Category::Tools], &["rust", "php"]),
            create_post("2023-12-31-last-day.md", &[Category::Development], &["php", "Rust"]),
        ])
    }

    fn dates(posts: &[Post]) -> Vec<String> {
        posts.iter().map(|p| p.date.to_string()).collect()
    }

    #[test]
    fn test_sort_newest_first() {
        let collection = collection();
        assert_eq!(dates(collection.all()), ["2024-06-01", "2024-01-01", "2023-12-31"]);
    }

    #[test]
    fn test_same_day_by_slug() {
        let mut posts = vec![
            create_post("2024-01-01-zeta.md", &[], &[]),
            create_post("2024-01-01-alpha.md", &[], &[]),
            create_post("2024-01-02-newer.md", &[], &[]),
        ];
        sort_posts(&mut posts);
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["newer", "alpha", "zeta"]);

        // Enumeration order does not matter
        posts.reverse();
        sort_posts(&mut posts);
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["newer", "alpha", "zeta"]);
    }

    #[test]
    fn test_filter() {
        let collection = collection();
        let posts = collection.filter(&TaxonomyFilter::Category(Category::Development));
        assert_eq!(posts.iter().map(|p| p.slug.as_str()).collect::<Vec<_>>(), ["summer", "last-day"]);

        let posts = collection.filter(&TaxonomyFilter::Tag("rust".to_string()));
        assert_eq!(posts.iter().map(|p| p.slug.as_str()).collect::<Vec<_>>(), ["summer"]);

        // Case-sensitive
        let posts = collection.filter(&TaxonomyFilter::Tag("Rust".to_string()));
        assert_eq!(posts.iter().map(|p| p.slug.as_str()).collect::<Vec<_>>(), ["last-day"]);

        assert!(collection.filter(&TaxonomyFilter::Category(Category::Events)).is_empty());
    }

    #[test]
    fn test_list_values() {
        let collection = collection();
        assert_eq!(collection.list_values(TaxonomyKind::Categories), ["Development", "Ideas", "Tools"]);
        // Code point order, upper case first
        assert_eq!(collection.list_values(TaxonomyKind::Tags), ["Rust", "life", "php", "rust"]);

        let empty = PostCollection::new(vec![]);
        assert!(empty.list_values(TaxonomyKind::Tags).is_empty());
    }

    #[test]
    fn test_paginate() {
        let collection = collection();
        let page = collection.paginate(1, 2, None).unwrap();
        assert_eq!(page.posts.len(), 2);
        assert!(page.is_first_page);
        assert!(!page.is_last_page);

        let filter = TaxonomyFilter::Category(Category::Development);
        let page = collection.paginate(1, 10, Some(&filter)).unwrap();
        assert_eq!(page.posts.len(), 2);
        assert!(page.is_last_page);

        let page = collection.paginate(2, 10, Some(&filter)).unwrap();
        assert!(page.posts.is_empty());
        assert!(page.is_last_page);
    }

    #[test]
    fn test_latest() {
        let collection = collection();
        assert_eq!(dates(collection.latest(2)), ["2024-06-01", "2024-01-01"]);
        assert_eq!(collection.latest(10).len(), 3);
    }

    #[test]
    fn test_neighbors() {
        let collection = collection();
        let (older, newer) = collection.neighbors("/2024/01/01/new-year/").unwrap();
        assert_eq!(older.unwrap().slug, "last-day");
        assert_eq!(newer.unwrap().slug, "summer");

        let (older, newer) = collection.neighbors("/2024/06/01/summer/").unwrap();
        assert_eq!(older.unwrap().slug, "new-year");
        assert!(newer.is_none());

        let (older, _) = collection.neighbors("/2023/12/31/last-day/").unwrap();
        assert!(older.is_none());

        assert!(matches!(collection.neighbors("/nope/"), Err(BlogError::NotFound(_))));
    }

    #[test]
    fn test_find_by_url() {
        let collection = collection();
        assert_eq!(collection.find_by_url("/2024/06/01/summer/").unwrap().slug, "summer");
        assert!(collection.find_by_url("/2024/06/01/winter/").is_none());
    }

    #[test]
    fn test_filter_from_value() {
        let filter = TaxonomyFilter::from_value(TaxonomyKind::Categories, "Tools").unwrap();
        assert_eq!(filter, TaxonomyFilter::Category(Category::Tools));
        assert_eq!(filter.value(), "Tools");
        assert_eq!(filter.kind(), TaxonomyKind::Categories);

        let filter = TaxonomyFilter::from_value(TaxonomyKind::Tags, "any tag").unwrap();
        assert_eq!(filter, TaxonomyFilter::Tag("any tag".to_string()));

        assert!(TaxonomyFilter::from_value(TaxonomyKind::Categories, "Cooking").is_err());
    }
}
