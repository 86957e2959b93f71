use serde::Serialize;

use crate::error::{BlogError, Result};

/// One page of a sorted collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub posts: Vec<T>,
    pub is_first_page: bool,
    pub is_last_page: bool,
    pub current_page: u32,
    pub page_count: u32,
}

pub struct Paginator<'a, T> {
    post_list: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T: Clone> Paginator<'a, T> {
    pub fn from(post_list: &'a [T], page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(BlogError::InvalidPageSize);
        }

        Ok(Paginator {
            post_list,
            page_size,
            page_count: calc_page_count(post_list.len(), page_size),
        })
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Pages are 1-indexed. A page past the last one is empty and flagged as last.
    pub fn get_page(&self, page: u32) -> Result<PaginatedResult<T>> {
        if page == 0 {
            return Err(BlogError::InvalidPage);
        }

        let len = self.post_list.len();
        let start = ((page as usize - 1) * self.page_size as usize).min(len);
        let end = (page as usize * self.page_size as usize).min(len);

        Ok(PaginatedResult {
            posts: self.post_list[start..end].to_vec(),
            is_first_page: page == 1,
            is_last_page: page >= self.page_count,
            current_page: page,
            page_count: self.page_count,
        })
    }

    pub fn pages(&self) -> impl Iterator<Item = Result<PaginatedResult<T>>> + '_ {
        (1..=self.page_count).map(|page| self.get_page(page))
    }
}

/// `ceil(total / page_size)`
pub fn calc_page_count(total: usize, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size as usize) as u32
}

/// Free form of [`Paginator::get_page`].
pub fn paginate<T: Clone>(posts: &[T], page: u32, page_size: u32) -> Result<PaginatedResult<T>> {
    Paginator::from(posts, page_size)?.get_page(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_case() {
        let items = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13];
        let paginator = Paginator::from(&items, 3).unwrap();
        assert_eq!(paginator.page_count(), 5);
        assert_eq!(paginator.get_page(1).unwrap().posts, vec![1, 2, 3]);
        assert_eq!(paginator.get_page(2).unwrap().posts, vec![4, 5, 6]);
        assert_eq!(paginator.get_page(3).unwrap().posts, vec![7, 8, 9]);
        assert_eq!(paginator.get_page(4).unwrap().posts, vec![10, 11, 12]);
        assert_eq!(paginator.get_page(5).unwrap().posts, vec![13]);

        assert!(matches!(paginator.get_page(0), Err(BlogError::InvalidPage)));
    }

    #[test]
    fn test_twelve_posts_by_five() {
        let items: Vec<u32> = (0..12).collect();

        let page = paginate(&items, 2, 5).unwrap();
        assert_eq!(page.posts, vec![5, 6, 7, 8, 9]);
        assert!(!page.is_first_page);
        assert!(!page.is_last_page);

        let page = paginate(&items, 3, 5).unwrap();
        assert_eq!(page.posts, vec![10, 11]);
        assert!(!page.is_first_page);
        assert!(page.is_last_page);
        assert_eq!(page.page_count, 3);

        let page = paginate(&items, 1, 5).unwrap();
        assert!(page.is_first_page);
        assert!(!page.is_last_page);
    }

    #[test]
    fn test_beyond_last_page() {
        let items: Vec<u32> = (0..12).collect();
        let page = paginate(&items, 7, 5).unwrap();
        assert!(page.posts.is_empty());
        assert!(page.is_last_page);
        assert_eq!(page.current_page, 7);
    }

    #[test]
    fn test_empty() {
        let items: Vec<u32> = vec![];
        let paginator = Paginator::from(&items, 3).unwrap();
        assert_eq!(paginator.page_count(), 0);
        assert_eq!(paginator.pages().count(), 0);

        let page = paginator.get_page(1).unwrap();
        assert!(page.posts.is_empty());
        assert!(page.is_first_page);
        assert!(page.is_last_page);
    }

    #[test]
    fn test_zero_page_size() {
        let items = vec![1, 2, 3];
        assert!(matches!(Paginator::from(&items, 0), Err(BlogError::InvalidPageSize)));
        assert_eq!(calc_page_count(3, 0), 0);
    }

    #[test]
    fn test_exact_multiple() {
        let items: Vec<u32> = (0..10).collect();
        let paginator = Paginator::from(&items, 5).unwrap();
        assert_eq!(paginator.page_count(), 2);
        assert!(paginator.get_page(2).unwrap().is_last_page);
    }

    #[test]
    fn test_pages_cover_everything() {
        for total in 0..30usize {
            for page_size in 1..8u32 {
                let items: Vec<usize> = (0..total).collect();
                let paginator = Paginator::from(&items, page_size).unwrap();
                let mut joined = vec![];
                for page in paginator.pages() {
                    let page = page.unwrap();
                    assert!(page.posts.len() <= page_size as usize);
                    assert_eq!(page.is_first_page, page.current_page == 1);
                    joined.extend(page.posts);
                }
                assert_eq!(joined, items);
            }
        }
    }
}
