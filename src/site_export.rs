use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use spdlog::{debug, info};

use crate::config::Config;
use crate::content::content_renderer::ContentRenderer;
use crate::error::{BlogError, Result};
use crate::paginator::PaginatedResult;
use crate::post::Post;
use crate::post_collection::{PostCollection, TaxonomyFilter, TaxonomyKind};
use crate::routes::{all_routes, listing_path, Route};
use crate::view::atom_renderer::{AtomFeed, FeedEntry};
use crate::view::comments::CommentThread;
use crate::view::search_index::SearchEntry;

const PAGE_FILE: &str = "index.json";
const POSTS_FILE: &str = "posts.json";
const SEARCH_FILE: &str = "search.json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingPage<'a> {
    #[serde(flatten)]
    page: PaginatedResult<&'a Post>,
    filter: Option<&'a TaxonomyFilter>,
    latest_posts: &'a [Post],
}

#[derive(Debug, Serialize)]
pub struct TaxonomyValue {
    pub name: String,
    pub url: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
struct TaxonomyPage<'a> {
    kind: TaxonomyKind,
    values: &'a [TaxonomyValue],
}

#[derive(Debug, Serialize)]
struct PostPage<'a> {
    post: &'a Post,
    html: &'a str,
    older: Option<&'a Post>,
    newer: Option<&'a Post>,
    comments: Option<CommentThread>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ExportSummary {
    pub posts: usize,
    pub routes: usize,
    pub files: usize,
}

/// Every value of `kind` with the url of its first page and its post count.
pub fn taxonomy_values(collection: &PostCollection, kind: TaxonomyKind) -> Result<Vec<TaxonomyValue>> {
    collection.list_values(kind)
        .into_iter()
        .map(|name| {
            let filter = TaxonomyFilter::from_value(kind, &name)?;
            Ok(TaxonomyValue {
                url: listing_path(Some(&filter), 1),
                count: collection.filter(&filter).len(),
                name,
            })
        })
        .collect()
}

/// Writes the data of every page of the site, plus feed and search index,
/// below `config.paths.output_dir`.
pub fn export_site<R>(config: &Config, collection: &PostCollection, renderer: &R) -> Result<ExportSummary>
where
    R: ContentRenderer + ?Sized,
{
    let exporter = SiteExporter {
        config,
        collection,
        output_dir: config.paths.output_dir.as_path(),
    };
    exporter.export(renderer)
}

struct SiteExporter<'a> {
    config: &'a Config,
    collection: &'a PostCollection,
    output_dir: &'a Path,
}

impl<'a> SiteExporter<'a> {
    fn export<R: ContentRenderer + ?Sized>(&self, renderer: &R) -> Result<ExportSummary> {
        fs::create_dir_all(self.output_dir)?;
        let posts = self.collection.all();

        let bodies = posts.par_iter()
            .map(|post| post.render_body(renderer))
            .collect::<Result<Vec<String>>>()?;

        let mut summary = ExportSummary { posts: posts.len(), ..ExportSummary::default() };

        self.write_json(Path::new(POSTS_FILE), posts)?;
        summary.files += 1;

        let categories = taxonomy_values(self.collection, TaxonomyKind::Categories)?;
        let tags = taxonomy_values(self.collection, TaxonomyKind::Tags)?;
        self.write_json(&taxonomy_file(TaxonomyKind::Categories), &categories)?;
        self.write_json(&taxonomy_file(TaxonomyKind::Tags), &tags)?;
        summary.files += 2;

        let defaults = &self.config.defaults;
        let routes = all_routes(self.collection, defaults.page_size, defaults.taxonomy_page_size)?;
        let post_index: HashMap<&str, usize> = posts.iter()
            .enumerate()
            .map(|(idx, post)| (post.url.as_str(), idx))
            .collect();

        for route in &routes {
            let file = route_file(route.path());
            match route {
                Route::Listing { page, filter, .. } => {
                    let page_size = match filter {
                        Some(_) => defaults.taxonomy_page_size,
                        None => defaults.page_size,
                    };
                    let listing = ListingPage {
                        page: self.collection.paginate(*page, page_size, filter.as_ref())?,
                        filter: filter.as_ref(),
                        latest_posts: self.collection.latest(defaults.page_size as usize),
                    };
                    self.write_json(&file, &listing)?;
                }
                Route::Taxonomies { kind, .. } => {
                    let values = match kind {
                        TaxonomyKind::Categories => &categories,
                        TaxonomyKind::Tags => &tags,
                    };
                    self.write_json(&file, &TaxonomyPage { kind: *kind, values: values.as_slice() })?;
                }
                Route::Post { path } => {
                    let idx = *post_index.get(path.as_str())
                        .ok_or_else(|| BlogError::NotFound(path.clone()))?;
                    let (older, newer) = self.collection.neighbors(path)?;
                    let post = &posts[idx];
                    let page = PostPage {
                        post,
                        html: &bodies[idx],
                        older,
                        newer,
                        comments: CommentThread::for_post(self.config, post),
                    };
                    self.write_json(&file, &page)?;
                }
            }
            summary.files += 1;
        }
        summary.routes = routes.len();

        self.write_feed(&bodies)?;
        summary.files += 1;

        let search: Vec<SearchEntry> = posts.iter()
            .zip(&bodies)
            .map(|(post, html)| SearchEntry::new(post, html))
            .collect();
        self.write_json(Path::new(SEARCH_FILE), &search)?;
        summary.files += 1;

        info!("Wrote {} files for {} posts into {}", summary.files, summary.posts, self.output_dir.display());
        Ok(summary)
    }

    fn write_feed(&self, bodies: &[String]) -> Result<()> {
        let feed_config = &self.config.feed;
        let entries: Vec<FeedEntry> = self.collection.latest(feed_config.item_count)
            .iter()
            .zip(bodies)
            .map(|(post, content)| FeedEntry { post, content: content.as_str() })
            .collect();

        let site = &self.config.site;
        let feed = AtomFeed {
            title: &site.title,
            subtitle: &site.subtitle,
            base_url: self.config.base_url(),
            file_name: &feed_config.file_name,
            author: site.author.as_ref(),
        };
        let xml = feed.render(&entries)?;
        self.write_file(Path::new(&feed_config.file_name), &xml)
    }

    fn write_json<T: Serialize + ?Sized>(&self, rel_path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_vec_pretty(value)?;
        self.write_file(rel_path, &json)
    }

    fn write_file(&self, rel_path: &Path, data: &[u8]) -> Result<()> {
        let path = self.output_dir.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, data)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

fn taxonomy_file(kind: TaxonomyKind) -> PathBuf {
    PathBuf::from(format!("{}.json", kind.plural()))
}

/// `/tag/rust%20lang/page/2/` -> `tag/rust lang/page/2/index.json`
fn route_file(route_path: &str) -> PathBuf {
    let mut file = PathBuf::new();
    for segment in route_path.split('/').filter(|s| !s.is_empty()) {
        file.push(decode_segment(segment).as_ref());
    }
    file.push(PAGE_FILE);
    file
}

/// Segments that would leave their directory once decoded stay encoded.
fn decode_segment(segment: &str) -> Cow<'_, str> {
    match urlencoding::decode(segment) {
        Ok(decoded) if is_plain_segment(&decoded) => decoded,
        _ => Cow::Owned(segment.replace('.', "%2E")),
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.contains('/') && !segment.contains('\\') && segment != "." && segment != ".."
}
