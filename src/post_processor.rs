use std::collections::HashMap;

use rayon::prelude::*;
use spdlog::{debug, info};

use crate::config::Config;
use crate::content::content_renderer::ContentRenderer;
use crate::content::markdown_renderer::MarkdownRenderer;
use crate::content::PostEntry;
use crate::error::{BlogError, Result};
use crate::excerpt::{excerpt, ExcerptOptions};
use crate::post::{parse_file_name, Post};
use crate::post_collection::PostCollection;
use crate::post_list::{ContentStore, DirectoryStore};

/// Derives the listing data of a single entry. The file name is checked
/// before the body is rendered.
pub fn derive_post<R: ContentRenderer + ?Sized>(entry: PostEntry, renderer: &R, options: ExcerptOptions) -> Result<Post> {
    let identity = parse_file_name(&entry.file_name)?;
    let excerpt = excerpt(renderer, &entry.file_name, &entry.body, options)?;
    debug!("Derived {} from {}", identity.url, entry.file_name);
    Ok(Post::new(identity, entry, excerpt))
}

/// Loads every entry of `store` and builds the sorted collection.
///
/// Entries are loaded and excerpted in parallel; sorting only starts once all
/// of them are done. Any failure aborts the whole load.
pub fn load_posts<S, R>(store: &S, renderer: &R, options: ExcerptOptions) -> Result<PostCollection>
where
    S: ContentStore + ?Sized,
    R: ContentRenderer + ?Sized,
{
    let ids = store.list_ids()?;
    info!("Indexing {} posts", ids.len());

    let posts = ids.par_iter()
        .map(|id| {
            let entry = store.load_post_entry(id)?;
            derive_post(entry, renderer, options)
        })
        .collect::<Result<Vec<Post>>>()?;
    check_unique_urls(&posts)?;

    let collection = PostCollection::new(posts);
    info!("Indexed {} posts", collection.len());
    Ok(collection)
}

/// Fails on the first url claimed by two posts, in id order.
fn check_unique_urls(posts: &[Post]) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for post in posts {
        if let Some(first) = seen.insert(&post.url, &post.file_name) {
            return Err(BlogError::DuplicateUrl {
                url: post.url.clone(),
                first: first.to_string(),
                second: post.file_name.clone(),
            });
        }
    }
    Ok(())
}

/// Loads the posts directory of `config` with the markdown renderer.
pub fn load_config_posts(config: &Config) -> Result<PostCollection> {
    let store = DirectoryStore::new(config.paths.posts_dir.clone());
    load_posts(&store, &MarkdownRenderer {}, ExcerptOptions::from(&config.defaults))
}
