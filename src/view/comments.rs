use serde::Serialize;

use crate::config::Config;
use crate::post::Post;

/// Identifies the Disqus thread of a post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentThread {
    pub shortname: String,
    pub url: String,
    pub title: String,
}

impl CommentThread {
    /// `None` when comments are not configured for the site.
    pub fn for_post(config: &Config, post: &Post) -> Option<CommentThread> {
        let shortname = config.site.disqus_shortname.as_ref()?;
        Some(CommentThread {
            shortname: shortname.clone(),
            url: format!("{}{}", config.base_url(), post.url),
            title: post.title().to_string(),
        })
    }
}
