use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BlogError;

pub mod content_file;
pub mod content_renderer;
pub mod markdown_renderer;
pub mod parsing_utils;

/// A post as read from the content store, before any derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct PostEntry {
    /// `YYYY-MM-DD-slug.ext`
    pub file_name: String,
    /// Markdown/MDX source without its front matter
    pub body: String,
    pub meta: PostMeta,
}

/// Author declared fields of a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostMeta {
    pub title: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Closed vocabulary of post categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Development,
    Tools,
    Web,
    Linux,
    Ideas,
    Events,
    Projects,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Development,
        Category::Tools,
        Category::Web,
        Category::Linux,
        Category::Ideas,
        Category::Events,
        Category::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Development => "Development",
            Category::Tools => "Tools",
            Category::Web => "Web",
            Category::Linux => "Linux",
            Category::Ideas => "Ideas",
            Category::Events => "Events",
            Category::Projects => "Projects",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = BlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL.iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| BlogError::UnknownCategory(s.to_string()))
    }
}
