use std::io;

use thiserror::Error;

/// Failures raised while indexing a posts directory.
///
/// Every variant except [`BlogError::InvalidPage`] aborts a build: a site is
/// either generated from every post or not generated at all.
#[derive(Error, Debug)]
pub enum BlogError {
    /// The file name does not start with a `YYYY-MM-DD-` prefix followed by a slug
    #[error("invalid post file name {0}: expected YYYY-MM-DD-slug.ext")]
    InvalidFileName(String),

    /// The date prefix is not a calendar date (e.g. day 32)
    #[error("invalid date {date} in post file {file_name}")]
    InvalidDate { file_name: String, date: String },

    /// Two post files derive the same url, e.g. `x.md` and `x.mdx` on the same day
    #[error("posts {first} and {second} are both published at {url}")]
    DuplicateUrl { url: String, first: String, second: String },

    #[error("invalid front matter in {file_name}: {reason}")]
    FrontMatter { file_name: String, reason: String },

    #[error("unknown category {0}")]
    UnknownCategory(String),

    #[error("error rendering {file_name}: {reason}")]
    Render { file_name: String, reason: String },

    #[error("page has to be greater than 0")]
    InvalidPage,

    #[error("page size has to be greater than 0")]
    InvalidPageSize,

    #[error("post not found: {0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BlogError>;
