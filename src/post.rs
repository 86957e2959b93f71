use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::content::content_renderer::ContentRenderer;
use crate::content::{PostEntry, PostMeta};
use crate::error::{BlogError, Result};
use crate::text_utils::{format_date, parse_date, strip_mdx_imports};

/// Identity of a post, derived from its file name alone.
#[derive(Debug, Clone, PartialEq)]
pub struct PostIdentity {
    pub slug: String,
    pub date: NaiveDate,
    pub formatted_date: String,
    pub url: String,
}

/// A post ready to be listed, paginated and rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub file_name: String,
    pub slug: String,
    pub date: NaiveDate,
    pub formatted_date: String,
    pub url: String,
    pub excerpt: String,
    pub data: PostMeta,
    #[serde(skip)]
    pub body: String,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}  {}", self.date, self.url, self.data.title)
    }
}

impl Post {
    pub fn new(identity: PostIdentity, entry: PostEntry, excerpt: String) -> Post {
        let PostIdentity { slug, date, formatted_date, url } = identity;
        Post {
            file_name: entry.file_name,
            slug,
            date,
            formatted_date,
            url,
            excerpt,
            data: entry.meta,
            body: entry.body,
        }
    }

    pub fn from_entry(entry: PostEntry, excerpt: String) -> Result<Post> {
        let identity = parse_file_name(&entry.file_name)?;
        Ok(Post::new(identity, entry, excerpt))
    }

    pub fn title(&self) -> &str {
        &self.data.title
    }

    /// The full rendered body, MDX import declarations left out.
    pub fn render_body<R: ContentRenderer + ?Sized>(&self, renderer: &R) -> Result<String> {
        renderer.render(&self.file_name, &strip_mdx_imports(&self.body))
    }
}

/// Parses `YYYY-MM-DD-slug.ext` into slug, date and canonical url.
///
/// The date components are taken by position. The only calendar validation is
/// the one done when formatting the date, so `2024-01-32-x.md` fails there.
pub fn parse_file_name(file_name: &str) -> Result<PostIdentity> {
    lazy_static! {
        static ref FILE_NAME_REGEX: Regex = Regex::new(
            r"^(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})-(?P<rest>.+)$"
        ).unwrap();
    }

    let caps = FILE_NAME_REGEX.captures(file_name)
        .ok_or_else(|| BlogError::InvalidFileName(file_name.to_string()))?;
    let year = &caps["year"];
    let month = &caps["month"];
    let day = &caps["day"];

    let slug = strip_extension(&caps["rest"]);
    if slug.is_empty() {
        return Err(BlogError::InvalidFileName(file_name.to_string()));
    }

    let date = parse_date(year, month, day).map_err(|_| BlogError::InvalidDate {
        file_name: file_name.to_string(),
        date: format!("{}-{}-{}", year, month, day),
    })?;

    Ok(PostIdentity {
        slug: slug.to_string(),
        date,
        formatted_date: format_date(&date),
        url: format!("/{}/{}/{}/{}/", year, month, day, slug),
    })
}

fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => name,
    }
}
