use std::fs;
use std::path::Path;

use crate::content::parsing_utils::parse_front_matter;
use crate::content::PostEntry;
use crate::error::{BlogError, Result};

/// Markdown and MDX, MDX being rendered as markdown.
const POST_EXTENSIONS: [&str; 3] = ["md", "markdown", "mdx"];

pub struct ContentFile {
    pub file_name: String,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(file_path: &Path) -> Result<ContentFile> {
        if !Self::is_post_file(file_path) {
            return Err(BlogError::InvalidFileName(file_path.display().to_string()));
        }
        let file_name = file_path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.to_string())
            .ok_or_else(|| BlogError::InvalidFileName(file_path.display().to_string()))?;

        let raw_content = fs::read_to_string(file_path)?;

        Ok(ContentFile {
            file_name,
            raw_content,
        })
    }

    pub fn is_post_file(file_name: &Path) -> bool {
        file_name.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| POST_EXTENSIONS.contains(&ext))
    }

    pub fn into_post_entry(self) -> Result<PostEntry> {
        let (meta, body) = parse_front_matter(&self.file_name, &self.raw_content)?;
        Ok(PostEntry {
            file_name: self.file_name,
            body,
            meta,
        })
    }
}
