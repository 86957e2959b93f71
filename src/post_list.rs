use std::fs;
use std::path::PathBuf;

use spdlog::debug;

use crate::content::content_file::ContentFile;
use crate::content::PostEntry;
use crate::error::{BlogError, Result};

/// Where post entries come from.
pub trait ContentStore: Sync {
    /// Ids of every post, in a stable order.
    fn list_ids(&self) -> Result<Vec<String>>;

    fn load_post_entry(&self, id: &str) -> Result<PostEntry>;
}

/// A flat directory of markdown/MDX files, the file name being the id.
pub struct DirectoryStore {
    pub root_dir: PathBuf,
}

impl DirectoryStore {
    pub fn new(root_dir: PathBuf) -> Self {
        DirectoryStore { root_dir }
    }
}

impl ContentStore for DirectoryStore {
    fn list_ids(&self) -> Result<Vec<String>> {
        let mut posts = vec![];
        let entries = fs::read_dir(self.root_dir.as_path())?;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let path = entry.path();
            if !ContentFile::is_post_file(&path) {
                debug!("Skipping non post file {}", path.display());
                continue;
            }

            match entry.file_name().to_str() {
                Some(file_name) => posts.push(file_name.to_string()),
                None => return Err(BlogError::InvalidFileName(path.display().to_string())),
            }
        }
        posts.sort();
        Ok(posts)
    }

    fn load_post_entry(&self, id: &str) -> Result<PostEntry> {
        if id.contains('/') || id.contains('\\') || id.starts_with('.') {
            return Err(BlogError::NotFound(id.to_string()));
        }

        let file_path = self.root_dir.join(id);
        if !file_path.is_file() {
            return Err(BlogError::NotFound(id.to_string()));
        }

        ContentFile::from_file(&file_path)?.into_post_entry()
    }
}
