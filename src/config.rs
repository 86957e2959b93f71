use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;

use crate::error::{BlogError, Result};

#[derive(Deserialize, Clone, Debug)]
pub struct Author {
    pub name: String,
    pub email: Option<String>,
    pub link: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Site {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub disqus_shortname: Option<String>,
    pub author: Option<Author>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Paths {
    pub posts_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Defaults {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_taxonomy_page_size")]
    pub taxonomy_page_size: u32,
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
    #[serde(default = "default_excerpt_paragraphs")]
    pub excerpt_paragraphs: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            page_size: default_page_size(),
            taxonomy_page_size: default_taxonomy_page_size(),
            excerpt_length: default_excerpt_length(),
            excerpt_paragraphs: default_excerpt_paragraphs(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Feed {
    #[serde(default = "default_feed_item_count")]
    pub item_count: usize,
    #[serde(default = "default_feed_file_name")]
    pub file_name: String,
}

impl Default for Feed {
    fn default() -> Self {
        Feed {
            item_count: default_feed_item_count(),
            file_name: default_feed_file_name(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub feed: Feed,
    pub log: Option<Log>,
}

fn default_page_size() -> u32 { 5 }

fn default_taxonomy_page_size() -> u32 { 10 }

fn default_excerpt_length() -> usize { 300 }

fn default_excerpt_paragraphs() -> usize { 6 }

fn default_feed_item_count() -> usize { 10 }

fn default_feed_file_name() -> String { "atom.xml".to_string() }

fn parse_path(path: PathBuf) -> Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .ok_or_else(|| BlogError::Config("Could not find the executable directory".to_string()))?;
    let relative = path.strip_prefix("${exe_dir}")
        .map_err(|e| BlogError::Config(format!("Invalid path {}: {}", path.display(), e)))?;
    Ok(exe_dir.join(relative))
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Config> {
        let cfg = toml::from_str::<Config>(content)
            .map_err(|e| BlogError::Config(format!("Error parsing configuration file: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.defaults.page_size == 0 || self.defaults.taxonomy_page_size == 0 {
            return Err(BlogError::InvalidPageSize);
        }
        if self.site.url.is_empty() {
            return Err(BlogError::Config("site.url cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Site url without the trailing slash, ready to be prefixed to a post url.
    pub fn base_url(&self) -> &str {
        self.site.url.trim_end_matches('/')
    }
}

pub fn read_config(cfg_path: &Path) -> Result<Config> {
    let cfg_content = fs::read_to_string(cfg_path).map_err(|e| {
        BlogError::Config(format!("Error opening configuration file {}: {}", cfg_path.display(), e))
    })?;

    let mut cfg = Config::from_toml(&cfg_content)?;

    cfg.paths = Paths {
        posts_dir: parse_path(cfg.paths.posts_dir)?,
        output_dir: parse_path(cfg.paths.output_dir)?,
    };

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::CONFIG_DATA;

    #[test]
    fn test_read_defaults() {
        let cfg = Config::from_toml(CONFIG_DATA).unwrap();
        assert_eq!(cfg.site.title, "Alejandro Celaya | Blog");
        assert_eq!(cfg.defaults.page_size, 5);
        assert_eq!(cfg.defaults.taxonomy_page_size, 10);
        assert_eq!(cfg.defaults.excerpt_length, 300);
        assert_eq!(cfg.defaults.excerpt_paragraphs, 6);
        assert_eq!(cfg.feed.item_count, 10);
        assert_eq!(cfg.feed.file_name, "atom.xml");
        assert_eq!(cfg.base_url(), "https://alejandrocelaya.blog");
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_page_sizes_are_independent() {
        let toml_str = r##"
[site]
url = "https://example.com"
title = "Example"

[paths]
posts_dir = "posts"
output_dir = "out"

[defaults]
page_size = 3
taxonomy_page_size = 20
"##;
        let cfg = Config::from_toml(toml_str).unwrap();
        assert_eq!(cfg.defaults.page_size, 3);
        assert_eq!(cfg.defaults.taxonomy_page_size, 20);
        assert_eq!(cfg.defaults.excerpt_length, 300);
    }

    #[test]
    fn test_zero_page_size() {
        let toml_str = r##"
[site]
url = "https://example.com"
title = "Example"

[paths]
posts_dir = "posts"
output_dir = "out"

[defaults]
page_size = 0
"##;
        let res = Config::from_toml(toml_str);
        assert!(matches!(res, Err(BlogError::InvalidPageSize)));
    }

    #[test]
    fn test_exe_dir_path() {
        let path = parse_path(PathBuf::from("${exe_dir}/posts")).unwrap();
        assert!(path.ends_with("posts"));
        assert!(!path.to_string_lossy().contains("${exe_dir}"));

        let path = parse_path(PathBuf::from("posts")).unwrap();
        assert_eq!(path, PathBuf::from("posts"));
    }
}
