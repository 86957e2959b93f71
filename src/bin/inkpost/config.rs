use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use inkpost::config::{read_config, Config};

use crate::CFG_FILE_NAME;

/// Executable directory, then current directory, then the user config dir.
fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let candidates = [exe_dir, env::current_dir().ok(), dirs::config_dir()];

    candidates.into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path {
        Some(path) => path,
        None => get_config_path().ok_or_else(|| anyhow!("Could not find {}", CFG_FILE_NAME))?,
    };

    eprintln!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)
        .with_context(|| format!("Could not load {}", config_path.display()))?;

    if let Some(mut log) = config.log {
        if log.location.is_none() {
            log.location = dirs::cache_dir().map(|dir| dir.join("inkpost").join("log").join("inkpost.log"));
        }
        match log.location {
            Some(ref location) => eprintln!("Log enabled. Files will be written in {}", location.display()),
            None => eprintln!("Log enabled. No cache dir found, using the console"),
        }
        config.log = Some(log);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::TempDir;

    use super::*;

    const SITE_CONFIG: &str = r#"
[site]
url = "https://blog.example.com/"
title = "My blog"

[paths]
posts_dir = "posts"
output_dir = "out"
"#;

    fn config_file(tmp: &TempDir, content: &str) -> PathBuf {
        let path = tmp.path().join(CFG_FILE_NAME);
        write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_open_config() {
        let tmp = TempDir::new().unwrap();
        let config = open_config(Some(config_file(&tmp, SITE_CONFIG))).unwrap();
        assert_eq!(config.base_url(), "https://blog.example.com");
        assert!(config.log.is_none());
    }

    #[test]
    fn test_zero_page_size_fails() {
        let tmp = TempDir::new().unwrap();
        let content = format!("{}\n[defaults]\npage_size = 0\n", SITE_CONFIG);
        assert!(open_config(Some(config_file(&tmp, &content))).is_err());
    }

    #[test]
    fn test_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(open_config(Some(tmp.path().join("nope.toml"))).is_err());
    }
}
