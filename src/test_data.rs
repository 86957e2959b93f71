#![cfg(test)]

use crate::content::{Category, PostEntry, PostMeta};
use crate::error::{BlogError, Result};
use crate::post::Post;
use crate::post_list::ContentStore;

pub const POST_DATA_TOML: &str = r#"+++
title = "Hello world"
categories = ["Development", "Tools"]
tags = ["rust", "static site"]
+++
import Foo from 'bar'
# Title
Some **text**.
"#;

pub const POST_DATA_HEADER: &str = "<!--
[CATEGORIES]: # (Ideas)
[TAGS]: # (career software)
-->

# What I learned after 20+ years of software development
How to be a great software engineer?

Someone asked me this question today and I didn’t have an answer. After thinking for a while, I came up with a list of what I try to do myself.

Disclaimer: I don't think I am a great engineer, but I would love to have listened to that myself when I started my career, over 20 years ago.

## Non technical

### Have a honest image of yourself

You finished university and learned a lot. You solved many hard problems.
";

pub const CONFIG_DATA: &str = r#"
[site]
url = "https://alejandrocelaya.blog/"
title = "Alejandro Celaya | Blog"
subtitle = "Software development, agile methodologies and open source software"
disqus_shortname = "acelayablog"

[site.author]
name = "Alejandro Celaya"
email = "alejandro@alejandrocelaya.com"
link = "https://www.alejandrocelaya.com"

[paths]
posts_dir = "posts"
output_dir = "out"
"#;

/// Builds a post whose excerpt is its title, bypassing rendering.
pub fn create_post(file_name: &str, categories: &[Category], tags: &[&str]) -> Post {
    let entry = PostEntry {
        file_name: file_name.to_string(),
        body: format!("Body of *{}*", file_name),
        meta: PostMeta {
            title: format!("Title of {}", file_name),
            categories: categories.to_vec(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        },
    };
    let excerpt = format!("Excerpt of {}…", file_name);
    Post::from_entry(entry, excerpt).unwrap()
}

pub struct MemoryStore {
    entries: Vec<PostEntry>,
}

impl MemoryStore {
    pub fn new(entries: Vec<PostEntry>) -> Self {
        MemoryStore { entries }
    }
}

impl ContentStore for MemoryStore {
    fn list_ids(&self) -> Result<Vec<String>> {
        Ok(self.entries.iter().map(|e| e.file_name.clone()).collect())
    }

    fn load_post_entry(&self, id: &str) -> Result<PostEntry> {
        self.entries.iter()
            .find(|e| e.file_name == id)
            .cloned()
            .ok_or_else(|| BlogError::NotFound(id.to_string()))
    }
}
