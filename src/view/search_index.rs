use serde::Serialize;

use crate::content::Category;
use crate::post::Post;
use crate::text_utils::html_to_text;

/// One searchable document per post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchEntry<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub url: &'a str,
    pub date: String,
    pub categories: &'a [Category],
    pub tags: &'a [String],
    pub body: String,
    pub description: &'a str,
}

impl<'a> SearchEntry<'a> {
    /// `html` is the rendered body of `post`; only its text is indexed.
    pub fn new(post: &'a Post, html: &str) -> SearchEntry<'a> {
        SearchEntry {
            id: &post.slug,
            title: post.title(),
            url: &post.url,
            date: post.date.to_string(),
            categories: &post.data.categories,
            tags: &post.data.tags,
            body: html_to_text(html),
            description: &post.excerpt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::markdown_renderer::MarkdownRenderer;
    use crate::test_data::create_post;

    #[test]
    fn test_search_entry() {
        let mut post = create_post("2024-03-05-hello-world.mdx", &[Category::Web], &["rust", "search"]);
        post.body = "import Foo from 'bar'\n\n# Hello\n\nSome **text** &amp; more.\n".to_string();
        let html = post.render_body(&MarkdownRenderer {}).unwrap();

        let entry = SearchEntry::new(&post, &html);
        assert_eq!(entry.id, "hello-world");
        assert_eq!(entry.url, "/2024/03/05/hello-world/");
        assert_eq!(entry.date, "2024-03-05");
        assert_eq!(entry.body, "Hello Some text & more.");
        assert_eq!(entry.description, "Excerpt of 2024-03-05-hello-world.mdx…");

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["categories"][0], "Web");
        assert_eq!(json["tags"][1], "search");
        assert_eq!(json["title"], "Title of 2024-03-05-hello-world.mdx");
    }

    #[test]
    fn test_body_is_plain_text() {
        let post = create_post("2024-03-05-b.md", &[], &[]);
        let entry = SearchEntry::new(&post, "<p>Body of <em>b</em></p>\n\n<ul>\n<li>one</li>\n</ul>\n");
        assert_eq!(entry.body, "Body of b one");
    }
}
