//! Plain text teasers for post listings.
//!
//! The steps run in a fixed order so excerpts stay identical to the ones the
//! site has always published:
//!
//! 1. render the body to HTML
//! 2. split the HTML in lines
//! 3. strip tags from each line and split again on any embedded line break
//! 4. decode HTML entities
//! 5. drop MDX `import ` lines
//! 6. keep the first paragraphs (6 by default)
//! 7. join them with a single space
//! 8. cut at a number of characters (300 by default), even inside a word
//! 9. append `…`, always

use crate::config::Defaults;
use crate::content::content_renderer::ContentRenderer;
use crate::error::Result;
use crate::text_utils::{decode_entities, is_import_line, strip_tags, truncate_chars};

pub const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExcerptOptions {
    pub max_paragraphs: usize,
    /// Counted in Unicode scalar values: an emoji is one char, not two
    /// UTF-16 code units.
    pub max_chars: usize,
}

impl Default for ExcerptOptions {
    fn default() -> Self {
        ExcerptOptions {
            max_paragraphs: 6,
            max_chars: 300,
        }
    }
}

impl From<&Defaults> for ExcerptOptions {
    fn from(defaults: &Defaults) -> Self {
        ExcerptOptions {
            max_paragraphs: defaults.excerpt_paragraphs,
            max_chars: defaults.excerpt_length,
        }
    }
}

/// Renders `body` and extracts its excerpt. Renderer failures are propagated.
pub fn excerpt<R: ContentRenderer + ?Sized>(renderer: &R, file_name: &str, body: &str, options: ExcerptOptions) -> Result<String> {
    let html = renderer.render(file_name, body)?;
    Ok(excerpt_from_html(&html, options))
}

pub fn excerpt_from_html(html: &str, options: ExcerptOptions) -> String {
    let paragraphs: Vec<String> = html.split('\n')
        .flat_map(|line| {
            strip_tags(line)
                .split('\n')
                .map(|s| s.to_string())
                .collect::<Vec<String>>()
        })
        .map(|line| decode_entities(&line).into_owned())
        .filter(|line| !is_import_line(line))
        .take(options.max_paragraphs)
        .collect();

    let joined = paragraphs.join(" ");
    let mut excerpt = truncate_chars(&joined, options.max_chars).to_string();
    excerpt.push(ELLIPSIS);
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::markdown_renderer::MarkdownRenderer;
    use crate::error::BlogError;

    struct FailingRenderer {}

    impl ContentRenderer for FailingRenderer {
        fn render(&self, file_name: &str, _body: &str) -> Result<String> {
            Err(BlogError::Render { file_name: file_name.to_string(), reason: "boom".to_string() })
        }
    }

    fn excerpt_of(html: &str) -> String {
        excerpt_from_html(html, ExcerptOptions::default())
    }

    #[test]
    fn test_strips_tags_and_decodes() {
        let html = "<h1>Title</h1>\n<p>Some <strong>text</strong> &amp; more.</p>";
        assert_eq!(excerpt_of(html), "Title Some text & more.…");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(excerpt_of(""), "…");
        assert_eq!(excerpt_of("<p>import Foo from 'bar'</p>"), "…");
    }

    #[test]
    fn test_drops_imports() {
        let html = "<p>import Foo from 'bar'</p>\n<p>import { Baz } from './baz'</p>\n<p>Real content</p>";
        assert_eq!(excerpt_of(html), "Real content…");
        // Only the `import ` prefix is dropped
        assert_eq!(excerpt_of("<p>important things</p>"), "important things…");
    }

    #[test]
    fn test_import_after_decoding() {
        // Decoding happens before the import filter
        let html = "<p>&#105;mport nothing</p>\n<p>Text</p>";
        assert_eq!(excerpt_of(html), "Text…");
    }

    #[test]
    fn test_keeps_first_six_lines() {
        let html = (1..=10).map(|i| format!("<p>P{}</p>", i)).collect::<Vec<String>>().join("\n");
        assert_eq!(excerpt_of(&html), "P1 P2 P3 P4 P5 P6…");
    }

    #[test]
    fn test_truncates_by_chars() {
        let long = "a".repeat(250) + " " + &"b".repeat(100);
        let res = excerpt_of(&format!("<p>{}</p>", long));
        assert!(res.ends_with(ELLIPSIS));
        let without_ellipsis: String = res.chars().take(res.chars().count() - 1).collect();
        assert_eq!(without_ellipsis.chars().count(), 300);
        // Cut in the middle of the second word
        assert!(without_ellipsis.ends_with(&"b".repeat(49)));
    }

    #[test]
    fn test_truncates_multibyte() {
        let res = excerpt_of(&format!("<p>{}</p>", "é".repeat(400)));
        assert_eq!(res, "é".repeat(300) + "…");
    }

    #[test]
    fn test_truncates_astral_chars_as_one() {
        let res = excerpt_of(&format!("<p>{}</p>", "😀".repeat(400)));
        assert_eq!(res, "😀".repeat(300) + "…");

        let options = ExcerptOptions { max_paragraphs: 6, max_chars: 3 };
        assert_eq!(excerpt_from_html("<p>a😀b😀</p>", options), "a😀b…");
    }

    #[test]
    fn test_custom_options() {
        let options = ExcerptOptions { max_paragraphs: 2, max_chars: 5 };
        assert_eq!(excerpt_from_html("<p>one</p>\n<p>two</p>\n<p>three</p>", options), "one t…");
    }

    #[test]
    fn test_rendered_mdx_body() {
        let renderer = MarkdownRenderer {};
        let body = "import Foo from 'bar'\n# Title\nSome **text**.\n";
        let res = excerpt(&renderer, "2024-03-05-hello-world.mdx", body, ExcerptOptions::default()).unwrap();
        assert!(res.starts_with("Title Some text."), "{}", res);
        assert!(res.ends_with('…'));
        assert!(!res.contains("import"));
        assert!(!res.contains('<'));
    }

    #[test]
    fn test_renderer_failure() {
        let res = excerpt(&FailingRenderer {}, "2024-03-05-x.md", "text", ExcerptOptions::default());
        assert!(matches!(res, Err(BlogError::Render { .. })));
    }

    #[test]
    fn test_properties() {
        let renderer = MarkdownRenderer {};
        let long = "word ".repeat(200);
        let bodies = [
            "",
            "import A from 'a'\nimport B from 'b'\n",
            "Para one\n\nPara two\n\n> quote\n\n- item\n- item 2\n",
            long.as_str(),
        ];
        for body in bodies {
            let res = excerpt(&renderer, "2024-01-01-x.md", body, ExcerptOptions::default()).unwrap();
            assert!(res.ends_with('…'));
            assert!(res.chars().count() - 1 <= 300);
            assert!(!res.split('\n').any(|l| l.starts_with("import ")));
            // Deterministic
            assert_eq!(res, excerpt(&renderer, "2024-01-01-x.md", body, ExcerptOptions::default()).unwrap());
        }
    }
}
