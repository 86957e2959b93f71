use markdown::Options;

use crate::content::content_renderer::ContentRenderer;
use crate::content::parsing_utils::remove_comments;
use crate::error::{BlogError, Result};

/// GFM markdown renderer. MDX bodies go through it as plain markdown: import
/// declarations end up as paragraphs and JSX is escaped as text.
pub struct MarkdownRenderer {}

impl ContentRenderer for MarkdownRenderer {
    fn render(&self, file_name: &str, body: &str) -> Result<String> {
        let buf = remove_comments(body).ok_or_else(|| BlogError::Render {
            file_name: file_name.to_string(),
            reason: "Error finding end of comment".to_string(),
        })?;

        markdown::to_html_with_options(buf.as_str(), &Options::gfm()).map_err(|e| BlogError::Render {
            file_name: file_name.to_string(),
            reason: e.reason.clone(),
        })
    }
}
