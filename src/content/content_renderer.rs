use crate::error::Result;

/// Turns a post body into HTML.
///
/// Implementations must be pure: the same body always renders to the same
/// HTML, since excerpts and feeds are derived from it on every build.
pub trait ContentRenderer: Sync {
    fn render(&self, file_name: &str, body: &str) -> Result<String>;
}
