use std::borrow::Cow;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // An unterminated tag swallows the rest of the line
    static ref TAG_REGEX: Regex = Regex::new(r"</?[^>]+(>|$)").unwrap();
    static ref SPACES_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

const IMPORT_PREFIX: &str = "import ";

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Builds a date from its positional components, failing for non calendar dates.
pub fn parse_date(year: &str, month: &str, day: &str) -> Result<NaiveDate, String> {
    let date_str = format!("{}-{}-{}", year, month, day);
    let y: i32 = to_int(year, &date_str)?;
    let m: u32 = to_int(month, &date_str)?;
    let d: u32 = to_int(day, &date_str)?;

    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| format!("Invalid calendar date {}", date_str))
}

/// `2024-03-05` -> `05 March 2024`
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

pub fn strip_tags(line: &str) -> Cow<'_, str> {
    TAG_REGEX.replace_all(line, "")
}

pub fn decode_entities(line: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(line)
}

pub fn is_import_line(line: &str) -> bool {
    line.starts_with(IMPORT_PREFIX)
}

/// Removes MDX import declarations from a raw body.
pub fn strip_mdx_imports(body: &str) -> String {
    body.split('\n')
        .filter(|line| !is_import_line(line))
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Cuts after `max_chars` chars (Unicode scalar values), possibly in the middle of a word.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn compact_whitespace(text: &str) -> String {
    SPACES_REGEX.replace_all(text, " ").trim().to_string()
}

/// Plain text of a rendered HTML document.
pub fn html_to_text(html: &str) -> String {
    let text = html.split('\n')
        .map(|line| decode_entities(&strip_tags(line)).into_owned())
        .collect::<Vec<String>>()
        .join(" ");
    compact_whitespace(&text)
}
