use std::str::Lines;

use lazy_static::lazy_static;
use regex::Regex;

use crate::content::{Category, PostMeta};
use crate::error::{BlogError, Result};

const TOML_FENCE: &str = "+++";
const YAML_FENCE: &str = "---";

#[derive(Debug, Default, PartialEq)]
struct LinkHeader {
    title: Option<String>,
    categories: String,
    tags: String,
}

/// Splits a raw post file into its declared metadata and its body.
///
/// Accepted styles: a YAML block fenced by `---` lines, a TOML block fenced by
/// `+++` lines, or `[KEY]: # (value)` header lines. A post without a `TITLE`
/// header takes the first `# ` heading as title.
pub fn parse_front_matter(file_name: &str, raw_content: &str) -> Result<(PostMeta, String)> {
    let first_line = raw_content.lines().find(|l| !l.trim().is_empty());
    let (meta, body) = match first_line.map(str::trim) {
        Some(YAML_FENCE) => parse_fenced_front_matter(file_name, raw_content, YAML_FENCE, |block| {
            serde_yaml::from_str::<PostMeta>(block).map_err(|e| e.to_string())
        })?,
        Some(TOML_FENCE) => parse_fenced_front_matter(file_name, raw_content, TOML_FENCE, |block| {
            toml::from_str::<PostMeta>(block).map_err(|e| e.to_string())
        })?,
        _ => parse_header_front_matter(file_name, raw_content)?,
    };

    if meta.title.trim().is_empty() {
        return Err(front_matter_error(file_name, "title is missing"));
    }
    Ok((meta, body))
}

fn parse_fenced_front_matter<F>(file_name: &str, raw_content: &str, fence: &str, parse_block: F) -> Result<(PostMeta, String)>
where
    F: FnOnce(&str) -> std::result::Result<PostMeta, String>,
{
    let mut lines = raw_content.lines().skip_while(|l| l.trim().is_empty());
    // Opening fence
    lines.next();

    let mut block = String::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim() == fence {
            closed = true;
            break;
        }
        block.push_str(line);
        block.push('\n');
    }

    if !closed {
        return Err(front_matter_error(file_name, &format!("closing {} is missing", fence)));
    }

    let meta = parse_block(&block).map_err(|reason| front_matter_error(file_name, &reason))?;
    let body = lines.collect::<Vec<&str>>().join("\n");
    Ok((meta, body))
}

fn parse_header_front_matter(file_name: &str, raw_content: &str) -> Result<(PostMeta, String)> {
    let (header, lines, maybe_line) = match parse_link_header(file_name, raw_content.lines())? {
        Some(parsed) => parsed,
        None => (LinkHeader::default(), raw_content.lines(), None),
    };

    let mut remaining: Vec<&str> = maybe_line.into_iter().chain(lines).collect();
    let title = match header.title {
        Some(title) => title,
        None => take_title_markdown(&mut remaining).unwrap_or_default(),
    };

    let categories = split_values(&header.categories)
        .into_iter()
        .map(|c| c.parse::<Category>())
        .collect::<Result<Vec<Category>>>()
        .map_err(|e| front_matter_error(file_name, &e.to_string()))?;

    let meta = PostMeta {
        title,
        categories,
        tags: split_values(&header.tags),
    };
    Ok((meta, remaining.join("\n")))
}

fn parse_link_header<'a>(file_name: &str, lines: Lines<'a>) -> Result<Option<(LinkHeader, Lines<'a>, Option<&'a str>)>> {
    let mut header = LinkHeader::default();
    let mut found = false;

    let mut lines = lines.clone();
    let mut maybe_line = lines.next();

    // Skip optional HTML comment in the beginning
    let mut start_with_comment = false;

    while let Some(line) = maybe_line {
        let line = line.trim();

        // Empty lines are ok
        if line.is_empty() {
            maybe_line = lines.next();
            continue;
        }

        if line == "<!--" {
            maybe_line = lines.next();
            start_with_comment = true;
        }
        break;
    }

    while let Some(line) = maybe_line {
        if line.trim().is_empty() {
            maybe_line = lines.next();
            continue;
        }

        let Some((key, val)) = extract_link_header(line) else {
            break;
        };

        found = true;
        match key {
            "TITLE" => header.title = Some(val.trim().to_string()),
            "CATEGORIES" => header.categories = val.to_string(),
            "TAGS" => header.tags = val.to_string(),
            _ => {}
        }
        maybe_line = lines.next();
    }

    if start_with_comment {
        // Let's find the end of the comment
        loop {
            match maybe_line {
                Some(line) if line.trim() == "-->" => {
                    maybe_line = lines.next();
                    break;
                }
                Some(_) => maybe_line = lines.next(),
                None => return Err(front_matter_error(file_name, "End of comment in the header is missing")),
            }
        }
    }

    if !found {
        return Ok(None);
    }

    Ok(Some((header, lines, maybe_line)))
}

/// Removes the first `# ` heading line and returns its text.
fn take_title_markdown(lines: &mut Vec<&str>) -> Option<String> {
    let pos = lines.iter().position(|line| line.starts_with("# "))?;
    let line = lines.remove(pos);
    Some(line[2..].trim().to_string())
}

fn split_values(values: &str) -> Vec<String> {
    values.split(' ')
        .filter(|x| !x.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn extract_link_header(line: &str) -> Option<(&str, &str)> {
    lazy_static! {
        static ref HEADER_REGEX: Regex = Regex::new(r"^\[(?P<key>\w+)\]: # \((?P<value>.*)\)\s*$").unwrap();
    }
    extract_header_key_val(line, &HEADER_REGEX)
}

fn extract_header_key_val<'a>(line: &'a str, header_regex: &Regex) -> Option<(&'a str, &'a str)> {
    header_regex.captures(line).and_then(|cap| {
        let key = cap.name("key").map(|key| key.as_str());
        let val = cap.name("value").map(|val| val.as_str());
        match (key, val) {
            (Some(key), Some(val)) => Some((key, val)),
            _ => None
        }
    })
}

fn front_matter_error(file_name: &str, reason: &str) -> BlogError {
    BlogError::FrontMatter {
        file_name: file_name.to_string(),
        reason: reason.to_string(),
    }
}

/// Strips `<!-- ... -->` blocks so they never reach the rendered output.
pub fn remove_comments(md_post: &str) -> Option<String> {
    let mut res: String = String::new();
    let mut slice = md_post;

    let start_comment = "<!--";
    let end_comment = "-->";

    while let Some(start) = slice.find(start_comment) {
        res.push_str(&slice[0..start]);

        let next: &str = &slice[(start + start_comment.len())..];
        let end = next.find(end_comment)?;
        slice = &next[(end + end_comment.len())..];
    }
    res.push_str(slice);

    Some(res)
}
