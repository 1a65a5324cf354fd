//! Parser for generated alphabetical index pages (genindex.html)
//!
//! The index page lays entries out as a sequence of `<table
//! class="genindextable">` elements, each holding `<dt>` items in
//! document order. A `<dt>` either wraps its own link, or is a bare
//! label whose link lives in the next `<dt>` (the first sub-entry of
//! a grouped term).

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, VecDeque};
use std::fmt;

lazy_static! {
    static ref RE_CLASS: Regex = Regex::new(r#"class\s*=\s*["']([^"']*)["']"#).unwrap();
    static ref RE_LINK: Regex =
        Regex::new(r#"(?s)<a\s[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a>"#).unwrap();
}

/// Marker class identifying index tables in the generated page.
const INDEX_TABLE_CLASS: &str = "genindextable";

#[derive(Debug)]
pub enum ParseError {
    Io(std::io::Error),
    /// A bare label was the last entry of its table, so there is no
    /// following entry to take a link from.
    DanglingLabel(String),
    /// The entry following a bare label carries no link.
    MissingLink(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io(e) => write!(f, "failed to read index page: {}", e),
            ParseError::DanglingLabel(label) => {
                write!(f, "index label '{}' has no following entry", label)
            }
            ParseError::MissingLink(label) => {
                write!(f, "index label '{}' is not followed by a linked entry", label)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::Io(e)
    }
}

/// Extract the term -> relative href mapping from a genindex page.
///
/// Tables are scanned in document order; scanning stops at the first
/// table without the genindextable marker. A page with no qualifying
/// table yields an empty mapping. Later occurrences of a term
/// overwrite earlier ones.
pub fn parse_genindex(html: &str) -> Result<HashMap<String, String>, ParseError> {
    let mut entries = HashMap::new();

    let mut pos = 0;
    while let Some(rel) = html[pos..].find("<table") {
        let tag_start = pos + rel;
        let Some(open_len) = html[tag_start..].find('>') else {
            break;
        };
        let open_tag = &html[tag_start..tag_start + open_len + 1];

        let marked = RE_CLASS
            .captures(open_tag)
            .map(|c| c[1].split_whitespace().any(|cls| cls == INDEX_TABLE_CLASS))
            .unwrap_or(false);
        if !marked {
            break;
        }

        let body_start = tag_start + open_len + 1;
        let body_end = html[body_start..]
            .find("</table>")
            .map(|e| body_start + e)
            .unwrap_or(html.len());
        let body = &html[body_start..body_end];

        let mut queue: VecDeque<&str> = collect_dt_blocks(body).into();
        while let Some(block) = queue.pop_front() {
            if let Some(cap) = RE_LINK.captures(block) {
                let term = visible_text(&cap[2]);
                if !term.is_empty() {
                    entries.insert(term, cap[1].to_string());
                }
            } else {
                // Bare label: the link lives in the next entry. Grouped
                // terms are flattened to their first sub-entry's page.
                let label = visible_text(block);
                let next = queue
                    .pop_front()
                    .ok_or_else(|| ParseError::DanglingLabel(label.clone()))?;
                let cap = RE_LINK
                    .captures(next)
                    .ok_or_else(|| ParseError::MissingLink(label.clone()))?;
                if !label.is_empty() {
                    entries.insert(label, cap[1].to_string());
                }
            }
        }

        pos = body_end;
    }

    Ok(entries)
}

/// Collect the inner content of every `<dt>` in document order,
/// including those nested in sub-entry lists.
fn collect_dt_blocks(body: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(rel) = body[pos..].find("<dt") {
        let tag_start = pos + rel;
        let after = &body[tag_start + 3..];
        if !(after.starts_with('>') || after.starts_with(|c: char| c.is_whitespace())) {
            pos = tag_start + 3;
            continue;
        }
        let Some(open_len) = body[tag_start..].find('>') else {
            break;
        };
        let content_start = tag_start + open_len + 1;
        // Tolerate a missing close tag by ending the block at the next <dt>.
        let content_end = match body[content_start..].find("</dt>") {
            Some(e) => content_start + e,
            None => match body[content_start..].find("<dt") {
                Some(e) => content_start + e,
                None => body.len(),
            },
        };
        blocks.push(&body[content_start..content_end]);
        pos = content_end;
    }

    blocks
}

/// Rendered text of a markup fragment: tags removed, common entities
/// decoded, surrounding whitespace trimmed.
fn visible_text(fragment: &str) -> String {
    let mut stripped = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => stripped.push(c),
            _ => {}
        }
    }
    decode_entities(&stripped).trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
