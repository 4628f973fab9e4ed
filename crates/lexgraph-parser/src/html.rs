//! HTML document parser
//!
//! Keeps only the text of the `<body>` element. Script, style and comment
//! blocks are dropped, every other tag is removed without inserting
//! whitespace, and character references are decoded. Line breaks present
//! in the source are preserved since citations often wrap across them.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{read_utf8, DocumentParser, FileType, ParsedDocument, ParserError, Result};

static BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<body\b[^>]*>(.*?)(?:</body\s*>|\z)").expect("BODY regex is invalid")
});
static SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>").expect("SCRIPT regex is invalid")
});
static STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b.*?</style\s*>").expect("STYLE regex is invalid"));
static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("COMMENT regex is invalid"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("TAG regex is invalid"));
static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});")
        .expect("ENTITY regex is invalid")
});

/// HTML document parser
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for HtmlParser {
    fn parse(&self, path: &Path) -> Result<ParsedDocument> {
        let html = read_utf8(path)?;
        let text = extract_body_text(&html)
            .ok_or_else(|| ParserError::MissingBody(path.display().to_string()))?;

        tracing::debug!(
            "Extracted {} chars of body text from {}",
            text.chars().count(),
            path.display()
        );

        Ok(ParsedDocument::new(path, FileType::Html).with_content(text))
    }

    fn supported_types(&self) -> &[FileType] {
        &[FileType::Html]
    }
}

/// Extract the plain text of the `<body>` element
///
/// Returns `None` when the document has no body element at all.
pub fn extract_body_text(html: &str) -> Option<String> {
    let body = BODY.captures(html)?.get(1)?.as_str();

    let text = SCRIPT.replace_all(body, "");
    let text = STYLE.replace_all(&text, "");
    let text = COMMENT.replace_all(&text, "");
    let text = TAG.replace_all(&text, "");

    Some(decode_entities(&text))
}

/// Decode named and numeric character references
///
/// Unknown names and invalid code points are left untouched.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let reference = &caps[1];
            decode_reference(reference).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_reference(reference: &str) -> Option<String> {
    if let Some(hex) = reference
        .strip_prefix("#x")
        .or_else(|| reference.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from);
    }
    if let Some(dec) = reference.strip_prefix('#') {
        return dec
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from);
    }

    let decoded = match reference {
        "nbsp" => '\u{a0}',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "emsp" => '\u{2003}',
        "rlm" => '\u{200f}',
        "lrm" => '\u{200e}',
        _ => return None,
    };
    Some(decoded.to_string())
}
