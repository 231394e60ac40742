//! BibTeX parsing implementation.
//!
//! This module handles the low-level parsing of BibTeX text into raw
//! entries: entry type, citation key and an ordered list of fields with
//! macros expanded and `#` concatenations joined.

use crate::bibtex::structure::RawBibtexEntry;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::map,
    error::{Error, ErrorKind},
};
use std::collections::HashMap;
use tracing::warn;

/// Month macros every BibTeX style predefines.
const MONTH_MACROS: [(&str, &str); 12] = [
    ("jan", "January"),
    ("feb", "February"),
    ("mar", "March"),
    ("apr", "April"),
    ("may", "May"),
    ("jun", "June"),
    ("jul", "July"),
    ("aug", "August"),
    ("sep", "September"),
    ("oct", "October"),
    ("nov", "November"),
    ("dec", "December"),
];

/// Entries read from a BibTeX document, plus the lines of entries that could not be read.
#[derive(Debug, Default)]
pub(crate) struct RawBibtex {
    pub(crate) entries: Vec<RawBibtexEntry>,
    pub(crate) skipped_lines: Vec<usize>,
}

/// Result of parsing one `@` block.
enum Block {
    Entry(RawBibtexEntry),
    Macro(String, String),
    Ignored,
}

/// Parse the content of a BibTeX document.
///
/// Text outside `@` blocks is treated as commentary and ignored. A block
/// that cannot be parsed is skipped and scanning resumes at the next `@`.
pub(crate) fn bibtex_parse<S: AsRef<str>>(bibtex_text: S) -> RawBibtex {
    let text = bibtex_text.as_ref();
    let mut raw = RawBibtex::default();
    let mut macros: HashMap<String, String> = MONTH_MACROS
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    let mut remaining = text;
    let mut line_number = 1;

    while let Some(at) = remaining.find('@') {
        let line_start = remaining[..at].rfind('\n').map_or(0, |i| i + 1);
        if remaining[line_start..at].trim_start().starts_with('%') {
            let line_end = remaining[at..].find('\n').map_or(remaining.len(), |i| at + i);
            line_number += remaining[..line_end].matches('\n').count();
            remaining = &remaining[line_end..];
            continue;
        }

        line_number += remaining[..at].matches('\n').count();
        remaining = &remaining[at..];

        match parse_block(remaining, &macros) {
            Ok((rest, block)) => {
                let consumed = &remaining[..remaining.len() - rest.len()];
                match block {
                    Block::Entry(mut entry) => {
                        entry.line = line_number;
                        raw.entries.push(entry);
                    }
                    Block::Macro(name, value) => {
                        macros.insert(name, value);
                    }
                    Block::Ignored => {}
                }
                line_number += consumed.matches('\n').count();
                remaining = rest;
            }
            Err(_) => {
                warn!(line = line_number, "skipping malformed BibTeX entry");
                raw.skipped_lines.push(line_number);
                remaining = &remaining[1..];
            }
        }
    }

    raw
}

/// Parse an `@` block: an entry, a `@string` macro, or an ignored
/// `@comment` / `@preamble`.
fn parse_block<'a>(input: &'a str, macros: &HashMap<String, String>) -> IResult<&'a str, Block> {
    let (rest, _) = char('@')(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, kind) = take_while1(|c: char| c.is_ascii_alphanumeric())(rest)?;
    let (rest, _) = multispace0(rest)?;

    match kind.to_ascii_lowercase().as_str() {
        "comment" => {
            if rest.starts_with('{') {
                let (rest, _) = braced_content(rest)?;
                Ok((rest, Block::Ignored))
            } else {
                let end = rest.find('\n').unwrap_or(rest.len());
                Ok((&rest[end..], Block::Ignored))
            }
        }
        "preamble" => {
            let (rest, _) = braced_content(rest)?;
            Ok((rest, Block::Ignored))
        }
        "string" => {
            let (rest, _) = char('{')(rest)?;
            let (rest, (name, value)) = parse_field(rest, macros)?;
            let (rest, _) = multispace0(rest)?;
            let (rest, _) = char('}')(rest)?;
            Ok((rest, Block::Macro(name, value)))
        }
        _ => {
            let (rest, entry) = parse_entry_body(rest, kind, macros)?;
            Ok((rest, Block::Entry(entry)))
        }
    }
}

/// Parse `{key, field = value, ...}` after the entry type.
fn parse_entry_body<'a>(
    input: &'a str,
    entry_type: &str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, RawBibtexEntry> {
    let (rest, _) = char('{')(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, cite_key) =
        take_while(|c: char| !c.is_whitespace() && !matches!(c, ',' | '{' | '}' | '='))(rest)?;
    let (rest, _) = multispace0(rest)?;

    let mut entry = RawBibtexEntry::new(entry_type, cite_key);

    if let Some(rest) = rest.strip_prefix('}') {
        return Ok((rest, entry));
    }

    let (mut remaining, _) = char(',')(rest)?;
    loop {
        let (rest, _) = multispace0(remaining)?;
        if let Some(rest) = rest.strip_prefix('}') {
            return Ok((rest, entry));
        }

        let (rest, (name, value)) = parse_field(rest, macros)?;
        entry.add_field(name, value);

        let (rest, _) = multispace0(rest)?;
        remaining = rest.strip_prefix(',').unwrap_or(rest);
        if remaining.len() == rest.len() && !rest.starts_with('}') {
            return Err(nom::Err::Error(Error::new(rest, ErrorKind::Char)));
        }
    }
}

/// Parse `name = value`, lower-casing the name.
fn parse_field<'a>(
    input: &'a str,
    macros: &HashMap<String, String>,
) -> IResult<&'a str, (String, String)> {
    let (rest, _) = multispace0(input)?;
    let (rest, name) = take_while1(is_name_char)(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, value) = parse_value(rest, macros)?;

    Ok((rest, (name.to_ascii_lowercase(), value)))
}

/// Parse a field value: braced, quoted, numeric or macro parts joined by `#`.
fn parse_value<'a>(input: &'a str, macros: &HashMap<String, String>) -> IResult<&'a str, String> {
    let mut value = String::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;
        let (rest, part) = alt((
            map(braced_content, str::to_string),
            map(quoted_content, str::to_string),
            map(take_while1(|c: char| c.is_ascii_digit()), str::to_string),
            map(take_while1(is_name_char), |name: &str| {
                macros
                    .get(&name.to_ascii_lowercase())
                    .cloned()
                    .unwrap_or_else(|| name.to_string())
            }),
        ))(rest)?;
        value.push_str(&part);

        let (rest, _) = multispace0(rest)?;
        match rest.strip_prefix('#') {
            Some(rest) => remaining = rest,
            None => return Ok((rest, value)),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '.' | '+' | '/')
}

/// Parse `{...}` with nested braces, returning the content without the outer pair.
fn braced_content(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('{') {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Char)));
    }

    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[pos + 1..], &input[1..pos]));
                }
            }
            b'\\' => pos += 1,
            _ => {}
        }
        pos += 1;
    }

    Err(nom::Err::Error(Error::new(input, ErrorKind::Eof)))
}

/// Parse `"..."`; quotes nested inside braces do not end the value.
fn quoted_content(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('"') {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Char)));
    }

    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut pos = 1;

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            b'\\' => pos += 1,
            b'"' if depth == 0 => return Ok((&input[pos + 1..], &input[1..pos])),
            _ => {}
        }
        pos += 1;
    }

    Err(nom::Err::Error(Error::new(input, ErrorKind::Eof)))
}
