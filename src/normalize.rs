//! Title and author normalization.
//!
//! Titles coming out of BibTeX exports carry case-protection braces, LaTeX
//! commands and accented letters in several spellings (`Caf{\'e}`, `Café`,
//! `CAFÉ`). Everything that compares or deduplicates titles goes through
//! [`normalize_title`] so those spellings collapse to one key.

use crate::regex::{Captures, Regex};
use itertools::Itertools;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Accent commands such as `\'e`, `\"{u}` or `\~ n`.
static ACCENT_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\\['`^"~=.]\s*\{?\s*([A-Za-z])\s*\}?"#).unwrap());

/// Commands wrapping a single group, e.g. `\textit{word}`.
static COMMAND_WITH_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[A-Za-z]+\*?\s*\{([^{}]*)\}").unwrap());

/// Bare command words, e.g. `\LaTeX` or `\ss`.
static COMMAND_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\[A-Za-z]+\*?").unwrap());

/// Nested `\cmd{\cmd{...}}` groups are unwrapped one level per pass.
const MAX_UNWRAP_PASSES: usize = 8;

/// Normalizes a title into its comparison key.
///
/// Braces, LaTeX commands and diacritics are removed, the text is lowercased
/// and whitespace runs collapse to single spaces. Empty input gives an empty
/// string, and the function is idempotent.
///
/// # Examples
///
/// ```
/// use bibsort::normalize_title;
///
/// assert_eq!(normalize_title("{Caf\\'e} Culture"), "cafe culture");
/// assert_eq!(normalize_title("CAFÉ culture"), "cafe culture");
/// assert_eq!(normalize_title(""), "");
/// ```
pub fn normalize_title(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let stripped = strip_diacritics(raw);
    let cleaned = clean_markup(&stripped);
    let lowered = strip_diacritics(&cleaned.to_lowercase());
    collapse_whitespace(&lowered)
}

/// Normalizes an author name for tallying.
///
/// Markup and diacritics are removed like in [`normalize_title`], but letter
/// case is kept so the name remains readable.
pub fn normalize_author(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    collapse_whitespace(&clean_markup(&strip_diacritics(raw)))
}

/// Removes LaTeX markup, leaving the plain text.
pub fn clean_markup(text: &str) -> String {
    let mut text = ACCENT_COMMAND
        .replace_all(text, |caps: &Captures| caps[1].to_string())
        .into_owned();

    for _ in 0..MAX_UNWRAP_PASSES {
        if !COMMAND_WITH_GROUP.is_match(&text) {
            break;
        }
        text = COMMAND_WITH_GROUP.replace_all(&text, "$1").into_owned();
    }

    let text = COMMAND_WORD.replace_all(&text, "");
    text.chars()
        .filter(|c| !matches!(c, '{' | '}' | '\\'))
        .collect()
}

/// Decomposes to NFKD and drops combining marks.
fn strip_diacritics(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("Café", "cafe")]
    #[case("CAFÉ", "cafe")]
    #[case("cafe", "cafe")]
    #[case("Caf\\'e", "cafe")]
    #[case("Caf{\\'e}", "cafe")]
    #[case("Caf\\'{e}", "cafe")]
    #[case("{Deep} {Learning} for {NLP}", "deep learning for nlp")]
    #[case("\\textit{In vivo} imaging", "in vivo imaging")]
    #[case("\\textbf{\\emph{Nested}} commands", "nested commands")]
    #[case("The \\LaTeX\\ Companion", "the companion")]
    #[case("Research \\& Development", "research & development")]
    #[case("  Lots   of\n\tspace  ", "lots of space")]
    #[case("M{\\\"u}ller's Ångström", "muller's angstrom")]
    #[case("", "")]
    fn test_normalize_title(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_title(raw), expected);
    }

    #[rstest]
    #[case("Café")]
    #[case("{\\textit{Über}} alles")]
    #[case("İstanbul ℌilbert")]
    #[case("  Generative {AI}:  a survey ")]
    fn test_normalize_title_idempotent(#[case] raw: &str) {
        let once = normalize_title(raw);
        assert_eq!(normalize_title(&once), once);
    }

    #[test]
    fn test_normalize_title_case_insensitive() {
        assert_eq!(normalize_title("Café"), normalize_title("CAFÉ"));
        assert_eq!(normalize_title("CAFÉ"), normalize_title("cafe"));
    }

    #[rstest]
    #[case("M{\\\"u}ller, Hans", "Muller, Hans")]
    #[case("Müller,   Hans", "Muller, Hans")]
    #[case("  {van der Berg}, Jan ", "van der Berg, Jan")]
    #[case("", "")]
    fn test_normalize_author(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_author(raw), expected);
    }

    #[test]
    fn test_clean_markup_keeps_plain_text() {
        assert_eq!(clean_markup("plain text"), "plain text");
        assert_eq!(clean_markup("{a}{b}\\c"), "ab");
    }
}
