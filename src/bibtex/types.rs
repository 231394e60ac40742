//! BibTeX entry types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// BibTeX entry types.
///
/// Names are matched case-insensitively; anything unknown is kept verbatim
/// (lower-cased) in [`EntryType::Other`] so it can be written back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    /// @article - Journal article
    #[default]
    Article,
    /// @book - Book with an explicit publisher
    Book,
    /// @booklet - Printed work without a named publisher
    Booklet,
    /// @inbook - Part of a book, e.g. a chapter
    InBook,
    /// @incollection - Part of a book with its own title
    InCollection,
    /// @inproceedings - Conference paper
    InProceedings,
    /// @conference - Same as @inproceedings
    Conference,
    /// @manual - Technical documentation
    Manual,
    /// @mastersthesis - Master's thesis
    MastersThesis,
    /// @phdthesis - PhD thesis
    PhdThesis,
    /// @proceedings - Conference proceedings volume
    Proceedings,
    /// @techreport - Report published by an institution
    TechReport,
    /// @unpublished - Work not formally published
    Unpublished,
    /// @misc - Anything else
    Misc,
    /// Any other entry type
    Other(CompactString),
}

impl EntryType {
    /// Parses an entry type name.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "article" => EntryType::Article,
            "book" => EntryType::Book,
            "booklet" => EntryType::Booklet,
            "inbook" => EntryType::InBook,
            "incollection" => EntryType::InCollection,
            "inproceedings" => EntryType::InProceedings,
            "conference" => EntryType::Conference,
            "manual" => EntryType::Manual,
            "mastersthesis" => EntryType::MastersThesis,
            "phdthesis" => EntryType::PhdThesis,
            "proceedings" => EntryType::Proceedings,
            "techreport" => EntryType::TechReport,
            "unpublished" => EntryType::Unpublished,
            "misc" => EntryType::Misc,
            other => EntryType::Other(CompactString::from(other)),
        }
    }

    /// Returns the name written after `@`.
    pub fn as_str(&self) -> &str {
        match self {
            EntryType::Article => "article",
            EntryType::Book => "book",
            EntryType::Booklet => "booklet",
            EntryType::InBook => "inbook",
            EntryType::InCollection => "incollection",
            EntryType::InProceedings => "inproceedings",
            EntryType::Conference => "conference",
            EntryType::Manual => "manual",
            EntryType::MastersThesis => "mastersthesis",
            EntryType::PhdThesis => "phdthesis",
            EntryType::Proceedings => "proceedings",
            EntryType::TechReport => "techreport",
            EntryType::Unpublished => "unpublished",
            EntryType::Misc => "misc",
            EntryType::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("article", EntryType::Article)]
    #[case("ARTICLE", EntryType::Article)]
    #[case("InProceedings", EntryType::InProceedings)]
    #[case("phdthesis", EntryType::PhdThesis)]
    #[case("Dataset", EntryType::Other("dataset".into()))]
    fn test_from_name(#[case] name: &str, #[case] expected: EntryType) {
        assert_eq!(EntryType::from_name(name), expected);
    }

    #[test]
    fn test_as_str_round_trip() {
        for name in ["article", "inproceedings", "techreport", "software"] {
            assert_eq!(EntryType::from_name(name).as_str(), name);
        }
    }
}
