//! Core data types used throughout pitchside.

/// A knowledge record parsed from one corpus chunk.
///
/// The first non-empty line of the chunk is the record label (one trailing
/// `:` stripped, if present); every following non-empty line is a member
/// entry. A chunk with fewer than two non-empty lines has an empty member
/// list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub label: String,
    pub members: Vec<String>,
}

impl Record {
    /// Parse a chunk into a label and member list.
    pub fn parse(chunk: &str) -> Self {
        let mut lines = chunk.lines().map(str::trim).filter(|line| !line.is_empty());

        let label = lines
            .next()
            .map(|first| first.strip_suffix(':').unwrap_or(first).to_string())
            .unwrap_or_default();

        let members = lines.map(str::to_string).collect();

        Self { label, members }
    }
}

/// One question/answer pair kept in the bounded session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub question: String,
    pub answer: String,
}
