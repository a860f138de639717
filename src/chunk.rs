//! Blank-line corpus chunker.
//!
//! Splits knowledge-base text into retrievable chunks on blank-line
//! boundaries (`\n\n`). Each chunk is trimmed; empty or whitespace-only
//! blocks are discarded. Chunks are never re-split or merged afterwards.
//!
//! Identical input always yields the identical chunk sequence in the same
//! order. The vector index addresses chunks by position, so ordering here
//! is load-bearing: position `i` in the output is position `i` in the
//! index built over it.

/// Split corpus text into trimmed, non-empty chunks.
///
/// A chunk is a maximal block of text between blank-line boundaries
/// (two or more consecutive newlines). Single newlines inside a block
/// are preserved — they separate the record's lines, not records.
pub fn split_chunks(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_blank_lines() {
        let chunks = split_chunks("West:\nPrasad\nSuresh\n\nEast:\nRavi");
        assert_eq!(chunks, vec!["West:\nPrasad\nSuresh", "East:\nRavi"]);
    }

    #[test]
    fn test_single_block() {
        let chunks = split_chunks("West:\nPrasad");
        assert_eq!(chunks, vec!["West:\nPrasad"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_chunks("").is_empty());
    }

    #[test]
    fn test_whitespace_only_input() {
        assert!(split_chunks("   \n\n \t \n\n").is_empty());
    }

    #[test]
    fn test_whitespace_only_blocks_discarded() {
        let chunks = split_chunks("Alpha\n\n   \n\nBeta");
        assert_eq!(chunks, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_extra_blank_lines_between_blocks() {
        let chunks = split_chunks("Alpha\n\n\n\n\nBeta");
        assert_eq!(chunks, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_blocks_are_trimmed() {
        let chunks = split_chunks("  Alpha  \n\n\tBeta\n");
        assert_eq!(chunks, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_inner_newlines_preserved() {
        let chunks = split_chunks("West:\nPrasad\nSuresh");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].lines().count(), 3);
    }

    #[test]
    fn test_deterministic() {
        let text = "A\nB\n\nC\n\nD\nE\nF";
        assert_eq!(split_chunks(text), split_chunks(text));
    }

    #[test]
    fn test_count_matches_blocks() {
        let text = "one\n\ntwo\n\n \n\nthree\n\nfour";
        assert_eq!(split_chunks(text).len(), 4);
    }
}
