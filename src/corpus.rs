use anyhow::{Context, Result};

use crate::chunk::split_chunks;
use crate::config::Config;
use crate::models::Record;

/// Print the chunk count and a per-record summary of the corpus.
pub fn run_corpus(config: &Config) -> Result<()> {
    let path = &config.corpus.path;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;
    let chunks = split_chunks(&text);

    println!("Total chunks: {}", chunks.len());
    println!("{:<6} {:<24} MEMBERS", "POS", "LABEL");
    for (position, chunk) in chunks.iter().enumerate() {
        let record = Record::parse(chunk);
        println!("{:<6} {:<24} {}", position, record.label, record.members.len());
    }

    Ok(())
}
