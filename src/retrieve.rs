//! Retrieval engine: load-time indexing and per-query answering.
//!
//! A [`Retriever`] is built once per process (or per tenant) and owns
//! everything the query path needs — the chunk sequence, the vector index
//! over it, and the embedding provider. Two phases:
//!
//! 1. **Load** — read the corpus, split it into chunks, embed every chunk,
//!    build the flat index. Any failure here (missing file, zero chunks,
//!    provider initialization) is fatal: the system cannot serve queries.
//! 2. **Query** — embed the query, find the single nearest chunk, and
//!    either format it into an answer or return the fallback when the
//!    nearest distance exceeds the configured threshold.
//!
//! The threshold is compared against squared L2 distance in the active
//! embedding model's native scale (see `[retrieval] distance_threshold`);
//! a model change silently shifts that scale, so the threshold must be
//! recalibrated with it.

use anyhow::{bail, Context, Result};
use std::fs;

use crate::chunk::split_chunks;
use crate::config::{Config, EmbeddingConfig};
use crate::embedding::{self, EmbeddingProvider};
use crate::format::format_answer;
use crate::index::FlatIndex;

/// Answer returned when no chunk is close enough to the query, or when
/// the query is empty.
pub const FALLBACK_ANSWER: &str = "Sorry, I don't have information related to your question.";

/// Retrieval context: corpus chunks, their vector index, and the
/// embedding provider, immutable after load.
pub struct Retriever {
    chunks: Vec<String>,
    index: FlatIndex,
    provider: Box<dyn EmbeddingProvider>,
    embedding: EmbeddingConfig,
    threshold: f32,
}

impl Retriever {
    /// Load phase: read the corpus file named in config and index it.
    pub async fn load(config: &Config) -> Result<Self> {
        let path = &config.corpus.path;
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;
        Self::from_text(config, &text).await
    }

    /// Load phase over in-memory corpus text.
    pub async fn from_text(config: &Config, text: &str) -> Result<Self> {
        let chunks = split_chunks(text);
        if chunks.is_empty() {
            bail!("corpus contains no chunks (records are separated by blank lines)");
        }

        let provider = embedding::create_provider(&config.embedding)?;
        let vectors = embedding::embed_texts(provider.as_ref(), &config.embedding, &chunks)
            .await
            .context("corpus embedding failed")?;
        let index = FlatIndex::build(vectors)?;

        Ok(Self {
            chunks,
            index,
            provider,
            embedding: config.embedding.clone(),
            threshold: config.retrieval.distance_threshold,
        })
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Query phase: answer a single query.
    ///
    /// Empty and whitespace-only queries short-circuit to the fallback
    /// without touching the embedder. The nearest chunk is rejected only
    /// when its distance is strictly greater than the threshold, so a
    /// match at exactly the threshold still answers.
    ///
    /// Embedding failures propagate as errors; serving loops map them to
    /// the fallback answer rather than crashing.
    pub async fn answer(&self, query: &str) -> Result<String> {
        if query.trim().is_empty() {
            return Ok(FALLBACK_ANSWER.to_string());
        }

        let query_vec =
            embedding::embed_query(self.provider.as_ref(), &self.embedding, query).await?;
        let neighbors = self.index.search(&query_vec, 1)?;

        let best = match neighbors.first() {
            Some(neighbor) => neighbor,
            None => return Ok(FALLBACK_ANSWER.to_string()),
        };

        if best.distance > self.threshold {
            return Ok(FALLBACK_ANSWER.to_string());
        }

        Ok(format_answer(&self.chunks[best.position], query))
    }
}
