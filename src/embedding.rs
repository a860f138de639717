//! Embedding provider abstraction and implementations.
//!
//! Defines the [`EmbeddingProvider`] trait and concrete implementations:
//! - **[`LocalProvider`]** — runs sentence-encoding models locally via
//!   fastembed; no network calls after the model download. Default.
//! - **[`OpenAIProvider`]** — calls the OpenAI embeddings API.
//! - **[`OllamaProvider`]** — calls a local Ollama instance's `/api/embed`
//!   endpoint.
//! - **[`HashedProvider`]** — deterministic offline bag-of-words vectors;
//!   useful for tests, CI, and development without a model download.
//!
//! All providers guarantee: same text in, same vector out (for a fixed
//! model version); one vector per input, in input order; a fixed output
//! dimension. The retrieval threshold is compared against squared L2
//! distance in whichever scale the active provider produces, so changing
//! providers or models means recalibrating `[retrieval] distance_threshold`.
//!
//! # Retry Strategy
//!
//! The remote providers share one retry discipline: HTTP 429 and 5xx
//! retry with exponential backoff (1s, 2s, 4s, …, capped at 32s), other
//! 4xx fail immediately, network errors retry.

use anyhow::{bail, Result};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use crate::config::EmbeddingConfig;

/// Trait for embedding providers.
///
/// Carries provider metadata; the actual embedding computation is performed
/// by [`embed_texts`] (kept as a free function due to async trait
/// limitations).
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the model identifier (e.g. `"all-minilm-l6-v2"`).
    fn model_name(&self) -> &str;
    /// Returns the embedding vector dimensionality (e.g. `384`).
    fn dims(&self) -> usize;
}

/// Embed a batch of texts using the configured provider.
///
/// Returns one vector per input text, in input order. Dispatches on the
/// config's `provider` field.
pub async fn embed_texts(
    _provider: &dyn EmbeddingProvider,
    config: &EmbeddingConfig,
    texts: &[String],
) -> Result<Vec<Vec<f32>>> {
    match config.provider.as_str() {
        "hashed" => Ok(embed_hashed(config, texts)),
        "openai" => embed_openai(config, texts).await,
        "ollama" => embed_ollama(config, texts).await,
        #[cfg(feature = "local-embeddings")]
        "local" => embed_local_fastembed(config, texts).await,
        #[cfg(not(feature = "local-embeddings"))]
        "local" => bail!("Local embedding provider requires --features local-embeddings"),
        other => bail!("Unknown embedding provider: {}", other),
    }
}

/// Embed a single query text.
///
/// Convenience wrapper around [`embed_texts`] for the per-query path.
pub async fn embed_query(
    provider: &dyn EmbeddingProvider,
    config: &EmbeddingConfig,
    text: &str,
) -> Result<Vec<f32>> {
    let results = embed_texts(provider, config, &[text.to_string()]).await?;
    results
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Empty embedding response"))
}

// ============ Hashed Provider ============

/// Default dimensionality for hashed bag-of-words vectors.
const HASHED_DIMS: usize = 256;

/// Deterministic offline provider: hashed bag-of-words vectors.
///
/// Each lowercased alphanumeric token hashes to one slot of the output
/// vector; the vector is then L2-normalized, so squared distances between
/// non-zero vectors fall in `[0.0, 2.0]` and texts sharing no tokens sit
/// at exactly `2.0`. Not a semantic model — retrieval quality is
/// word-overlap only. Intended for tests and development.
pub struct HashedProvider {
    dims: usize,
}

impl HashedProvider {
    pub fn new(config: &EmbeddingConfig) -> Self {
        Self {
            dims: config.dims.unwrap_or(HASHED_DIMS),
        }
    }
}

impl EmbeddingProvider for HashedProvider {
    fn model_name(&self) -> &str {
        "hashed-bow"
    }
    fn dims(&self) -> usize {
        self.dims
    }
}

fn embed_hashed(config: &EmbeddingConfig, texts: &[String]) -> Vec<Vec<f32>> {
    let dims = config.dims.unwrap_or(HASHED_DIMS);
    texts.iter().map(|text| hashed_vector(text, dims)).collect()
}

fn hashed_vector(text: &str, dims: usize) -> Vec<f32> {
    let mut vector = vec![0.0f32; dims];

    let lower = text.to_lowercase();
    for token in lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        // DefaultHasher::new() uses fixed keys, so slots are stable
        // across runs and processes.
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        let slot = (hasher.finish() % dims as u64) as usize;
        vector[slot] += 1.0;
    }

    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in &mut vector {
            *v /= norm;
        }
    }

    vector
}

// ============ OpenAI Provider ============

/// Embedding provider using the OpenAI API.
///
/// Calls `POST /v1/embeddings` with the configured model. Requires the
/// `OPENAI_API_KEY` environment variable to be set.
pub struct OpenAIProvider {
    model: String,
    dims: usize,
}

impl OpenAIProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let model = config
            .model
            .clone()
            .ok_or_else(|| anyhow::anyhow!("embedding.model required for OpenAI provider"))?;
        let dims = config
            .dims
            .ok_or_else(|| anyhow::anyhow!("embedding.dims required for OpenAI provider"))?;

        if std::env::var("OPENAI_API_KEY").is_err() {
            bail!("OPENAI_API_KEY environment variable not set");
        }

        Ok(Self { model, dims })
    }
}

impl EmbeddingProvider for OpenAIProvider {
    fn model_name(&self) -> &str {
        &self.model
    }
    fn dims(&self) -> usize {
        self.dims
    }
}

async fn embed_openai(config: &EmbeddingConfig, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    let api_key =
        std::env::var("OPENAI_API_KEY").map_err(|_| anyhow::anyhow!("OPENAI_API_KEY not set"))?;

    let model = config
        .model
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("embedding.model required"))?;

    let body = serde_json::json!({
        "model": model,
        "input": texts,
    });

    let json = post_json_with_retry(
        config,
        "https://api.openai.com/v1/embeddings",
        Some(api_key.as_str()),
        &body,
        "OpenAI",
    )
    .await?;

    let data = json
        .get("data")
        .and_then(|d| d.as_array())
        .ok_or_else(|| anyhow::anyhow!("Invalid OpenAI response: missing data array"))?;

    let mut embeddings = Vec::with_capacity(data.len());
    for item in data {
        let embedding = item
            .get("embedding")
            .and_then(|e| e.as_array())
            .ok_or_else(|| anyhow::anyhow!("Invalid OpenAI response: missing embedding"))?;
        embeddings.push(json_floats(embedding));
    }

    Ok(embeddings)
}

// ============ Ollama Provider ============

/// Embedding provider using a local Ollama instance.
///
/// Calls `POST /api/embed` on the configured URL (default
/// `http://localhost:11434`). Requires an embedding model to be pulled
/// (e.g. `ollama pull nomic-embed-text`).
pub struct OllamaProvider {
    model: String,
    dims: usize,
}

impl OllamaProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let model = config
            .model
            .clone()
            .ok_or_else(|| anyhow::anyhow!("embedding.model required for Ollama provider"))?;
        let dims = config
            .dims
            .ok_or_else(|| anyhow::anyhow!("embedding.dims required for Ollama provider"))?;

        Ok(Self { model, dims })
    }
}

impl EmbeddingProvider for OllamaProvider {
    fn model_name(&self) -> &str {
        &self.model
    }
    fn dims(&self) -> usize {
        self.dims
    }
}

async fn embed_ollama(config: &EmbeddingConfig, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    let model = config
        .model
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("embedding.model required"))?;

    let url = config.url.as_deref().unwrap_or("http://localhost:11434");

    let body = serde_json::json!({
        "model": model,
        "input": texts,
    });

    let json = post_json_with_retry(
        config,
        &format!("{}/api/embed", url),
        None,
        &body,
        "Ollama",
    )
    .await?;

    let embeddings = json
        .get("embeddings")
        .and_then(|e| e.as_array())
        .ok_or_else(|| anyhow::anyhow!("Invalid Ollama response: missing embeddings array"))?;

    let mut result = Vec::with_capacity(embeddings.len());
    for embedding in embeddings {
        let values = embedding
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("Invalid Ollama response: embedding is not an array"))?;
        result.push(json_floats(values));
    }

    Ok(result)
}

/// POST a JSON body and return the parsed JSON response, retrying on
/// 429/5xx and network errors with exponential backoff; other 4xx fail
/// immediately.
async fn post_json_with_retry(
    config: &EmbeddingConfig,
    url: &str,
    bearer: Option<&str>,
    body: &serde_json::Value,
    what: &str,
) -> Result<serde_json::Value> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let mut last_err = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            let delay = Duration::from_secs(1 << (attempt - 1).min(5));
            tokio::time::sleep(delay).await;
        }

        let mut request = client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body);
        if let Some(token) = bearer {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    return Ok(response.json().await?);
                }

                if status.as_u16() == 429 || status.is_server_error() {
                    let body_text = response.text().await.unwrap_or_default();
                    last_err = Some(anyhow::anyhow!("{} API error {}: {}", what, status, body_text));
                    continue;
                }

                let body_text = response.text().await.unwrap_or_default();
                bail!("{} API error {}: {}", what, status, body_text);
            }
            Err(e) => {
                last_err = Some(anyhow::anyhow!("{} connection error ({}): {}", what, url, e));
                continue;
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("{} embedding failed after retries", what)))
}

fn json_floats(values: &[serde_json::Value]) -> Vec<f32> {
    values
        .iter()
        .map(|v| v.as_f64().unwrap_or(0.0) as f32)
        .collect()
}

// ============ Local Provider (fastembed) ============

/// Embedding provider for local inference via fastembed.
///
/// Models are downloaded on first use from Hugging Face and cached; after
/// that, embeddings run entirely offline. ORT is bundled, so there are no
/// system dependencies.
#[cfg(feature = "local-embeddings")]
pub struct LocalProvider {
    model_name: String,
    dims: usize,
}

#[cfg(feature = "local-embeddings")]
impl LocalProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let (model_name, dims) = resolve_local_model(config);
        // Fail at construction on unknown model names, not mid-query.
        config_to_fastembed_model(&model_name)?;
        Ok(Self { model_name, dims })
    }
}

#[cfg(feature = "local-embeddings")]
impl EmbeddingProvider for LocalProvider {
    fn model_name(&self) -> &str {
        &self.model_name
    }
    fn dims(&self) -> usize {
        self.dims
    }
}

#[cfg(feature = "local-embeddings")]
fn resolve_local_model(config: &EmbeddingConfig) -> (String, usize) {
    let model_name = config
        .model
        .clone()
        .unwrap_or_else(|| "all-minilm-l6-v2".to_string());

    let dims = config.dims.unwrap_or(match model_name.as_str() {
        "all-minilm-l6-v2" => 384,
        "bge-small-en-v1.5" => 384,
        "bge-base-en-v1.5" => 768,
        "bge-large-en-v1.5" => 1024,
        "nomic-embed-text-v1" | "nomic-embed-text-v1.5" => 768,
        "multilingual-e5-small" => 384,
        "multilingual-e5-base" => 768,
        "multilingual-e5-large" => 1024,
        _ => 384,
    });

    (model_name, dims)
}

#[cfg(feature = "local-embeddings")]
fn config_to_fastembed_model(name: &str) -> Result<fastembed::EmbeddingModel> {
    match name {
        "all-minilm-l6-v2" => Ok(fastembed::EmbeddingModel::AllMiniLML6V2),
        "bge-small-en-v1.5" => Ok(fastembed::EmbeddingModel::BGESmallENV15),
        "bge-base-en-v1.5" => Ok(fastembed::EmbeddingModel::BGEBaseENV15),
        "bge-large-en-v1.5" => Ok(fastembed::EmbeddingModel::BGELargeENV15),
        "nomic-embed-text-v1" => Ok(fastembed::EmbeddingModel::NomicEmbedTextV1),
        "nomic-embed-text-v1.5" => Ok(fastembed::EmbeddingModel::NomicEmbedTextV15),
        "multilingual-e5-small" => Ok(fastembed::EmbeddingModel::MultilingualE5Small),
        "multilingual-e5-base" => Ok(fastembed::EmbeddingModel::MultilingualE5Base),
        "multilingual-e5-large" => Ok(fastembed::EmbeddingModel::MultilingualE5Large),
        other => bail!(
            "Unknown local embedding model: '{}'. Supported models: \
             all-minilm-l6-v2, bge-small-en-v1.5, bge-base-en-v1.5, bge-large-en-v1.5, \
             nomic-embed-text-v1, nomic-embed-text-v1.5, \
             multilingual-e5-small, multilingual-e5-base, multilingual-e5-large",
            other
        ),
    }
}

#[cfg(feature = "local-embeddings")]
async fn embed_local_fastembed(config: &EmbeddingConfig, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    let (model_name, _) = resolve_local_model(config);
    let fastembed_model = config_to_fastembed_model(&model_name)?;
    let batch_size = config.batch_size;
    let texts = texts.to_vec();

    tokio::task::spawn_blocking(move || {
        let mut model = fastembed::TextEmbedding::try_new(
            fastembed::InitOptions::new(fastembed_model).with_show_download_progress(true),
        )
        .map_err(|e| anyhow::anyhow!("Failed to initialize local embedding model: {}", e))?;

        let embeddings = model
            .embed(texts, Some(batch_size))
            .map_err(|e| anyhow::anyhow!("Local embedding failed: {}", e))?;

        Ok(embeddings)
    })
    .await?
}

/// Create the appropriate [`EmbeddingProvider`] based on configuration.
///
/// | Config Value | Provider |
/// |-------------|----------|
/// | `"local"` | [`LocalProvider`] (fastembed, default) |
/// | `"openai"` | [`OpenAIProvider`] |
/// | `"ollama"` | [`OllamaProvider`] |
/// | `"hashed"` | [`HashedProvider`] |
pub fn create_provider(config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "hashed" => Ok(Box::new(HashedProvider::new(config))),
        "openai" => Ok(Box::new(OpenAIProvider::new(config)?)),
        "ollama" => Ok(Box::new(OllamaProvider::new(config)?)),
        #[cfg(feature = "local-embeddings")]
        "local" => Ok(Box::new(LocalProvider::new(config)?)),
        #[cfg(not(feature = "local-embeddings"))]
        "local" => bail!("Local embedding provider requires --features local-embeddings"),
        other => bail!("Unknown embedding provider: {}", other),
    }
}

/// Compute the squared Euclidean (L2) distance between two vectors.
///
/// `0.0` means identical. For L2-normalized vectors the value falls in
/// `[0.0, 4.0]`, with orthogonal vectors at `2.0`. Returns `f32::INFINITY`
/// for vectors of different lengths so a mismatch can never rank as a
/// match.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::INFINITY;
    }

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashed_config(dims: usize) -> EmbeddingConfig {
        EmbeddingConfig {
            provider: "hashed".to_string(),
            dims: Some(dims),
            ..EmbeddingConfig::default()
        }
    }

    #[test]
    fn test_squared_l2_identical() {
        let v = vec![1.0, 2.0, 3.0];
        assert_eq!(squared_l2(&v, &v), 0.0);
    }

    #[test]
    fn test_squared_l2_known_value() {
        let a = vec![0.0, 0.0];
        let b = vec![3.0, 4.0];
        assert!((squared_l2(&a, &b) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_squared_l2_length_mismatch_is_infinite() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0];
        assert_eq!(squared_l2(&a, &b), f32::INFINITY);
    }

    #[test]
    fn test_hashed_deterministic() {
        let a = hashed_vector("Prasad plays for the west team", 64);
        let b = hashed_vector("Prasad plays for the west team", 64);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hashed_dims_honored() {
        assert_eq!(hashed_vector("anything", 32).len(), 32);
        assert_eq!(hashed_vector("anything", 512).len(), 512);
    }

    #[test]
    fn test_hashed_is_unit_length() {
        let v = hashed_vector("west prasad suresh", 128);
        let norm: f32 = v.iter().map(|x| x * x).sum();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hashed_empty_text_is_zero_vector() {
        let v = hashed_vector("", 64);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_hashed_case_insensitive_tokens() {
        assert_eq!(hashed_vector("RAVI", 64), hashed_vector("ravi", 64));
    }

    #[test]
    fn test_hashed_disjoint_texts_at_distance_two() {
        // Wide vectors keep the disjoint token sets collision-free.
        let a = hashed_vector("badminton schedule", 65536);
        let b = hashed_vector("east ravi", 65536);
        assert!((squared_l2(&a, &b) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_hashed_overlapping_texts_closer_than_disjoint() {
        let query = hashed_vector("ravi", 256);
        let east = hashed_vector("east ravi", 256);
        let west = hashed_vector("west prasad suresh", 256);
        assert!(squared_l2(&query, &east) < squared_l2(&query, &west));
    }

    #[tokio::test]
    async fn test_embed_texts_hashed_preserves_order_and_count() {
        let config = hashed_config(65536);
        let provider = create_provider(&config).unwrap();
        let texts = vec!["alpha".to_string(), "beta".to_string(), "alpha".to_string()];

        let vectors = embed_texts(provider.as_ref(), &config, &texts).await.unwrap();

        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors[0], vectors[2]);
        assert_ne!(vectors[0], vectors[1]);
    }

    #[tokio::test]
    async fn test_embed_query_matches_batch() {
        let config = hashed_config(64);
        let provider = create_provider(&config).unwrap();

        let single = embed_query(provider.as_ref(), &config, "ravi").await.unwrap();
        let batch = embed_texts(provider.as_ref(), &config, &["ravi".to_string()])
            .await
            .unwrap();

        assert_eq!(single, batch[0]);
    }

    #[test]
    fn test_create_provider_hashed_metadata() {
        let config = hashed_config(128);
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.model_name(), "hashed-bow");
        assert_eq!(provider.dims(), 128);
    }

    #[test]
    fn test_create_provider_unknown_fails() {
        let config = EmbeddingConfig {
            provider: "faiss".to_string(),
            ..EmbeddingConfig::default()
        };
        assert!(create_provider(&config).is_err());
    }
}
