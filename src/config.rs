use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    /// Plain-text knowledge file: records separated by blank lines, first
    /// line of each record a label, following lines member entries.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    /// Maximum acceptable squared-L2 distance for a match. The nearest
    /// neighbor is rejected only when its distance is strictly greater
    /// than this value. The number lives in the active embedding model's
    /// native distance scale — switching providers or models means
    /// recalibrating it.
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            distance_threshold: default_distance_threshold(),
        }
    }
}

fn default_distance_threshold() -> f32 {
    1.2
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    /// `local`, `openai`, `ollama`, or `hashed`.
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub dims: Option<usize>,
    /// Base URL for the Ollama provider.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            dims: None,
            url: None,
            batch_size: default_batch_size(),
            max_retries: default_max_retries(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}
fn default_batch_size() -> usize {
    64
}
fn default_max_retries() -> u32 {
    5
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    /// Number of question/answer pairs retained per session.
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

fn default_history_capacity() -> usize {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Outbound transport for webhook replies: `console` or `meta`.
    #[serde(default = "default_sender")]
    pub sender: String,
    /// Token the webhook subscription handshake must present. Verification
    /// always fails while this is unset.
    #[serde(default)]
    pub verify_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            sender: default_sender(),
            verify_token: None,
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7331".to_string()
}
fn default_sender() -> String {
    "console".to_string()
}

impl Config {
    /// All-defaults config for runs where the corpus path comes from the
    /// command line instead of a config file.
    pub fn minimal() -> Self {
        Self {
            corpus: CorpusConfig {
                path: PathBuf::from("./knowledge.txt"),
            },
            retrieval: RetrievalConfig::default(),
            embedding: EmbeddingConfig::default(),
            history: HistoryConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate retrieval
    if !config.retrieval.distance_threshold.is_finite() || config.retrieval.distance_threshold <= 0.0
    {
        anyhow::bail!("retrieval.distance_threshold must be a finite number > 0");
    }

    // Validate history
    if config.history.capacity == 0 {
        anyhow::bail!("history.capacity must be >= 1");
    }

    // Validate embedding
    match config.embedding.provider.as_str() {
        "local" | "hashed" => {}
        "openai" | "ollama" => {
            if config.embedding.model.is_none() {
                anyhow::bail!(
                    "embedding.model must be specified when provider is '{}'",
                    config.embedding.provider
                );
            }
            if config.embedding.dims.is_none() || config.embedding.dims == Some(0) {
                anyhow::bail!(
                    "embedding.dims must be > 0 when provider is '{}'",
                    config.embedding.provider
                );
            }
        }
        other => anyhow::bail!(
            "Unknown embedding provider: '{}'. Must be local, openai, ollama, or hashed.",
            other
        ),
    }

    // Validate server
    match config.server.sender.as_str() {
        "console" | "meta" => {}
        other => anyhow::bail!("Unknown sender: '{}'. Must be console or meta.", other),
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_minimal_config_gets_defaults() {
        let file = write_config("[corpus]\npath = \"./knowledge.txt\"\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.retrieval.distance_threshold, 1.2);
        assert_eq!(config.history.capacity, 5);
        assert_eq!(config.embedding.provider, "local");
        assert_eq!(config.server.sender, "console");
        assert!(config.server.verify_token.is_none());
    }

    #[test]
    fn test_overrides_applied() {
        let file = write_config(
            r#"
[corpus]
path = "./teams.txt"

[retrieval]
distance_threshold = 0.8

[embedding]
provider = "hashed"
dims = 64

[history]
capacity = 10
"#,
        );
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.retrieval.distance_threshold, 0.8);
        assert_eq!(config.embedding.provider, "hashed");
        assert_eq!(config.embedding.dims, Some(64));
        assert_eq!(config.history.capacity, 10);
    }

    #[test]
    fn test_rejects_nonpositive_threshold() {
        let file = write_config(
            "[corpus]\npath = \"k.txt\"\n\n[retrieval]\ndistance_threshold = 0.0\n",
        );
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let file = write_config("[corpus]\npath = \"k.txt\"\n\n[history]\ncapacity = 0\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_rejects_unknown_provider() {
        let file = write_config("[corpus]\npath = \"k.txt\"\n\n[embedding]\nprovider = \"faiss\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_remote_provider_requires_model_and_dims() {
        let file = write_config("[corpus]\npath = \"k.txt\"\n\n[embedding]\nprovider = \"openai\"\n");
        assert!(load_config(file.path()).is_err());

        let file = write_config(
            "[corpus]\npath = \"k.txt\"\n\n[embedding]\nprovider = \"openai\"\nmodel = \"text-embedding-3-small\"\ndims = 1536\n",
        );
        assert!(load_config(file.path()).is_ok());
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(load_config(Path::new("/nonexistent/pitchside.toml")).is_err());
    }
}
