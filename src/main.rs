//! # Pitchside CLI (`pitch`)
//!
//! The `pitch` binary answers questions over a plain-text knowledge file.
//!
//! ## Usage
//!
//! ```bash
//! pitch --config ./pitchside.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pitch ask "<query>"` | Answer a single question and exit |
//! | `pitch chat` | Interactive question loop (type `exit` to quit) |
//! | `pitch corpus` | Show chunk count and record labels |
//! | `pitch serve webhook` | Start the messaging webhook HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # One-shot question against the configured corpus
//! pitch ask "which team does prasad play for"
//!
//! # Ad-hoc corpus without a config file
//! pitch ask "who is ravi" --corpus ./teams.txt
//!
//! # Interactive loop
//! pitch chat
//!
//! # Webhook endpoint for a messaging provider
//! pitch serve webhook --config ./pitchside.toml
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pitchside::{chat, config, corpus, server};

/// Pitchside CLI — a retrieval-backed question answering assistant for
/// small fixed knowledge bases.
#[derive(Parser)]
#[command(
    name = "pitch",
    about = "Pitchside — retrieval-backed question answering over a plain-text knowledge base",
    version,
    long_about = "Pitchside chunks a plain-text knowledge file on blank lines, embeds each \
    chunk with a sentence-encoding model, and answers questions by nearest-neighbor lookup \
    with a distance threshold deciding between a formatted answer and a fixed fallback."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Commands that take `--corpus` fall back to built-in defaults when
    /// this file does not exist.
    #[arg(long, global = true, default_value = "./pitchside.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Answer a single question and exit.
    Ask {
        /// The question to answer.
        query: String,

        /// Knowledge file to use instead of the configured one.
        #[arg(long)]
        corpus: Option<PathBuf>,
    },

    /// Interactive question loop. Type `exit` (any case) to quit.
    Chat {
        /// Knowledge file to use instead of the configured one.
        #[arg(long)]
        corpus: Option<PathBuf>,
    },

    /// Show the corpus chunk count and per-record labels.
    Corpus {
        /// Knowledge file to use instead of the configured one.
        #[arg(long)]
        corpus: Option<PathBuf>,
    },

    /// Start an HTTP server.
    Serve {
        #[command(subcommand)]
        service: ServeService,
    },
}

/// Server subcommands.
#[derive(Subcommand)]
enum ServeService {
    /// Messaging webhook endpoint (subscription verification + message
    /// intake + health).
    Webhook,
}

fn corpus_override(command: &Commands) -> Option<&PathBuf> {
    match command {
        Commands::Ask { corpus, .. } | Commands::Chat { corpus } | Commands::Corpus { corpus } => {
            corpus.as_ref()
        }
        Commands::Serve { .. } => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = match config::load_config(&cli.config) {
        Ok(cfg) => cfg,
        // A --corpus override makes the config file optional.
        Err(_) if corpus_override(&cli.command).is_some() => config::Config::minimal(),
        Err(err) => return Err(err),
    };

    if let Some(path) = corpus_override(&cli.command) {
        cfg.corpus.path = path.clone();
    }

    match cli.command {
        Commands::Ask { query, .. } => {
            chat::run_ask(&cfg, &query).await?;
        }
        Commands::Chat { .. } => {
            chat::run_chat(&cfg).await?;
        }
        Commands::Corpus { .. } => {
            corpus::run_corpus(&cfg)?;
        }
        Commands::Serve { service } => match service {
            ServeService::Webhook => {
                server::run_server(&cfg).await?;
            }
        },
    }

    Ok(())
}
