//! # Pitchside
//!
//! A retrieval-backed question answering assistant for small fixed
//! knowledge bases.
//!
//! Pitchside loads a plain-text corpus of blank-line-separated records
//! (team rosters in the reference data), embeds each record with a
//! sentence-encoding model, and answers free-form questions by nearest
//! neighbor lookup with a distance threshold deciding between a formatted
//! answer and a fixed "no information" fallback.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────┐   ┌──────────────┐   ┌───────────┐
//! │ Corpus  │──▶│ Chunk+Embed  │──▶│ FlatIndex │
//! │ (text)  │   │  (load once) │   │ (L2, k-NN)│
//! └─────────┘   └──────────────┘   └─────┬─────┘
//!                                        │
//!                      ┌─────────────────┤
//!                      ▼                 ▼
//!                 ┌─────────┐      ┌──────────┐
//!                 │   CLI   │      │ Webhook  │
//!                 │ (pitch) │      │  (HTTP)  │
//!                 └─────────┘      └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! pitch corpus                        # inspect the knowledge file
//! pitch ask "who is prasad"           # one-shot answer
//! pitch chat                          # interactive loop (type exit to quit)
//! pitch serve webhook                 # messaging webhook endpoint
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`chunk`] | Blank-line corpus chunking |
//! | [`models`] | Core data types |
//! | [`embedding`] | Embedding provider abstraction |
//! | [`index`] | Flat squared-L2 vector index |
//! | [`retrieve`] | Load/query orchestration and threshold policy |
//! | [`format`] | Answer formatting |
//! | [`history`] | Bounded session history |
//! | [`send`] | Outbound message transports |
//! | [`server`] | Messaging webhook HTTP server |

pub mod chat;
pub mod chunk;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod format;
pub mod history;
pub mod index;
pub mod models;
pub mod retrieve;
pub mod send;
pub mod server;
