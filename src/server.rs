//! Messaging-webhook HTTP server.
//!
//! Fields incoming chat messages from a messaging provider's webhook and
//! replies with retrieval answers. The retrieval context is shared
//! read-only across requests (it is immutable after load); the session
//! history is the one mutable piece, so it sits behind a mutex here,
//! while the CLI chat loop keeps it thread-confined.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/webhook` | Subscription verification handshake |
//! | `POST` | `/webhook` | Message intake |
//! | `GET`  | `/health` | Health check (version, chunk count, model) |
//!
//! # Verification
//!
//! The `GET /webhook` handshake follows the Meta convention: it echoes
//! `hub.challenge` back only when `hub.mode` is `subscribe` and
//! `hub.verify_token` matches `[server] verify_token`. While no token is
//! configured, verification always fails.
//!
//! # Payload authentication
//!
//! When the `PITCHSIDE_APP_SECRET` environment variable is set, every
//! `POST /webhook` body must carry a valid `X-Hub-Signature-256` header
//! (HMAC-SHA256 of the raw body, hex, `sha256=` prefix). Unset, bodies
//! are accepted as-is.
//!
//! Malformed or non-message payloads (delivery receipts, status updates)
//! are acknowledged with `{"status":"ignored"}` — they are routine, not
//! errors. No per-message failure ends the serving loop.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::history::History;
use crate::retrieve::{Retriever, FALLBACK_ANSWER};
use crate::send::{create_sender, MessageSender};

/// Static reply for bare greetings; everything else goes to retrieval.
const GREETING: &str = "Hello 👋 I answer questions about the teams in my knowledge base.\n\n\
Try:\n• a player name\n• a team name";

type HmacSha256 = Hmac<Sha256>;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    retriever: Arc<Retriever>,
    history: Arc<Mutex<History>>,
    sender: Arc<dyn MessageSender>,
    verify_token: Option<String>,
    app_secret: Option<String>,
}

/// Start the webhook server.
///
/// Loads and indexes the corpus, then binds to `[server] bind` and serves
/// until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let retriever = Retriever::load(config).await?;
    println!(
        "Loaded {} chunks from {} (model: {})",
        retriever.chunk_count(),
        config.corpus.path.display(),
        retriever.model_name()
    );

    let sender: Arc<dyn MessageSender> = Arc::from(create_sender(&config.server)?);
    let sender_name = sender.name().to_string();

    let state = AppState {
        retriever: Arc::new(retriever),
        history: Arc::new(Mutex::new(History::new(config.history.capacity))),
        sender,
        verify_token: config.server.verify_token.clone(),
        app_secret: std::env::var("PITCHSIDE_APP_SECRET").ok(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/webhook", get(handle_verify).post(handle_message))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    let bind_addr = &config.server.bind;
    println!(
        "Webhook server listening on http://{} (sender: {})",
        bind_addr, sender_name
    );

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `GET /webhook` — subscription verification handshake.
async fn handle_verify(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    let mode = params.get("hub.mode").map(String::as_str);
    let token = params.get("hub.verify_token");
    let challenge = params.get("hub.challenge").cloned().unwrap_or_default();

    match (&state.verify_token, mode) {
        (Some(expected), Some("subscribe")) if token == Some(expected) => {
            (StatusCode::OK, challenge)
        }
        _ => (StatusCode::FORBIDDEN, "Verification failed".to_string()),
    }
}

/// `POST /webhook` — message intake.
async fn handle_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    if let Some(secret) = &state.app_secret {
        if !signature_valid(secret, &headers, &body) {
            return (
                StatusCode::FORBIDDEN,
                Json(serde_json::json!({"status": "bad signature"})),
            );
        }
    }

    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => {
            return (StatusCode::OK, Json(serde_json::json!({"status": "ignored"})));
        }
    };

    let (from, text) = match extract_message(&payload) {
        Some(pair) => pair,
        None => {
            return (StatusCode::OK, Json(serde_json::json!({"status": "ignored"})));
        }
    };

    let reply = match greeting_reply(&text) {
        Some(greeting) => greeting.to_string(),
        None => match state.retriever.answer(&text).await {
            Ok(answer) => answer,
            Err(err) => {
                eprintln!("query failed: {:#}", err);
                FALLBACK_ANSWER.to_string()
            }
        },
    };

    state.history.lock().unwrap().record(&text, &reply);

    if let Err(err) = state.sender.send(&from, &reply).await {
        eprintln!("send failed ({}): {:#}", state.sender.name(), err);
    }

    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /health`.
async fn handle_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "chunks": state.retriever.chunk_count(),
        "model": state.retriever.model_name(),
    }))
}

/// Pull the sender id and message text out of a Meta Cloud API envelope:
/// `entry[0].changes[0].value.messages[0]` with `from` and `text.body`.
fn extract_message(payload: &serde_json::Value) -> Option<(String, String)> {
    let message = payload.pointer("/entry/0/changes/0/value/messages/0")?;
    let from = message.get("from")?.as_str()?.to_string();
    let text = message.pointer("/text/body")?.as_str()?.to_string();
    Some((from, text))
}

fn greeting_reply(text: &str) -> Option<&'static str> {
    match text.trim().to_lowercase().as_str() {
        "hi" | "hello" | "hey" => Some(GREETING),
        _ => None,
    }
}

/// Check `X-Hub-Signature-256` (`sha256=<hex>`) against the HMAC-SHA256
/// of the raw body.
fn signature_valid(secret: &str, headers: &HeaderMap, body: &[u8]) -> bool {
    let header = match headers
        .get("x-hub-signature-256")
        .and_then(|value| value.to_str().ok())
    {
        Some(header) => header,
        None => return false,
    };

    let hex_sig = match header.strip_prefix("sha256=") {
        Some(sig) => sig,
        None => return false,
    };

    let expected = match hex::decode(hex_sig) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}
