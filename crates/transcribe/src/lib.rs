#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Chat-completions front end for speech-to-text backends
//!
//! A chat message naming an audio URL is answered with the transcript of
//! that audio, wrapped as an assistant message.

mod chat;
mod envelope;
mod error;
mod fetch;
mod filename;
mod forward;
mod html;
mod http_client;
mod server;
mod types;
mod upload;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{any, get},
};

pub use chat::extract_audio_url;
pub use envelope::{AssistantMessage, ChatCompletionResponse, Choice};
pub use error::{Error, Result};
pub use fetch::Fetcher;
pub use filename::{InvalidExtension, derive_filename};
pub use forward::{BackendReply, TranscriptionBackend, WhisperBackend};
pub use server::Server;
pub use types::{ChatCompletionRequest, ChatMessage, TranscriptionResult};

/// Build the shared transcription state from configuration
///
/// # Errors
///
/// Returns an error if a required transcription option is missing or a
/// timeout does not parse
pub fn build_server(config: &scribe_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = server::ServerBuilder::new(&config.transcription)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize transcription server: {e}"))?;

    Ok(Arc::new(server))
}

/// Routes of the chat-completions API
///
/// Every method is accepted so that non-POST requests still receive an
/// envelope.
pub fn api_router() -> Router<Arc<Server>> {
    Router::new().route("/v1/chat/completions", any(chat::chat_completions))
}

/// Routes of the browser upload UI
///
/// The upload handler enforces the audio size ceiling itself.
pub fn ui_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/", get(upload::upload_form))
        .route("/transcribe/upload", any(upload::upload))
        .layer(DefaultBodyLimit::disable())
}
