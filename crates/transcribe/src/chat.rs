use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    response::{IntoResponse, Response},
};
use http::{Method, StatusCode};
use thiserror::Error;

use crate::{
    envelope::ChatCompletionResponse,
    error::Error,
    server::Server,
    types::{ChatCompletionRequest, TranscriptionResult},
};

/// Upper bound on a buffered chat request body (8 MiB)
const CHAT_BODY_LIMIT_BYTES: usize = 8 << 20;

/// Why a chat request did not yield a transcript
///
/// The display text becomes the assistant message.
#[derive(Debug, Error)]
pub(crate) enum ChatError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("No messages provided")]
    NoMessages,

    #[error("No audio URL found in message")]
    NoAudioUrl,

    #[error("Failed to download audio: {0}")]
    Download(#[source] Error),

    #[error("Transcription error: {0}")]
    Transcription(#[source] Error),

    #[error("Invalid transcription response: {0}")]
    InvalidResponse(#[source] serde_json::Error),
}

/// First whitespace-separated token with an `http://` or `https://` prefix
pub fn extract_audio_url(text: &str) -> Option<&str> {
    text.split_whitespace()
        .find(|token| token.starts_with("http://") || token.starts_with("https://"))
}

/// Handle `/v1/chat/completions`
///
/// Always answers 200 with a chat envelope, whether the pipeline produced a
/// transcript or an error.
pub(crate) async fn chat_completions(State(server): State<Arc<Server>>, method: Method, body: Body) -> Response {
    let content = match transcribe_chat(&server, &method, body).await {
        Ok(text) => {
            tracing::info!("responded with transcript ({} bytes)", text.len());
            text
        }
        Err(e) => {
            tracing::info!("responded with: {e}");
            tracing::debug!(error = ?e, "chat request failed");
            e.to_string()
        }
    };

    (StatusCode::OK, Json(ChatCompletionResponse::new(server.model(), content))).into_response()
}

async fn transcribe_chat(server: &Server, method: &Method, body: Body) -> Result<String, ChatError> {
    if method != Method::POST {
        return Err(ChatError::MethodNotAllowed);
    }

    let bytes = axum::body::to_bytes(body, CHAT_BODY_LIMIT_BYTES)
        .await
        .map_err(|e| ChatError::InvalidJson(e.to_string()))?;

    let request: ChatCompletionRequest =
        serde_json::from_slice(&bytes).map_err(|e| ChatError::InvalidJson(e.to_string()))?;

    let last = request.messages.last().ok_or(ChatError::NoMessages)?;
    let url = extract_audio_url(&last.content).ok_or(ChatError::NoAudioUrl)?;

    tracing::debug!(url, "new request for audio");

    let audio = server
        .fetcher
        .fetch(url, server.max_audio_size())
        .await
        .map_err(ChatError::Download)?;

    let reply = server
        .backend
        .forward(server.model(), url, audio)
        .await
        .map_err(ChatError::Transcription)?;

    let result: TranscriptionResult = serde_json::from_slice(&reply.body).map_err(ChatError::InvalidResponse)?;

    Ok(result.text)
}
