//! Mock transcription backend for integration tests
//!
//! Implements `/v1/audio/transcriptions` and records every upload it sees

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// What the backend answers with
#[derive(Clone)]
enum Reply {
    Transcript(String),
    Raw(StatusCode, String),
}

/// One multipart upload as received by the backend
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub filename: Option<String>,
    pub model: Option<String>,
    pub audio_len: usize,
}

struct MockBackendState {
    reply: Reply,
    uploads: Mutex<Vec<Upload>>,
}

/// Mock backend returning a fixed reply
pub struct MockBackend {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockBackendState>,
}

impl MockBackend {
    /// Backend answering `{"text": <text>}`
    pub async fn transcript(text: &str) -> anyhow::Result<Self> {
        Self::start(Reply::Transcript(text.to_owned())).await
    }

    /// Backend answering a raw body with the given status
    pub async fn raw(status: StatusCode, body: &str) -> anyhow::Result<Self> {
        Self::start(Reply::Raw(status, body.to_owned())).await
    }

    async fn start(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockBackendState {
            reply,
            uploads: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_transcription))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the backend
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Uploads received so far
    pub fn uploads(&self) -> Vec<Upload> {
        self.state.uploads.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_transcription(State(state): State<Arc<MockBackendState>>, mut multipart: Multipart) -> Response {
    let mut upload = Upload::default();

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "file" => {
                upload.filename = field.file_name().map(str::to_owned);
                upload.audio_len = field.bytes().await.map(|b| b.len()).unwrap_or_default();
            }
            "model" => {
                upload.model = field.text().await.ok();
            }
            _ => {}
        }
    }

    state.uploads.lock().unwrap().push(upload);

    match &state.reply {
        Reply::Transcript(text) => Json(serde_json::json!({
            "text": text,
            "language": "en",
            "duration": 1.5
        }))
        .into_response(),
        Reply::Raw(status, body) => (*status, body.clone()).into_response(),
    }
}
