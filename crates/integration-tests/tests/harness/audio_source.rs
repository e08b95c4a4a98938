//! Mock audio host for integration tests

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

struct AudioSourceState {
    size: usize,
    hits: AtomicU32,
}

/// Serves `size` bytes of audio under `/files/` and `/chunked/`
///
/// Paths under `/chunked/` stream the body without a `Content-Length`.
pub struct AudioSource {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<AudioSourceState>,
}

impl AudioSource {
    pub async fn start(size: usize) -> anyhow::Result<Self> {
        let state = Arc::new(AudioSourceState {
            size,
            hits: AtomicU32::new(0),
        });

        let app = Router::new()
            .route("/chunked/{*path}", routing::get(chunked))
            .route("/files/{*path}", routing::get(whole))
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

    /// URL of a file served with a `Content-Length`
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/files/{path}", self.addr)
    }

    /// URL of a file streamed without a `Content-Length`
    pub fn chunked_url(&self, path: &str) -> String {
        format!("http://{}/chunked/{path}", self.addr)
    }

    /// Number of downloads served
    pub fn hits(&self) -> u32 {
        self.state.hits.load(Ordering::Relaxed)
    }
}

impl Drop for AudioSource {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn whole(State(state): State<Arc<AudioSourceState>>) -> Vec<u8> {
    state.hits.fetch_add(1, Ordering::Relaxed);
    vec![0x55; state.size]
}

async fn chunked(State(state): State<Arc<AudioSourceState>>) -> Body {
    state.hits.fetch_add(1, Ordering::Relaxed);
    let chunks: Vec<std::io::Result<Bytes>> = vec![0x55u8; state.size]
        .chunks(256)
        .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
        .collect();
    Body::from_stream(futures::stream::iter(chunks))
}
