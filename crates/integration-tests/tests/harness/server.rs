//! Test server wrapper that starts scribe on random ports

use std::net::SocketAddr;

use axum::Router;
use scribe_config::Config;
use scribe_server::Server;
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    api: SocketAddr,
    ui: Option<SocketAddr>,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Binds every listener to port 0 for automatic port assignment
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let (api_router, ui_router) = Server::new(&config)?.into_routers();
        let shutdown = CancellationToken::new();

        let api = spawn(api_router, shutdown.clone()).await?;
        let ui = match ui_router {
            Some(router) => Some(spawn(router, shutdown.clone()).await?),
            None => None,
        };

        Ok(Self {
            api,
            ui,
            shutdown,
            client: reqwest::Client::new(),
        })
    }

    /// URL on the API listener
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.api)
    }

    /// URL on the UI listener
    pub fn ui_url(&self, path: &str) -> String {
        format!("http://{}{path}", self.ui.expect("UI listener is enabled"))
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Send a chat-completion request whose last message is `content`
    pub async fn chat(&self, content: &str) -> reqwest::Response {
        let body = serde_json::json!({
            "model": "gpt-4o-mini",
            "messages": [
                { "role": "system", "content": "You are a transcription assistant." },
                { "role": "user", "content": content }
            ]
        });

        self.client
            .post(self.url("/v1/chat/completions"))
            .json(&body)
            .send()
            .await
            .expect("chat request")
    }
}

async fn spawn(router: Router, shutdown: CancellationToken) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
            })
            .await
            .ok();
    });

    Ok(addr)
}

/// Assistant message content of a chat envelope
pub fn content(envelope: &serde_json::Value) -> &str {
    envelope["choices"][0]["message"]["content"]
        .as_str()
        .expect("envelope has content")
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
