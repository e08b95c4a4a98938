mod health;

use std::net::SocketAddr;

use axum::Router;
use scribe_config::Config;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

/// Assembled listeners with their routes and middleware
pub struct Server {
    api: Listener,
    ui: Option<Listener>,
}

struct Listener {
    name: &'static str,
    router: Router,
    address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the transcription pipeline cannot be initialized
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let state = transcribe::build_server(config)?;

        let mut api = transcribe::api_router().with_state(state.clone());

        if config.server.health.enabled {
            api = api.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        let api = Listener {
            name: "api",
            router: api.layer(TraceLayer::new_for_http()),
            address: config.server.listen_address(),
        };

        let ui = config.ui.enabled.then(|| Listener {
            name: "ui",
            router: transcribe::ui_router()
                .with_state(state)
                .layer(TraceLayer::new_for_http()),
            address: config.ui.listen_address(),
        });

        Ok(Self { api, ui })
    }

    /// Configured API listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.api.address
    }

    /// Configured UI listen address, if the UI is enabled
    #[must_use]
    pub fn ui_listen_address(&self) -> Option<SocketAddr> {
        self.ui.as_ref().map(|ui| ui.address)
    }

    /// Consume the server and return the API and UI routers
    ///
    /// Useful for testing when the caller manages the listeners
    pub fn into_routers(self) -> (Router, Option<Router>) {
        (self.api.router, self.ui.map(|ui| ui.router))
    }

    /// Start serving requests on every configured listener
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding a TCP listener or serving fails
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let api = self.api.serve(shutdown.clone());

        match self.ui {
            Some(ui) => {
                tokio::try_join!(api, ui.serve(shutdown))?;
            }
            None => api.await?,
        }

        Ok(())
    }
}

impl Listener {
    async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.address)
            .await
            .map_err(|e| anyhow::anyhow!("failed to bind {} listener on {}: {e}", self.name, self.address))?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, listener = self.name, "server listening");

        let name = self.name;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!(listener = name, "graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
