//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use scribe_config::{Config, Overrides};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Configuration pointing at `backend_url` with the given size ceiling
    pub fn new(backend_url: &str, max_audio_size: u64) -> Self {
        let mut config = Config::default();
        config.apply_overrides(Overrides {
            base_url: Some(backend_url.parse().expect("valid URL")),
            model: Some("whisper-test".to_owned()),
            max_audio_size: Some(max_audio_size),
            ..Overrides::default()
        });
        config.server.listen_address = Some(SocketAddr::from(([127, 0, 0, 1], 0)));
        config.ui.listen_address = Some(SocketAddr::from(([127, 0, 0, 1], 0)));

        Self { config }
    }

    /// Use a different model identifier
    pub fn with_model(mut self, model: &str) -> Self {
        self.config.transcription.model = Some(model.to_owned());
        self
    }

    /// Shorten the download time budget
    pub fn with_fetch_timeout(mut self, timeout: &str) -> Self {
        self.config.transcription.fetch_timeout = timeout.to_owned();
        self
    }

    /// Disable the upload UI
    pub fn without_ui(mut self) -> Self {
        self.config.ui.enabled = false;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
