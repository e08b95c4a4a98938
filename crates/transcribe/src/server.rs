use scribe_config::TranscriptionConfig;

use crate::{
    fetch::Fetcher,
    forward::{TranscriptionBackend, WhisperBackend},
};

/// Shared state of both ingress paths
///
/// Built once at startup and only read afterwards.
pub struct Server {
    pub(crate) fetcher: Fetcher,
    pub(crate) backend: Box<dyn TranscriptionBackend>,
    pub(crate) model: String,
    pub(crate) max_audio_size: u64,
}

impl Server {
    pub fn new(
        fetcher: Fetcher,
        backend: impl TranscriptionBackend + 'static,
        model: impl Into<String>,
        max_audio_size: u64,
    ) -> Self {
        Self {
            fetcher,
            backend: Box::new(backend),
            model: model.into(),
            max_audio_size,
        }
    }

    /// Model identifier sent to the backend and reported in envelopes
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Size ceiling for downloaded and uploaded audio
    #[must_use]
    pub const fn max_audio_size(&self) -> u64 {
        self.max_audio_size
    }
}

/// Builder for constructing the server from configuration
pub(crate) struct ServerBuilder<'a> {
    config: &'a TranscriptionConfig,
}

impl<'a> ServerBuilder<'a> {
    pub fn new(config: &'a TranscriptionConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> anyhow::Result<Server> {
        let config = self.config;

        let base_url = config
            .base_url
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("transcription backend URL is not configured"))?;
        let model = config
            .model
            .clone()
            .filter(|model| !model.is_empty())
            .ok_or_else(|| anyhow::anyhow!("transcription model is not configured"))?;
        let max_audio_size = config
            .max_audio_size
            .filter(|size| *size > 0)
            .ok_or_else(|| anyhow::anyhow!("maximum audio size must be greater than 0"))?;

        let backend = WhisperBackend::new(base_url, config.api_key().cloned(), config.backend_timeout()?);

        tracing::debug!(
            endpoint = backend.endpoint(),
            %model,
            max_audio_size,
            "transcription backend configured"
        );

        Ok(Server::new(
            Fetcher::new(config.fetch_timeout()?),
            backend,
            model,
            max_audio_size,
        ))
    }
}
