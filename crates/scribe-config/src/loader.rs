use std::{net::SocketAddr, path::Path};

use url::Url;

use crate::Config;

/// Values supplied on the command line
///
/// Each set field replaces what the config file says.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<Url>,
    pub model: Option<String>,
    pub max_audio_size: Option<u64>,
    pub api_port: Option<u16>,
    pub ui_port: Option<u16>,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes it. Validation is left to the caller so command-line
    /// overrides can fill in required values first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, or TOML parsing fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text, expanding environment placeholders
    ///
    /// # Errors
    ///
    /// Returns an error if expansion or TOML parsing fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))
    }

    /// Apply command-line overrides on top of the file configuration
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(base_url) = overrides.base_url {
            self.transcription.base_url = Some(base_url);
        }
        if let Some(model) = overrides.model {
            self.transcription.model = Some(model);
        }
        if let Some(max_audio_size) = overrides.max_audio_size {
            self.transcription.max_audio_size = Some(max_audio_size);
        }
        if let Some(port) = overrides.api_port {
            self.server.listen_address = Some(with_port(self.server.listen_address(), port));
        }
        if let Some(port) = overrides.ui_port {
            self.ui.listen_address = Some(with_port(self.ui.listen_address(), port));
        }
    }

    /// Validate that the configuration is complete
    ///
    /// # Errors
    ///
    /// Returns an error naming every missing required option, or the first
    /// malformed value
    pub fn validate(&self) -> anyhow::Result<()> {
        let transcription = &self.transcription;
        let mut missing = Vec::new();

        if transcription.base_url.is_none() {
            missing.push("transcription.base_url (--whisper-server-url)");
        }
        if transcription.model.as_deref().is_none_or(str::is_empty) {
            missing.push("transcription.model (--whisper-model)");
        }
        if transcription.max_audio_size.is_none_or(|size| size == 0) {
            missing.push("transcription.max_audio_size (--max-audio-size)");
        }

        if !missing.is_empty() {
            anyhow::bail!("required options must be set: {}", missing.join(", "));
        }

        transcription.fetch_timeout()?;
        transcription.backend_timeout()?;

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        if self.ui.enabled && self.ui.listen_address() == self.server.listen_address() {
            anyhow::bail!("ui.listen_address must differ from server.listen_address");
        }

        Ok(())
    }
}

fn with_port(mut address: SocketAddr, port: u16) -> SocketAddr {
    address.set_port(port);
    address
}
