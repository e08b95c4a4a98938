use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Transcription backend and audio retrieval settings
///
/// `base_url`, `model` and `max_audio_size` have no defaults. They may come
/// from the config file or from command-line overrides, and
/// [`Config::validate`](crate::Config::validate) rejects a configuration
/// where any of them is still missing.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptionConfig {
    /// Base URL of the backend; `/v1/audio/transcriptions` is appended
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier sent with every upload and echoed in chat envelopes
    #[serde(default)]
    pub model: Option<String>,
    /// Maximum accepted audio size in bytes
    #[serde(default)]
    pub max_audio_size: Option<u64>,
    /// Bearer token for the backend
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Time budget for downloading the audio referenced in a chat message
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: String,
    /// Time budget for the backend upload and response
    #[serde(default = "default_backend_timeout")]
    pub backend_timeout: String,
}

impl TranscriptionConfig {
    /// Parsed download timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `fetch_timeout` is not a valid duration string
    pub fn fetch_timeout(&self) -> anyhow::Result<Duration> {
        parse_duration("fetch_timeout", &self.fetch_timeout)
    }

    /// Parsed backend timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `backend_timeout` is not a valid duration string
    pub fn backend_timeout(&self) -> anyhow::Result<Duration> {
        parse_duration("backend_timeout", &self.backend_timeout)
    }

    /// The backend key, ignoring an empty value
    ///
    /// An empty key is what `{{ env.VAR | default("") }}` expands to when the
    /// variable is unset.
    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref().filter(|key| !key.expose_secret().is_empty())
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            model: None,
            max_audio_size: None,
            api_key: None,
            fetch_timeout: default_fetch_timeout(),
            backend_timeout: default_backend_timeout(),
        }
    }
}

fn parse_duration(field: &str, value: &str) -> anyhow::Result<Duration> {
    duration_str::parse(value).map_err(|e| anyhow::anyhow!("invalid transcription.{field} '{value}': {e}"))
}

fn default_fetch_timeout() -> String {
    "60s".to_string()
}

fn default_backend_timeout() -> String {
    "120s".to_string()
}
