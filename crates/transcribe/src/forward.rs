use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use http::StatusCode;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    error::{Error, Result},
    filename::derive_filename,
    http_client::http_client,
};

/// Raw backend answer, passed on without looking at the status
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// A service that turns uploaded audio into a transcript
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    /// Upload `audio` for transcription with `model`
    ///
    /// `source` is the URL or filename the audio came from; its extension
    /// names the upload.
    async fn forward(&self, model: &str, source: &str, audio: Bytes) -> Result<BackendReply>;
}

/// Backend speaking the `OpenAI` `/v1/audio/transcriptions` multipart contract
pub struct WhisperBackend {
    client: Client,
    endpoint: String,
    api_key: Option<SecretString>,
    timeout: Duration,
}

impl WhisperBackend {
    pub fn new(base_url: &Url, api_key: Option<SecretString>, timeout: Duration) -> Self {
        let endpoint = format!("{}/v1/audio/transcriptions", base_url.as_str().trim_end_matches('/'));

        Self {
            client: http_client(),
            endpoint,
            api_key,
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TranscriptionBackend for WhisperBackend {
    async fn forward(&self, model: &str, source: &str, audio: Bytes) -> Result<BackendReply> {
        let filename = derive_filename(source)?;

        tracing::debug!(
            "transcription request: {} bytes as {filename}, model={model}",
            audio.len()
        );

        let length = audio.len() as u64;
        let file = Part::stream_with_length(audio, length)
            .file_name(filename)
            .mime_str("application/octet-stream")
            .map_err(Error::RequestConstruction)?;

        let form = Form::new().part("file", file).text("model", model.to_owned());

        let mut request = self.client.post(&self.endpoint).timeout(self.timeout).multipart(form);

        if let Some(ref api_key) = self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("transcription request failed: {e}");
            if e.is_builder() {
                Error::RequestConstruction(e)
            } else {
                Error::Transport(e)
            }
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(Error::ResponseRead)?;

        if !status.is_success() {
            tracing::warn!("transcription backend answered {status}: {}", String::from_utf8_lossy(&body));
        }

        Ok(BackendReply { status, body })
    }
}
