use std::time::Duration;

use axum::body::Bytes;
use reqwest::Client;

use crate::{
    error::{Error, Result},
    http_client::http_client,
};

/// Downloads audio referenced by URL under a size ceiling
pub struct Fetcher {
    client: Client,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: http_client(),
            timeout,
        }
    }

    /// Retrieve `url`, holding at most `max_bytes` of body in memory
    ///
    /// A declared `Content-Length` over the ceiling fails before any body is
    /// read. The streamed body is checked as well, since the header may be
    /// absent or wrong. The response status is not inspected.
    pub async fn fetch(&self, url: &str, max_bytes: u64) -> Result<Bytes> {
        let mut response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("audio download failed: {e}");
                Error::FetchFailed(e)
            })?;

        let declared = response.content_length();
        if let Some(declared) = declared
            && declared > max_bytes
        {
            tracing::debug!(declared, max_bytes, "declared audio size over limit");
            return Err(Error::SizeExceeded { limit: max_bytes });
        }

        let capacity = declared.map_or(0, |len| usize::try_from(len).unwrap_or(0));
        let mut audio = Vec::with_capacity(capacity);

        while let Some(chunk) = response.chunk().await.map_err(Error::FetchFailed)? {
            if (audio.len() + chunk.len()) as u64 > max_bytes {
                tracing::debug!(max_bytes, "streamed audio over limit");
                return Err(Error::SizeExceeded { limit: max_bytes });
            }
            audio.extend_from_slice(&chunk);
        }

        tracing::debug!(status = %response.status(), bytes = audio.len(), "audio downloaded");

        Ok(Bytes::from(audio))
    }
}
