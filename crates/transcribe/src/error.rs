use thiserror::Error;

use crate::filename::InvalidExtension;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the retrieval and forwarding pipeline
///
/// Ingress handlers never surface these as HTTP errors; they are rendered
/// into the chat envelope or the upload result page.
#[derive(Debug, Error)]
pub enum Error {
    /// Declared or streamed audio size is over the configured ceiling
    #[error("file exceeds maximum size of {limit} bytes")]
    SizeExceeded { limit: u64 },

    /// The audio source could not be retrieved
    #[error("HTTP get failed: {0}")]
    FetchFailed(#[source] reqwest::Error),

    /// No usable extension to name the upload with
    #[error(transparent)]
    FilenameDerivation(#[from] InvalidExtension),

    /// The backend request could not be assembled
    #[error("failed to build transcription request: {0}")]
    RequestConstruction(#[source] reqwest::Error),

    /// The backend could not be reached or did not answer in time
    #[error("transcription request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered but its body could not be read
    #[error("failed to read transcription response: {0}")]
    ResponseRead(#[source] reqwest::Error),
}
