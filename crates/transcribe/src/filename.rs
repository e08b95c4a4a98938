use thiserror::Error;

/// The source identifier has no extension to carry over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid or missing file extension")]
pub struct InvalidExtension;

/// Derive the filename used for the backend upload
///
/// Only the extension of `source` survives (a URL or an uploaded filename),
/// since backends may pick a decoder from it: `https://x/y/clip.WAV` becomes
/// `audio.WAV`.
pub fn derive_filename(source: &str) -> Result<String, InvalidExtension> {
    match source.rfind('.') {
        Some(dot) if dot + 1 < source.len() => Ok(format!("audio{}", &source[dot..])),
        _ => Err(InvalidExtension),
    }
}
