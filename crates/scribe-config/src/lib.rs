#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod server;
pub mod telemetry;
pub mod transcription;
pub mod ui;

use serde::Deserialize;

pub use health::*;
pub use loader::Overrides;
pub use server::*;
pub use telemetry::TelemetryConfig;
pub use transcription::*;
pub use ui::*;

/// Top-level scribe configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// API listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload UI listener configuration
    #[serde(default)]
    pub ui: UiConfig,
    /// Transcription backend and audio limits
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
