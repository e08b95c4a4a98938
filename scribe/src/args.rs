use std::path::PathBuf;

use clap::Parser;
use scribe_config::Overrides;
use url::Url;

/// Scribe transcription adapter
#[derive(Debug, Parser)]
#[command(
    name = "scribe",
    about = "Chat-completions API and upload form in front of a Whisper-compatible transcription server"
)]
pub struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "SCRIBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the transcription service
    #[arg(long, env = "SCRIBE_WHISPER_SERVER_URL")]
    pub whisper_server_url: Option<Url>,

    /// Whisper model to use
    #[arg(long, env = "SCRIBE_WHISPER_MODEL")]
    pub whisper_model: Option<String>,

    /// Maximum audio file size in bytes
    #[arg(long, env = "SCRIBE_MAX_AUDIO_SIZE")]
    pub max_audio_size: Option<u64>,

    /// API HTTP server listen port
    #[arg(long, env = "SCRIBE_PORT")]
    pub port: Option<u16>,

    /// UI HTTP server listen port
    #[arg(long, env = "SCRIBE_UI_PORT")]
    pub ui_port: Option<u16>,

    /// Log filter directives
    #[arg(long, env = "SCRIBE_LOG", default_value = "info")]
    pub log: String,
}

impl Args {
    /// Command-line values that replace the config file's
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.whisper_server_url.clone(),
            model: self.whisper_model.clone(),
            max_audio_size: self.max_audio_size,
            api_port: self.port,
            ui_port: self.ui_port,
        }
    }
}
