use std::net::SocketAddr;

use serde::Deserialize;

/// Port the upload UI listens on when nothing else is configured
pub const DEFAULT_UI_PORT: u16 = 7500;

/// Browser upload form configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    /// Serve the upload form at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Address of the UI listener, separate from the API listener
    #[serde(default)]
    pub listen_address: Option<SocketAddr>,
}

impl UiConfig {
    /// Effective UI listen address
    pub fn listen_address(&self) -> SocketAddr {
        self.listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_UI_PORT)))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            listen_address: None,
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}
