//! Server state and configuration.

use std::path::PathBuf;

use crate::config::LabelSettings;
use crate::error::LabelError;
use crate::logo::{DEFAULT_LOGO_PATH, Logo};
use crate::render;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Logo used when a request does not upload its own
    pub default_logo_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            default_logo_path: PathBuf::from(DEFAULT_LOGO_PATH),
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub settings: LabelSettings,
    /// Loaded once at startup, read-only afterwards.
    pub default_logo: Logo,
    /// The default logo encoded as PNG for the logo preview.
    pub default_logo_png: Vec<u8>,
}

impl AppState {
    /// Load the default logo. Fails with `StartupFailure` if it is missing.
    pub fn new(config: ServerConfig, settings: LabelSettings) -> Result<Self, LabelError> {
        let default_logo = Logo::load_default(&config.default_logo_path)?;
        Self::with_logo(config, settings, default_logo)
    }

    pub fn with_logo(config: ServerConfig, settings: LabelSettings, default_logo: Logo) -> Result<Self, LabelError> {
        let default_logo_png = render::to_png(&default_logo.image().to_rgb8())?;
        Ok(Self {
            config,
            settings,
            default_logo,
            default_logo_png,
        })
    }
}
