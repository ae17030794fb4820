//! # Logo Templates
//!
//! A label is drawn on top of a logo image. The default logo is loaded once
//! when the process starts and shared read-only by every run; a run may pass
//! its own logo instead.

use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::LabelError;

/// Default logo location, relative to the working directory.
pub const DEFAULT_LOGO_PATH: &str = "logo.jpg";

/// The template a run renders labels onto.
#[derive(Debug, Clone)]
pub enum Logo {
    /// Loaded at startup, shared by all runs
    Default(Arc<DynamicImage>),
    /// Uploaded for a single run
    Custom(DynamicImage),
}

impl Logo {
    /// Load the default logo. A missing or unreadable file is a startup
    /// failure: nothing can be generated without it.
    pub fn load_default(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| LabelError::StartupFailure {
            path: PathBuf::from(path),
            reason: e.to_string(),
        })?;
        tracing::info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "loaded default logo"
        );
        Ok(Logo::Default(Arc::new(image)))
    }

    /// Decode an uploaded logo.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LabelError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| LabelError::Image(format!("Failed to decode logo: {}", e)))?;
        Ok(Logo::Custom(image))
    }

    /// Decode a logo file given on the command line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| LabelError::Image(format!("cannot read logo '{}': {}", path.display(), e)))?;
        Self::from_bytes(&bytes)
    }

    /// The per-run override if there is one, otherwise this logo.
    pub fn or_custom(&self, custom: Option<Logo>) -> Logo {
        custom.unwrap_or_else(|| self.clone())
    }

    pub fn image(&self) -> &DynamicImage {
        match self {
            Logo::Default(image) => image.as_ref(),
            Logo::Custom(image) => image,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Logo::Default(_))
    }
}
