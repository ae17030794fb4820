//! # Label Rendering
//!
//! Draws an order row onto a copy of the logo template.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────┐
//! │          logo            │
//! │                          │
//! │ Alice  Smith             │  ← line 1 at primary_origin
//! │ 3                        │  ← line 2 at detail_origin
//! └──────────────────────────┘
//! ```
//!
//! Text is never wrapped or truncated. Anything that runs past the image
//! edge is clipped.
//!
//! ## Modules
//!
//! - [`font`]: preferred font loading with bitmap fallback

pub mod font;

use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;

use crate::config::TextLayout;
use crate::error::LabelError;
use crate::sheet::OrderRow;
use font::LabelFont;

/// Render one label. The template is copied, never modified.
pub fn render_label(
    template: &DynamicImage,
    row: &OrderRow,
    font: &LabelFont,
    layout: &TextLayout,
) -> Result<RgbImage, LabelError> {
    let mut img = template.to_rgb8();
    font.draw_text(&mut img, layout.primary_origin, &row.title_line())?;
    font.draw_text(&mut img, layout.detail_origin, &row.detail_line())?;
    Ok(img)
}

/// Save a rendered label as JPEG.
pub fn save_jpeg(img: &RgbImage, path: &Path) -> Result<(), LabelError> {
    img.save_with_format(path, ImageFormat::Jpeg)
        .map_err(|e| LabelError::Image(format!("Failed to save {}: {}", path.display(), e)))
}

/// Encode a label as PNG bytes (previews).
pub fn to_png(img: &RgbImage) -> Result<Vec<u8>, LabelError> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| LabelError::Image(format!("Failed to encode PNG: {}", e)))?;
    Ok(out.into_inner())
}
