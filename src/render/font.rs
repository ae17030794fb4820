//! Label fonts.
//!
//! Acquisition is two-step: try the preferred scalable font from disk, and if
//! that file is missing or cannot be parsed, use the built-in Spleen 12x24
//! bitmap font scaled to roughly the requested size. Only font loading can
//! trigger the fallback; drawing errors propagate to the caller.

use ab_glyph::{Font, FontArc, ScaleFont};
use image::{Rgb, RgbImage};
use spleen_font::{FONT_12X24, PSF2Font};
use std::path::Path;
use thiserror::Error;

use crate::error::LabelError;

/// Spleen 12x24 cell size.
const BITMAP_CELL: (u32, u32) = (12, 24);

/// Why the preferred font could not be used.
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("cannot read font file: {0}")]
    Read(#[from] std::io::Error),

    #[error("cannot parse font: {0}")]
    Parse(#[from] ab_glyph::InvalidFont),
}

/// A font ready to draw label text.
#[derive(Clone)]
pub enum LabelFont {
    /// Anti-aliased outline font at `px` pixels
    Scalable { font: FontArc, px: f32 },
    /// Built-in bitmap font, each glyph pixel drawn as a `scale`×`scale` block
    Bitmap { scale: u32 },
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelFont::Scalable { px, .. } => write!(f, "LabelFont::Scalable({}px)", px),
            LabelFont::Bitmap { scale } => write!(f, "LabelFont::Bitmap(x{})", scale),
        }
    }
}

impl LabelFont {
    /// Load the preferred font, falling back to the built-in bitmap font.
    pub fn load(path: impl AsRef<Path>, px: f32) -> Self {
        let path = path.as_ref();
        match Self::scalable(path, px) {
            Ok(font) => font,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "preferred font unavailable, using built-in bitmap font"
                );
                Self::bitmap(px)
            }
        }
    }

    /// Load a TrueType/OpenType font file at `px` pixels.
    pub fn scalable(path: &Path, px: f32) -> Result<Self, FontLoadError> {
        let data = std::fs::read(path)?;
        let font = FontArc::try_from_vec(data)?;
        Ok(LabelFont::Scalable { font, px })
    }

    /// The built-in bitmap font, integer-scaled to approximate `px`.
    pub fn bitmap(px: f32) -> Self {
        let scale = (px / BITMAP_CELL.1 as f32).round().max(1.0) as u32;
        LabelFont::Bitmap { scale }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LabelFont::Bitmap { .. })
    }

    /// Draw `text` in black with its line box starting at `origin` (top-left).
    ///
    /// Pixels falling outside the image are dropped.
    pub fn draw_text(&self, img: &mut RgbImage, origin: (i32, i32), text: &str) -> Result<(), LabelError> {
        match self {
            LabelFont::Scalable { font, px } => {
                draw_outline_text(img, font, *px, origin, text);
                Ok(())
            }
            LabelFont::Bitmap { scale } => draw_bitmap_text(img, *scale, origin, text),
        }
    }
}

fn draw_outline_text(img: &mut RgbImage, font: &FontArc, px: f32, origin: (i32, i32), text: &str) {
    let scaled = font.as_scaled(px);
    let baseline_y = origin.1 as f32 + scaled.ascent();
    let mut caret_x = origin.0 as f32;
    let mut previous = None;

    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = previous {
            caret_x += scaled.kern(prev, glyph_id);
        }
        let glyph = glyph_id.with_scale_and_position(px, ab_glyph::point(caret_x, baseline_y));
        caret_x += scaled.h_advance(glyph_id);
        previous = Some(glyph_id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = gx as i32 + bounds.min.x as i32;
                let y = gy as i32 + bounds.min.y as i32;
                apply_ink(img, x, y, coverage);
            });
        }
    }
}

fn draw_bitmap_text(img: &mut RgbImage, scale: u32, origin: (i32, i32), text: &str) -> Result<(), LabelError> {
    let mut spleen = PSF2Font::new(FONT_12X24)
        .map_err(|_| LabelError::Image("built-in bitmap font is corrupt".to_string()))?;
    let (cell_w, cell_h) = BITMAP_CELL;
    let scale = scale as i32;

    for (i, ch) in text.chars().enumerate() {
        let cell_x = origin.0 + i as i32 * cell_w as i32 * scale;
        let utf8 = ch.to_string();

        match spleen.glyph_for_utf8(utf8.as_bytes()) {
            Some(glyph) => {
                for (row_y, row) in glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        if on && col_x < cell_w as usize && row_y < cell_h as usize {
                            let x = cell_x + col_x as i32 * scale;
                            let y = origin.1 + row_y as i32 * scale;
                            fill_block(img, x, y, scale);
                        }
                    }
                }
            }
            None => {
                // Unknown character: box outline
                let w = cell_w as i32;
                let h = cell_h as i32;
                for gx in 0..w {
                    fill_block(img, cell_x + gx * scale, origin.1, scale);
                    fill_block(img, cell_x + gx * scale, origin.1 + (h - 1) * scale, scale);
                }
                for gy in 0..h {
                    fill_block(img, cell_x, origin.1 + gy * scale, scale);
                    fill_block(img, cell_x + (w - 1) * scale, origin.1 + gy * scale, scale);
                }
            }
        }
    }

    Ok(())
}

fn fill_block(img: &mut RgbImage, x: i32, y: i32, size: i32) {
    for dy in 0..size {
        for dx in 0..size {
            apply_ink(img, x + dx, y + dy, 1.0);
        }
    }
}

/// Darken a pixel towards black by `coverage` (0.0 = untouched, 1.0 = black).
fn apply_ink(img: &mut RgbImage, x: i32, y: i32, coverage: f32) {
    if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
        return;
    }
    let keep = 1.0 - coverage.clamp(0.0, 1.0);
    let Rgb([r, g, b]) = *img.get_pixel(x as u32, y as u32);
    let ink = |c: u8| (c as f32 * keep).round() as u8;
    img.put_pixel(x as u32, y as u32, Rgb([ink(r), ink(g), ink(b)]));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
    }

    fn dark_pixels(img: &RgbImage) -> usize {
        img.pixels().filter(|p| p.0[0] < 128).count()
    }

    #[test]
    fn test_missing_font_falls_back() {
        let font = LabelFont::load("/nonexistent/arial.ttf", 40.0);
        assert!(font.is_fallback());
    }

    #[test]
    fn test_unparsable_font_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        assert!(matches!(
            LabelFont::scalable(&path, 40.0),
            Err(FontLoadError::Parse(_))
        ));
        assert!(LabelFont::load(&path, 40.0).is_fallback());
    }

    #[test]
    fn test_bitmap_scale() {
        assert!(matches!(LabelFont::bitmap(40.0), LabelFont::Bitmap { scale: 2 }));
        assert!(matches!(LabelFont::bitmap(10.0), LabelFont::Bitmap { scale: 1 }));
        assert!(matches!(LabelFont::bitmap(72.0), LabelFont::Bitmap { scale: 3 }));
    }

    #[test]
    fn test_bitmap_draws_inside_line_box() {
        let font = LabelFont::bitmap(24.0);
        let mut img = white(200, 100);
        font.draw_text(&mut img, (10, 20), "Hi").unwrap();

        assert!(dark_pixels(&img) > 0);
        for (x, y, p) in img.enumerate_pixels() {
            if p.0[0] < 128 {
                assert!((10..34).contains(&x), "x={} outside two 12px cells", x);
                assert!((20..44).contains(&y), "y={} outside 24px line", y);
            }
        }
    }

    /// A TrueType font installed on the host, if any.
    fn system_font() -> Option<&'static Path> {
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/Library/Fonts/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ]
        .into_iter()
        .map(Path::new)
        .find(|p| p.exists())
    }

    #[test]
    fn test_scalable_draws_inside_line_box() {
        let Some(path) = system_font() else {
            eprintln!("no TrueType font installed, skipping");
            return;
        };
        let font = LabelFont::load(path, 40.0);
        assert!(!font.is_fallback());

        let mut img = white(400, 120);
        font.draw_text(&mut img, (10, 30), "Alice  Smith").unwrap();

        assert!(dark_pixels(&img) > 0);
        for (x, y, p) in img.enumerate_pixels() {
            if p.0[0] < 128 {
                assert!(x >= 8, "x={} left of origin", x);
                assert!((30..90).contains(&y), "y={} outside line box", y);
            }
        }
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let font = LabelFont::bitmap(48.0);
        let mut img = white(30, 30);
        font.draw_text(&mut img, (-20, 10), "Overflowing text").unwrap();
        font.draw_text(&mut img, (0, 1000), "Far below").unwrap();
        assert_eq!(img.dimensions(), (30, 30));
    }

    #[test]
    fn test_ink_is_black() {
        let mut img = white(4, 4);
        apply_ink(&mut img, 1, 1, 1.0);
        apply_ink(&mut img, 2, 2, 0.5);
        assert_eq!(img.get_pixel(1, 1), &Rgb([0, 0, 0]));
        let half = img.get_pixel(2, 2).0[0];
        assert!(half > 100 && half < 150);
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 255, 255]));
    }
}
