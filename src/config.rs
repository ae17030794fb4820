//! # Label Settings
//!
//! Fixed layout constants for a label run. The defaults reproduce the label
//! format this tool was built for:
//!
//! | Setting | Default |
//! |---------|---------|
//! | Line 1 origin | (0, 370) px |
//! | Line 2 origin | (0, 440) px |
//! | Font | `arial.ttf` at 40 px |
//! | Document picture width | 3.6 in |
//! | Image file prefix | `result` |
//! | Header row | skipped |
//!
//! ## Usage
//!
//! ```
//! use labelsmith::config::LabelSettings;
//!
//! let settings = LabelSettings {
//!     font_size: 32.0,
//!     ..Default::default()
//! };
//! assert_eq!(settings.layout.primary_origin, (0, 370));
//! ```

use std::path::PathBuf;

/// Where the two text lines start, as top-left pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    /// Origin of `"{primary}  {secondary}"`
    pub primary_origin: (i32, i32),
    /// Origin of the detail value
    pub detail_origin: (i32, i32),
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            primary_origin: (0, 370),
            detail_origin: (0, 440),
        }
    }
}

/// Everything a generation run needs besides the rows and the logo.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSettings {
    pub layout: TextLayout,
    /// Preferred scalable font. Missing or unreadable falls back to the
    /// built-in bitmap font.
    pub font_path: PathBuf,
    /// Font size in pixels
    pub font_size: f32,
    /// Width of the picture in each document, in inches
    pub document_width_inches: f32,
    /// Rendered images are saved as `{prefix}{identifier}.jpg`
    pub image_prefix: String,
    /// Treat the first spreadsheet row as column headers
    pub header_row: bool,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            layout: TextLayout::default(),
            font_path: PathBuf::from("arial.ttf"),
            font_size: 40.0,
            document_width_inches: 3.6,
            image_prefix: "result".to_string(),
            header_row: true,
        }
    }
}
