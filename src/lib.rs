//! # Labelsmith - Batch Label Generator
//!
//! Labelsmith turns a spreadsheet of orders into print-ready labels. It
//! provides:
//!
//! - **Spreadsheet input**: first sheet of any common workbook format, read
//!   positionally (primary label, secondary label, quantity or code)
//! - **Label rendering**: row text drawn onto a copy of a logo image
//! - **Documents**: each label wrapped into a one-page DOCX file
//! - **Packaging**: all documents zipped in memory as `labels.zip`
//!
//! ## Quick Start
//!
//! ```no_run
//! use labelsmith::{batch, config::LabelSettings, logo::Logo};
//!
//! let logo = Logo::load_default("logo.jpg")?;
//! let spreadsheet = std::fs::read("orders.xlsx")?;
//!
//! let run = batch::run(&spreadsheet, &logo, &LabelSettings::default())?;
//! std::fs::write("labels.zip", &run.archive)?;
//! println!("{} labels", run.label_count);
//!
//! # Ok::<(), labelsmith::LabelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`ident`] | Two-letter image identifiers |
//! | [`sheet`] | Order rows from a workbook |
//! | [`logo`] | Default and per-run logo templates |
//! | [`render`] | Text overlay and fonts |
//! | [`document`] | Single-picture DOCX builder |
//! | [`archive`] | In-memory zip packaging |
//! | [`batch`] | The full generation run |
//! | [`server`] | HTTP front end |
//! | [`error`] | Error types |

pub mod archive;
pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod ident;
pub mod logo;
pub mod render;
pub mod server;
pub mod sheet;

// Re-exports for convenience
pub use config::LabelSettings;
pub use error::LabelError;
pub use logo::Logo;
