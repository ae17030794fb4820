//! # Batch Generation
//!
//! Drives a whole label run:
//!
//! ```text
//! spreadsheet bytes ─→ read_orders ─→ for each row:
//!                                       identifier(i)
//!                                       render_label ─→ result<id>.jpg
//!                                       LabelDocument ─→ <label>.docx
//!                                     pack_documents ─→ labels.zip
//! ```
//!
//! Every run works in its own temporary directory, removed when the run
//! finishes, so concurrent runs never see each other's files. The pipeline is
//! fail-fast: the first error aborts the run and no archive is produced.

use image::RgbImage;
use std::path::{Path, PathBuf};

use crate::archive;
use crate::config::LabelSettings;
use crate::document::{LabelDocument, document_file_name};
use crate::error::LabelError;
use crate::ident::{self, identifier};
use crate::logo::Logo;
use crate::render::{self, font::LabelFont};
use crate::sheet::{self, OrderRow};

/// Files produced by [`generate_documents`].
#[derive(Debug)]
pub struct BatchOutput {
    /// One entry per row, in row order
    pub documents: Vec<PathBuf>,
    /// One entry per row, in row order
    pub images: Vec<PathBuf>,
    /// The row-0 label, if there were any rows
    pub preview: Option<RgbImage>,
}

/// Result of a complete run.
#[derive(Debug)]
pub struct LabelRun {
    /// Zip of all label documents
    pub archive: Vec<u8>,
    /// First rendered label, for display only
    pub preview: Option<RgbImage>,
    /// Number of rows processed
    pub label_count: usize,
}

/// Render and wrap every row into `workdir`.
pub fn generate_documents(
    rows: &[OrderRow],
    logo: &Logo,
    font: &LabelFont,
    settings: &LabelSettings,
    workdir: &Path,
) -> Result<BatchOutput, LabelError> {
    ident::ensure_capacity(rows.len())?;

    let template = logo.image();
    let mut output = BatchOutput {
        documents: Vec::with_capacity(rows.len()),
        images: Vec::with_capacity(rows.len()),
        preview: None,
    };

    for (index, row) in rows.iter().enumerate() {
        let id = identifier(index)?;

        let label = render::render_label(template, row, font, &settings.layout)?;
        let image_path = workdir.join(format!("{}{}.jpg", settings.image_prefix, id));
        render::save_jpeg(&label, &image_path)?;

        let document_path = workdir.join(document_file_name(&row.primary));
        LabelDocument::from_image_file(&image_path, settings.document_width_inches)?
            .with_description(format!("{}\n{}", row.title_line(), row.detail_line()))
            .write_to(&document_path)?;

        tracing::debug!(
            row = index,
            id = %id,
            document = %document_path.display(),
            "label generated"
        );

        if index == 0 {
            output.preview = Some(label);
        }
        output.images.push(image_path);
        output.documents.push(document_path);
    }

    Ok(output)
}

/// Run the full pipeline on an uploaded spreadsheet.
pub fn run(spreadsheet: &[u8], logo: &Logo, settings: &LabelSettings) -> Result<LabelRun, LabelError> {
    let rows = sheet::read_orders(spreadsheet, settings.header_row)?;
    ident::ensure_capacity(rows.len())?;

    let workspace = tempfile::Builder::new().prefix("labelsmith-").tempdir()?;
    let font = LabelFont::load(&settings.font_path, settings.font_size);

    tracing::info!(
        rows = rows.len(),
        default_logo = logo.is_default(),
        fallback_font = font.is_fallback(),
        "generating labels"
    );

    let output = generate_documents(&rows, logo, &font, settings, workspace.path())?;
    let archive = archive::pack_documents(&output.documents)?;

    workspace.close()?;

    tracing::info!(labels = rows.len(), archive_bytes = archive.len(), "labels generated");

    Ok(LabelRun {
        archive,
        preview: output.preview,
        label_count: rows.len(),
    })
}

/// Render only the first row's label.
///
/// Reads and checks the spreadsheet the same way [`run`] does, so a
/// spreadsheet `run` rejects is rejected here too, but no documents are built
/// and nothing touches the disk.
pub fn preview(spreadsheet: &[u8], logo: &Logo, settings: &LabelSettings) -> Result<Option<RgbImage>, LabelError> {
    let rows = sheet::read_orders(spreadsheet, settings.header_row)?;
    ident::ensure_capacity(rows.len())?;

    let Some(first) = rows.first() else {
        return Ok(None);
    };
    let font = LabelFont::load(&settings.font_path, settings.font_size);
    render::render_label(logo.image(), first, &font, &settings.layout).map(Some)
}
