//! # Archive Packaging
//!
//! Bundles the generated documents into one zip, built entirely in memory so
//! it can be handed straight to a download response.

use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::LabelError;

/// File name the archive is offered under.
pub const ARCHIVE_FILE_NAME: &str = "labels.zip";

/// Zip every file in `paths`, in order, under its base name.
///
/// A path listed twice (two rows whose labels sanitize to the same file name)
/// is stored once: both rows wrote the same file and only the last write
/// survived on disk.
pub fn pack_documents(paths: &[PathBuf]) -> Result<Vec<u8>, LabelError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut seen = HashSet::new();

    for path in paths {
        let name = entry_name(path)?;
        if !seen.insert(name.clone()) {
            tracing::warn!(entry = %name, "duplicate document name, earlier label was overwritten");
            continue;
        }
        let data = std::fs::read(path)?;
        writer.start_file(name.as_str(), options).map_err(archive_error)?;
        writer.write_all(&data)?;
    }

    let cursor = writer.finish().map_err(archive_error)?;
    let bytes = cursor.into_inner();
    tracing::debug!(entries = seen.len(), bytes = bytes.len(), "archive packed");
    Ok(bytes)
}

fn entry_name(path: &Path) -> Result<String, LabelError> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| LabelError::Archive(format!("{} has no file name", path.display())))
}

fn archive_error(e: zip::result::ZipError) -> LabelError {
    LabelError::Archive(e.to_string())
}
