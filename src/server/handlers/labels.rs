//! Label generation API handlers.
//!
//! Both generation endpoints take a multipart form with an `orders` workbook
//! and an optional `logo` image. Only `/api/labels` runs the whole pipeline;
//! the preview renders the first row alone.

use axum::{
    extract::{Multipart, State},
    http::{HeaderName, StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    archive::ARCHIVE_FILE_NAME,
    batch::{self, LabelRun},
    config::LabelSettings,
    error::LabelError,
    logo::Logo,
    render,
};

use super::super::state::AppState;

const LABEL_COUNT_HEADER: &str = "x-label-count";

/// Files pulled out of a generation request.
#[derive(Debug, Default)]
struct LabelUpload {
    orders: Option<Vec<u8>>,
    logo: Option<Vec<u8>>,
}

/// GET /api/logo - The default logo as PNG.
pub async fn default_logo(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/png")],
        state.default_logo_png.clone(),
    )
}

/// POST /api/labels - Generate all labels and return `labels.zip`.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let run: LabelRun = with_upload(&state, multipart, batch::run).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", ARCHIVE_FILE_NAME),
            ),
            (
                HeaderName::from_static(LABEL_COUNT_HEADER),
                run.label_count.to_string(),
            ),
        ],
        run.archive,
    ))
}

/// POST /api/labels/preview - Render the first label and return it as PNG.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let preview = with_upload(&state, multipart, batch::preview)
        .await?
        .ok_or((StatusCode::BAD_REQUEST, "Spreadsheet has no order rows".to_string()))?;
    let png_bytes = render::to_png(&preview).map_err(error_status)?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes))
}

/// Read the upload, pick the logo and run `job` on a blocking thread.
async fn with_upload<T, F>(state: &Arc<AppState>, multipart: Multipart, job: F) -> Result<T, (StatusCode, String)>
where
    T: Send + 'static,
    F: FnOnce(&[u8], &Logo, &LabelSettings) -> Result<T, LabelError> + Send + 'static,
{
    let upload = read_upload(multipart).await?;
    let orders = upload
        .orders
        .ok_or((StatusCode::BAD_REQUEST, "No orders file uploaded".to_string()))?;

    let default_logo = state.default_logo.clone();
    let settings = state.settings.clone();
    let logo_bytes = upload.logo;

    // Decoding, rendering and zipping are all blocking work
    tokio::task::spawn_blocking(move || -> Result<T, LabelError> {
        let custom = logo_bytes.as_deref().map(Logo::from_bytes).transpose()?;
        let logo = default_logo.or_custom(custom);
        job(&orders, &logo, &settings)
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Processing error: {}", e),
        )
    })?
    .map_err(error_status)
}

async fn read_upload(mut multipart: Multipart) -> Result<LabelUpload, (StatusCode, String)> {
    let mut upload = LabelUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != "orders" && name != "logo" {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read {}: {}", name, e)))?;
        // Browsers send an empty part for a file input left blank
        if bytes.is_empty() {
            continue;
        }
        match name.as_str() {
            "orders" => upload.orders = Some(bytes.to_vec()),
            _ => upload.logo = Some(bytes.to_vec()),
        }
    }

    Ok(upload)
}

fn error_status(e: LabelError) -> (StatusCode, String) {
    let status = if e.is_user_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    tracing::warn!(error = %e, status = status.as_u16(), "label run failed");
    (status, e.to_string())
}
