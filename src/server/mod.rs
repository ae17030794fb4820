//! # HTTP Server for Label Generation
//!
//! Provides a web interface for uploading an orders spreadsheet (and
//! optionally a logo) and downloading the generated labels.
//!
//! ## Usage
//!
//! ```bash
//! labelsmith serve --listen 0.0.0.0:8080 --default-logo logo.jpg
//! ```
//!
//! Then open http://localhost:8080 in a browser.
//!
//! ## Routes
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/` | Upload form |
//! | GET | `/api/logo` | Default logo (PNG) |
//! | POST | `/api/labels` | `labels.zip` |
//! | POST | `/api/labels/preview` | First label (PNG) |

mod handlers;
mod state;
mod static_files;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::LabelSettings;
use crate::error::LabelError;

/// Upload size limit for spreadsheets and logos.
const UPLOAD_LIMIT_BYTES: usize = 50 * 1024 * 1024;

/// Start the HTTP server.
///
/// The default logo is loaded before binding; if it is missing the server
/// never starts.
///
/// ## Example
///
/// ```no_run
/// use labelsmith::{LabelSettings, server::{serve, ServerConfig}};
///
/// # async fn example() -> Result<(), labelsmith::LabelError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     default_logo_path: "logo.jpg".into(),
/// };
///
/// serve(config, LabelSettings::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig, settings: LabelSettings) -> Result<(), LabelError> {
    let app_state = Arc::new(AppState::new(config, settings)?);
    let listen_addr = app_state.config.listen_addr.clone();

    println!("Labelsmith HTTP server starting...");
    println!("Listening on: {}", listen_addr);
    println!("Default logo: {}", app_state.config.default_logo_path.display());
    println!();
    println!("Open http://{}/ in your browser to generate labels", listen_addr);
    println!();

    let app = router(app_state);
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Frontend
        .route("/", get(static_files::index_handler))
        .route("/api/logo", get(handlers::labels::default_logo))
        // Label API
        .route(
            "/api/labels",
            post(handlers::labels::generate).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route(
            "/api/labels/preview",
            post(handlers::labels::preview).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
