//! Request handlers.
//!
//! | Method | Path                 | Operation                          |
//! |--------|----------------------|------------------------------------|
//! | GET    | `/api/files`         | `list_pages`                       |
//! | GET    | `/api/config`        | `get_config`                       |
//! | GET    | `/api/pages`         | `list_with_status`                 |
//! | POST   | `/api/toggle-status` | `apply_snapshot`                   |
//! | POST   | `/api/toggle`        | `toggle`                           |
//! | POST   | `/api/save`          | `save` (multipart form)            |
//! | POST   | `/api/delete`        | `delete`                           |
//! | GET    | `/pages/:filename`   | `read_page`                        |
//! | GET    | `/healthz`           | liveness                           |
//!
//! Listings, the config and page bodies are served with caching disabled so
//! the editor and the display always see what is on disk.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::header::{HeaderName, CACHE_CONTROL, CONTENT_TYPE, EXPIRES, PRAGMA};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rotation_core::{PageConfig, PageStatus};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::application::{ErrorKind, PageError, PageLifecycle, PageListing};

/// Largest accepted save request.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const NO_CACHE: [(HeaderName, &str); 3] = [
    (CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (PRAGMA, "no-cache"),
    (EXPIRES, "0"),
];

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Builds the editor router around a shared coordinator.
pub fn router(lifecycle: Arc<PageLifecycle>) -> Router {
    Router::new()
        .route("/api/files", get(list_files))
        .route("/api/config", get(get_config))
        .route("/api/pages", get(list_pages))
        .route("/api/toggle-status", post(toggle_status))
        .route("/api/toggle", post(toggle))
        .route("/api/save", post(save_page))
        .route("/api/delete", post(delete_page))
        .route("/pages/:filename", get(serve_page))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(lifecycle)
}

// ── Bodies ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ToggleStatusRequest {
    filename: String,
    config: PageConfig,
}

#[derive(Debug, Deserialize)]
struct FilenameRequest {
    filename: String,
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    rubbish: String,
    config_pruned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    kind: ErrorKind,
    message: String,
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: ErrorKind::InvalidInput,
            message: message.into(),
        }
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::IoFailure | ErrorKind::DecodeFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        let kind = err.kind();
        let status = status_for(kind);
        if status.is_server_error() {
            error!(error = %err, "request failed");
        }
        Self {
            status,
            kind,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            kind: self.kind,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn list_files(State(lifecycle): State<Arc<PageLifecycle>>) -> Result<Response, ApiError> {
    let files = lifecycle.list_pages().await?;
    Ok((NO_CACHE, Json(files)).into_response())
}

async fn get_config(State(lifecycle): State<Arc<PageLifecycle>>) -> Result<Response, ApiError> {
    let config = lifecycle.get_config().await?;
    Ok((NO_CACHE, Json(config)).into_response())
}

async fn list_pages(State(lifecycle): State<Arc<PageLifecycle>>) -> Result<Response, ApiError> {
    let listing: Vec<PageListing> = lifecycle.list_with_status().await?;
    Ok((NO_CACHE, Json(listing)).into_response())
}

async fn toggle_status(
    State(lifecycle): State<Arc<PageLifecycle>>,
    Json(request): Json<ToggleStatusRequest>,
) -> Result<StatusCode, ApiError> {
    lifecycle
        .apply_snapshot(&request.filename, request.config)
        .await?;
    Ok(StatusCode::OK)
}

async fn toggle(
    State(lifecycle): State<Arc<PageLifecycle>>,
    Json(request): Json<FilenameRequest>,
) -> Result<Json<PageStatus>, ApiError> {
    let status = lifecycle.toggle(&request.filename).await?;
    Ok(Json(status))
}

async fn save_page(
    State(lifecycle): State<Arc<PageLifecycle>>,
    mut multipart: Multipart,
) -> Result<StatusCode, ApiError> {
    let mut filename = String::new();
    let mut content = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(format!("malformed form: {err}")))?
    {
        match field.name().map(str::to_owned).as_deref() {
            Some("filename") => {
                filename = field
                    .text()
                    .await
                    .map_err(|err| ApiError::bad_request(format!("unreadable filename: {err}")))?;
            }
            Some("content") => {
                content = field
                    .bytes()
                    .await
                    .map_err(|err| ApiError::bad_request(format!("unreadable content: {err}")))?
                    .to_vec();
            }
            _ => {}
        }
    }

    // A missing field behaves like an empty one: no filename is rejected by
    // the name rules, no content saves an empty page.
    lifecycle.save(&filename, &content).await?;
    Ok(StatusCode::OK)
}

async fn delete_page(
    State(lifecycle): State<Arc<PageLifecycle>>,
    Json(request): Json<FilenameRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let outcome = lifecycle.delete(&request.filename).await?;
    Ok(Json(DeleteResponse {
        rubbish: outcome.rubbish_path.display().to_string(),
        config_pruned: outcome.config_pruned(),
        warning: outcome.prune_error.map(|err| err.to_string()),
    }))
}

async fn serve_page(
    State(lifecycle): State<Arc<PageLifecycle>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let body = lifecycle.read_page(&filename).await?;
    Ok((NO_CACHE, [(CONTENT_TYPE, HTML_CONTENT_TYPE)], body).into_response())
}

async fn healthz() -> &'static str {
    "ok"
}
