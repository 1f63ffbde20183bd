//! HTTP route handlers.

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tower_http::services::ServeDir;

use crate::export::{ExportError, parse_payload};
use crate::survey::assemble;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MIME type of an Office Open XML word-processing document.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page).post(submit_form))
        .route("/descargar", post(download_docx))
        .route("/api/redaccion", post(render_report))
        .route("/_version", get(version))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn version(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: APP_VERSION,
        docx: state.export.is_available(),
    })
}

fn render_page(template: IndexTemplate) -> Html<String> {
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Index page with an empty form.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    render_page(IndexTemplate::blank(
        APP_VERSION,
        state.export.is_available(),
    ))
}

/// Form submission: assemble the rows and re-render the page with results.
async fn submit_form(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> impl IntoResponse {
    let form = SegmentForm::from_pairs(pairs);
    let report = assemble(form.columns.rows(), form.convert_numbers);

    tracing::info!(
        rows = form.columns.len(),
        segments = report.segments.len(),
        errors = report.errors.len(),
        "assembled segments"
    );
    if report.has_errors() {
        tracing::debug!(errors = ?report.error_messages(), "rows with errors");
    }

    render_page(IndexTemplate::submitted(
        APP_VERSION,
        state.export.is_available(),
        &form.columns,
        form.convert_numbers,
        &report,
    ))
}

/// JSON variant of the form submission.
async fn render_report(Json(req): Json<ReportRequest>) -> Json<ReportResponse> {
    let report = assemble(req.rows, req.convertir);
    Json(ReportResponse::from_report(&report))
}

/// Build a DOCX from a previously rendered segment list.
async fn download_docx(
    State(state): State<AppState>,
    Form(form): Form<ExportForm>,
) -> Result<Response, AppError> {
    state.export.ensure_available()?;

    let segments = parse_payload(&form.segmentos)?;
    let document = state
        .exporter
        .render(&segments, Local::now().naive_local())?;

    tracing::info!(
        filename = %document.filename,
        segments = segments.len(),
        bytes = document.bytes.len(),
        "exported document"
    );

    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::Unavailable => AppError::Unavailable {
                message: e.to_string(),
            },
            ExportError::Payload(_) | ExportError::Empty => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, "{message}");
        } else {
            tracing::warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
