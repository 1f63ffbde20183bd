//! Web layer for the survey prose generator.
//!
//! Serves the multi-row form, a JSON variant of it, and DOCX downloads.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{APP_VERSION, AppError, DOCX_MIME, create_router};
pub use state::AppState;
pub use templates::*;
