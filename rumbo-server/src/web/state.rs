//! Application state for the web layer.

use std::sync::Arc;

use crate::export::{DocxExporter, ExportCapability};

/// Shared application state.
///
/// Everything here is read-only; each request works on its own data.
#[derive(Clone)]
pub struct AppState {
    /// Document exporter with the header branding loaded at startup
    pub exporter: Arc<DocxExporter>,

    /// Whether DOCX export is offered, decided once at startup
    pub export: ExportCapability,
}

impl AppState {
    /// Create a new app state.
    pub fn new(exporter: DocxExporter, export: ExportCapability) -> Self {
        Self {
            exporter: Arc::new(exporter),
            export,
        }
    }
}
