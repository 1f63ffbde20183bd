//! DOCX export of a segment report.
//!
//! The exporter receives the rendered [`Segment`] list as JSON (the same
//! records the form shows) and produces an Office Open XML document with a
//! branded header, a timestamp, the narrative summary and a detail table.
//!
//! Whether export is offered at all is decided once at startup and carried
//! around as an [`ExportCapability`] value.

mod docx;
mod ooxml;

pub use docx::{DocxExporter, Logo};

use thiserror::Error;

use crate::survey::Segment;

/// Errors that can occur while exporting a report.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("la exportación a DOCX no está disponible en este servidor")]
    Unavailable,
    #[error("datos de exportación inválidos: {0}")]
    Payload(#[source] serde_json::Error),
    #[error("No hay redacción para exportar. Genera la redacción primero.")]
    Empty,
    #[error("logo inválido: {0}")]
    InvalidLogo(&'static str),
    #[error("failed to read logo: {0}")]
    LogoIo(#[source] std::io::Error),
    #[error("logo inválido: {0}")]
    LogoDecode(#[source] image::ImageError),
    #[error("failed to assemble DOCX package: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("failed to write DOCX part: {0}")]
    Write(#[from] std::io::Error),
}

/// Whether this server can produce DOCX documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportCapability {
    Available,
    Unavailable,
}

impl ExportCapability {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::Available
        } else {
            Self::Unavailable
        }
    }

    pub fn is_available(self) -> bool {
        self == Self::Available
    }

    /// Fail with [`ExportError::Unavailable`] unless export is enabled.
    pub fn ensure_available(self) -> Result<(), ExportError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(ExportError::Unavailable)
        }
    }
}

/// Result of a successful export.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Decode the JSON segment list posted back by the form.
pub fn parse_payload(json: &str) -> Result<Vec<Segment>, ExportError> {
    let segments: Vec<Segment> = serde_json::from_str(json).map_err(ExportError::Payload)?;
    if segments.is_empty() {
        return Err(ExportError::Empty);
    }
    Ok(segments)
}

/// Download name, e.g. `Redaccion_unoA_dosB.docx`.
///
/// Uses the first segment's start and the last segment's end station, keeping
/// only ASCII letters, digits, `-` and `_` so the name is header-safe.
pub fn export_filename(segments: &[Segment]) -> String {
    let first = segments
        .first()
        .map(|s| sanitize_filename(&s.start_label_text))
        .unwrap_or_default();
    let last = segments
        .last()
        .map(|s| sanitize_filename(&s.end_label_text))
        .unwrap_or_default();

    if first.is_empty() && last.is_empty() {
        "Redaccion.docx".to_string()
    } else {
        format!("Redaccion_{first}_{last}.docx")
    }
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}
