//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::survey::{Segment, SegmentColumns, SegmentInput, SegmentReport};

/// Form field names for the repeated per-row inputs.
pub const FIELD_START: &str = "est_ini";
pub const FIELD_END: &str = "est_fin";
pub const FIELD_BEARING: &str = "rumbo";
pub const FIELD_DISTANCE: &str = "distancia";
pub const FIELD_ADJACENCY: &str = "colindancia";
pub const FIELD_START_CARDINAL: &str = "card1";
pub const FIELD_DEGREES: &str = "grados";
pub const FIELD_MINUTES: &str = "minutos";
pub const FIELD_SECONDS: &str = "segundos";
pub const FIELD_END_CARDINAL: &str = "card2";
pub const FIELD_CONVERT: &str = "convertir";

/// The multi-row form as submitted by the browser.
///
/// Each row field is repeated once per row, so the body is read as raw
/// key/value pairs and split into columns here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentForm {
    pub columns: SegmentColumns,

    /// Spell station numbers in words. Defaults to on when the field is absent.
    pub convert_numbers: bool,
}

impl SegmentForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut columns = SegmentColumns::default();
        let mut convert_numbers = true;

        for (key, value) in pairs {
            match key.as_str() {
                FIELD_START => columns.start_labels.push(value),
                FIELD_END => columns.end_labels.push(value),
                FIELD_BEARING => columns.bearings.push(value),
                FIELD_DISTANCE => columns.distances.push(value),
                FIELD_ADJACENCY => columns.adjacencies.push(value),
                FIELD_START_CARDINAL => columns.start_cardinals.push(value),
                FIELD_DEGREES => columns.degrees.push(value),
                FIELD_MINUTES => columns.minutes.push(value),
                FIELD_SECONDS => columns.seconds.push(value),
                FIELD_END_CARDINAL => columns.end_cardinals.push(value),
                FIELD_CONVERT => convert_numbers = value.trim() == "on",
                _ => {}
            }
        }

        Self {
            columns,
            convert_numbers,
        }
    }
}

/// Export form: the JSON segment list produced by a previous submission.
#[derive(Debug, Deserialize)]
pub struct ExportForm {
    #[serde(default)]
    pub segmentos: String,
}

/// JSON request to render a report.
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    /// Input rows, in order
    #[serde(default)]
    pub rows: Vec<SegmentInput>,

    /// Spell station numbers in words
    #[serde(default = "default_true")]
    pub convertir: bool,
}

fn default_true() -> bool {
    true
}

/// JSON response with the rendered report.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// Rendered segments
    pub segments: Vec<Segment>,

    /// One numbered line per segment
    pub narrative: Vec<String>,

    /// Row error messages
    pub errors: Vec<String>,
}

impl ReportResponse {
    pub fn from_report(report: &SegmentReport) -> Self {
        Self {
            segments: report.segments.clone(),
            narrative: report.narrative_lines(),
            errors: report.error_messages(),
        }
    }
}

/// Version and DOCX availability.
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
    pub docx: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
