//! Askama templates for the web frontend.

use askama::Template;

use crate::survey::{Segment, SegmentColumns, SegmentReport};

/// Number of empty rows shown on a fresh form.
pub const BLANK_ROWS: usize = 3;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The single-page form, optionally with the results of a submission.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub app_version: &'static str,
    pub rows: Vec<RowView>,
    pub convert_numbers: bool,
    pub errors: Vec<String>,
    pub result: Option<ResultView>,
    pub docx_available: bool,
}

impl IndexTemplate {
    /// An empty form.
    pub fn blank(app_version: &'static str, docx_available: bool) -> Self {
        Self {
            app_version,
            rows: vec![RowView::default(); BLANK_ROWS],
            convert_numbers: true,
            errors: Vec::new(),
            result: None,
            docx_available,
        }
    }

    /// The form as submitted, plus whatever the assembler produced.
    ///
    /// Errors and results can both be present; rows that failed are
    /// reported while the rest still render.
    pub fn submitted(
        app_version: &'static str,
        docx_available: bool,
        columns: &SegmentColumns,
        convert_numbers: bool,
        report: &SegmentReport,
    ) -> Self {
        let mut rows: Vec<RowView> = columns
            .rows()
            .into_iter()
            .map(|row| RowView {
                start: row.start,
                end: row.end,
                bearing: row.bearing,
                start_cardinal: row.bearing_fields.start_cardinal,
                degrees: row.bearing_fields.degrees,
                minutes: row.bearing_fields.minutes,
                seconds: row.bearing_fields.seconds,
                end_cardinal: row.bearing_fields.end_cardinal,
                distance: row.distance,
                adjacency: row.adjacency,
            })
            .collect();
        if rows.is_empty() {
            rows = vec![RowView::default(); BLANK_ROWS];
        }

        let result = (!report.segments.is_empty()).then(|| ResultView::new(&report.segments));

        Self {
            app_version,
            rows,
            convert_numbers,
            errors: report.error_messages(),
            result,
            docx_available,
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One editable row of the form, echoed back after a submission.
#[derive(Debug, Clone, Default)]
pub struct RowView {
    pub start: String,
    pub end: String,
    pub bearing: String,
    pub start_cardinal: String,
    pub degrees: String,
    pub minutes: String,
    pub seconds: String,
    pub end_cardinal: String,
    pub distance: String,
    pub adjacency: String,
}

/// Rendered output of a submission.
#[derive(Debug, Clone)]
pub struct ResultView {
    pub narrative: Vec<String>,
    pub segments: Vec<SegmentView>,

    /// Serialized segments for the export form.
    pub payload: String,
}

impl ResultView {
    pub fn new(segments: &[Segment]) -> Self {
        let payload = match serde_json::to_string(segments) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize segments for export");
                String::new()
            }
        };

        Self {
            narrative: crate::survey::narrative_lines(segments),
            segments: segments.iter().map(SegmentView::from).collect(),
            payload,
        }
    }
}

/// A segment as shown in the detail table.
#[derive(Debug, Clone)]
pub struct SegmentView {
    pub start: String,
    pub end: String,
    pub bearing: String,
    pub bearing_compact: String,
    pub bearing_conventional: String,
    pub distance: String,
    pub distance_words: String,
    pub adjacency: String,
}

impl From<&Segment> for SegmentView {
    fn from(segment: &Segment) -> Self {
        Self {
            start: segment.start_label_text.clone(),
            end: segment.end_label_text.clone(),
            bearing: segment.bearing_prose.clone(),
            bearing_compact: segment.bearing_compact.clone(),
            bearing_conventional: segment.bearing_conventional.clone(),
            distance: segment.distance_display(),
            distance_words: segment.distance_words.clone().unwrap_or_default(),
            adjacency: segment.adjacency.clone().unwrap_or_default(),
        }
    }
}
