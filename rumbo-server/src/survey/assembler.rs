//! Row-by-row segment assembly with station auto-chaining.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::segment::Segment;
use crate::domain::{Bearing, BearingParseError, distance_to_words, label_to_text, parse_distance};

/// One row of raw user input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentInput {
    pub start: String,
    pub end: String,

    /// Bearing as free text. Takes precedence over `bearing_fields`.
    pub bearing: String,

    /// Bearing entered component by component, used when `bearing` is blank.
    pub bearing_fields: BearingFields,

    pub distance: String,
    pub adjacency: String,
}

impl SegmentInput {
    /// Every text field and every bearing component is blank.
    pub fn is_blank(&self) -> bool {
        [
            &self.start,
            &self.end,
            &self.bearing,
            &self.distance,
            &self.adjacency,
        ]
        .iter()
        .all(|f| f.trim().is_empty())
            && self.bearing_fields.is_blank()
    }
}

/// A bearing split into its five form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BearingFields {
    pub start_cardinal: String,
    pub degrees: String,
    pub minutes: String,
    pub seconds: String,
    pub end_cardinal: String,
}

impl BearingFields {
    pub fn is_blank(&self) -> bool {
        [
            &self.start_cardinal,
            &self.degrees,
            &self.minutes,
            &self.seconds,
            &self.end_cardinal,
        ]
        .iter()
        .all(|f| f.trim().is_empty())
    }

    pub fn to_bearing(&self) -> Result<Bearing, BearingParseError> {
        Bearing::from_fields(
            &self.start_cardinal,
            &self.degrees,
            &self.minutes,
            &self.seconds,
            &self.end_cardinal,
        )
    }
}

/// Parallel input columns as submitted by the form.
///
/// Columns may have different lengths; missing cells read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentColumns {
    pub start_labels: Vec<String>,
    pub end_labels: Vec<String>,
    pub bearings: Vec<String>,
    pub distances: Vec<String>,
    pub adjacencies: Vec<String>,
    pub start_cardinals: Vec<String>,
    pub degrees: Vec<String>,
    pub minutes: Vec<String>,
    pub seconds: Vec<String>,
    pub end_cardinals: Vec<String>,
}

impl SegmentColumns {
    /// Number of rows, i.e. the length of the longest column.
    pub fn len(&self) -> usize {
        [
            self.start_labels.len(),
            self.end_labels.len(),
            self.bearings.len(),
            self.distances.len(),
            self.adjacencies.len(),
            self.start_cardinals.len(),
            self.degrees.len(),
            self.minutes.len(),
            self.seconds.len(),
            self.end_cardinals.len(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zip the columns into rows, padding short columns with empty strings.
    pub fn rows(&self) -> Vec<SegmentInput> {
        let cell = |col: &[String], i: usize| {
            col.get(i)
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };
        (0..self.len())
            .map(|i| SegmentInput {
                start: cell(&self.start_labels, i),
                end: cell(&self.end_labels, i),
                bearing: cell(&self.bearings, i),
                bearing_fields: BearingFields {
                    start_cardinal: cell(&self.start_cardinals, i),
                    degrees: cell(&self.degrees, i),
                    minutes: cell(&self.minutes, i),
                    seconds: cell(&self.seconds, i),
                    end_cardinal: cell(&self.end_cardinals, i),
                },
                distance: cell(&self.distances, i),
                adjacency: cell(&self.adjacencies, i),
            })
            .collect()
    }
}

/// A problem with one input row. `row` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("Tramo {row}: ingresa ambas estaciones (inicio y fin).")]
    MissingStations { row: usize },

    #[error("Tramo {row}: no pude interpretar el rumbo «{raw}». Revisa el formato.")]
    UnparseableBearing { row: usize, raw: String },

    #[error("Tramo {row}: orientaciones inválidas. Usa N/S y E/O.")]
    InvalidCardinals { row: usize },

    #[error("Tramo {row}: rango inválido para grados (0–359), minutos/segundos (0–59).")]
    BearingOutOfRange { row: usize },

    /// A separately entered degree, minute or second is not an integer
    #[error("Tramo {row}: grados/minutos/segundos deben ser números enteros.")]
    NonIntegerComponents { row: usize },

    #[error("Tramo {row}: la distancia «{raw}» no es un número válido.")]
    InvalidDistance { row: usize, raw: String },

    /// Nothing was entered at all
    #[error("Agrega al menos un tramo.")]
    NoSegments,
}

impl RowError {
    /// The 1-based row this error refers to, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            RowError::MissingStations { row }
            | RowError::UnparseableBearing { row, .. }
            | RowError::InvalidCardinals { row }
            | RowError::BearingOutOfRange { row }
            | RowError::NonIntegerComponents { row }
            | RowError::InvalidDistance { row, .. } => Some(*row),
            RowError::NoSegments => None,
        }
    }
}

/// Result of assembling one request's rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentReport {
    pub segments: Vec<Segment>,
    pub errors: Vec<RowError>,
}

impl SegmentReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// One numbered line per segment: "Tramo 1: De la estación ...".
    pub fn narrative_lines(&self) -> Vec<String> {
        narrative_lines(&self.segments)
    }

    /// The narrative lines joined with newlines.
    pub fn narrative(&self) -> String {
        self.narrative_lines().join("\n")
    }

    /// Human-readable error messages in row order.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Numbered narrative lines for a list of segments.
pub(crate) fn narrative_lines(segments: &[Segment]) -> Vec<String> {
    segments
        .iter()
        .enumerate()
        .map(|(i, s)| format!("Tramo {}: {}", i + 1, s.sentence))
        .collect()
}

/// Assemble segments from rows of raw input.
///
/// Blank rows are skipped without touching the chain. An empty start station
/// inherits the previous row's end station. Rows with missing stations or an
/// unreadable bearing are reported and skipped; a bad distance is reported
/// but the segment is still built without a numeric distance.
pub fn assemble<I>(rows: I, convert_numbers: bool) -> SegmentReport
where
    I: IntoIterator<Item = SegmentInput>,
{
    let mut report = SegmentReport::default();
    let mut previous_end = String::new();

    for (i, input) in rows.into_iter().enumerate() {
        let row = i + 1;
        if input.is_blank() {
            debug!(row, "skipping blank row");
            continue;
        }

        let mut start = input.start.trim().to_string();
        let end = input.end.trim().to_string();
        if start.is_empty() && !previous_end.is_empty() {
            debug!(row, station = %previous_end, "chaining start station");
            start = previous_end.clone();
        }

        let outcome = build_row(row, &start, &end, &input, convert_numbers, &mut report.errors);
        if let Some(segment) = outcome {
            report.segments.push(segment);
        }
        previous_end = end;
    }

    if report.segments.is_empty() && report.errors.is_empty() {
        report.errors.push(RowError::NoSegments);
    }
    report
}

fn build_row(
    row: usize,
    start: &str,
    end: &str,
    input: &SegmentInput,
    convert_numbers: bool,
    errors: &mut Vec<RowError>,
) -> Option<Segment> {
    if start.is_empty() || end.is_empty() {
        errors.push(RowError::MissingStations { row });
        return None;
    }

    let bearing = match read_bearing(input) {
        Ok(bearing) => bearing,
        Err(e) => {
            warn!(row, error = %e, "unusable bearing");
            errors.push(row_bearing_error(row, input, e));
            return None;
        }
    };

    let distance = match parse_distance(&input.distance) {
        Ok(distance) => distance,
        Err(e) => {
            debug!(row, error = %e, "distance is not a number");
            errors.push(RowError::InvalidDistance { row, raw: e.0 });
            None
        }
    };
    let distance_words = distance_to_words(&input.distance);

    Some(Segment::new(
        label_to_text(start, convert_numbers),
        label_to_text(end, convert_numbers),
        &bearing,
        distance,
        distance_words,
        &input.adjacency,
    ))
}

/// Free text wins; the separate fields are the fallback.
fn read_bearing(input: &SegmentInput) -> Result<Bearing, BearingParseError> {
    let text = input.bearing.trim();
    if text.is_empty() && !input.bearing_fields.is_blank() {
        input.bearing_fields.to_bearing()
    } else {
        Bearing::parse(text)
    }
}

fn row_bearing_error(row: usize, input: &SegmentInput, error: BearingParseError) -> RowError {
    match error {
        BearingParseError::OutOfRange => RowError::BearingOutOfRange { row },
        BearingParseError::InvalidStartCardinal(_) | BearingParseError::InvalidEndCardinal(_) => {
            RowError::InvalidCardinals { row }
        }
        BearingParseError::InvalidNumber(_) if input.bearing.trim().is_empty() => {
            RowError::NonIntegerComponents { row }
        }
        _ => RowError::UnparseableBearing {
            row,
            raw: input.bearing.trim().to_string(),
        },
    }
}
