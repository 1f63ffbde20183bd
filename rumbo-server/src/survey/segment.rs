//! Rendered segment record.

use serde::{Deserialize, Serialize};

use crate::domain::Bearing;

const ADJACENCY_PREFIX: &str = "Colinda con ";

/// One rendered boundary segment.
///
/// This is also the interchange record handed to the document exporter, so
/// it only holds display text and the numeric distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start station as prose ("doce A")
    pub start_label_text: String,

    /// End station as prose
    pub end_label_text: String,

    /// Bearing in words
    pub bearing_prose: String,

    /// Bearing in the requested compact notation
    pub bearing_compact: String,

    /// Bearing in the conventional compact notation
    #[serde(default)]
    pub bearing_conventional: String,

    /// Distance in metres, if one was given and is a number
    pub distance: Option<f64>,

    /// Distance in words, if the raw distance is a plain decimal
    pub distance_words: Option<String>,

    /// Adjacency clause ("Colinda con ..."), if any
    pub adjacency: Option<String>,

    /// Full sentence for this segment
    pub sentence: String,
}

impl Segment {
    /// Render a segment from its already converted parts.
    pub fn new(
        start_label_text: String,
        end_label_text: String,
        bearing: &Bearing,
        distance: Option<f64>,
        distance_words: Option<String>,
        adjacency_note: &str,
    ) -> Self {
        let mut segment = Self {
            start_label_text,
            end_label_text,
            bearing_prose: bearing.prose(),
            bearing_compact: bearing.compact_requested(),
            bearing_conventional: bearing.compact_conventional(),
            distance,
            distance_words,
            adjacency: adjacency_clause(adjacency_note),
            sentence: String::new(),
        };
        segment.sentence = segment.compose_sentence();
        segment
    }

    /// Distance with two decimals, or an empty string when absent.
    pub fn distance_display(&self) -> String {
        self.distance.map(|d| format!("{d:.2}")).unwrap_or_default()
    }

    fn compose_sentence(&self) -> String {
        let mut sentence = format!(
            "De la estación {} a la estación {}, con rumbo {} ({})",
            self.start_label_text, self.end_label_text, self.bearing_prose, self.bearing_compact
        );

        if let Some(distance) = self.distance {
            sentence.push_str(&format!(", y una distancia de {distance:.2} metros"));
            if let Some(words) = &self.distance_words {
                sentence.push_str(&format!(" ({words})"));
            }
        }
        sentence.push('.');

        if let Some(adjacency) = &self.adjacency {
            sentence.push(' ');
            sentence.push_str(adjacency);
        }
        sentence
    }
}

/// Turn a free-text adjacency note into a sentence.
///
/// Notes that already start with "colinda con" (any case) only get their
/// first letter capitalized; others are prefixed with "Colinda con ". A
/// final period is added when missing. Blank notes yield `None`.
///
/// # Examples
///
/// ```
/// use rumbo_server::survey::adjacency_clause;
///
/// assert_eq!(
///     adjacency_clause("calle pública").as_deref(),
///     Some("Colinda con calle pública.")
/// );
/// assert_eq!(
///     adjacency_clause("colinda con río Blanco.").as_deref(),
///     Some("Colinda con río Blanco.")
/// );
/// assert_eq!(adjacency_clause("  "), None);
/// ```
pub fn adjacency_clause(note: &str) -> Option<String> {
    let note = note.trim();
    if note.is_empty() {
        return None;
    }

    let mut clause = if note.to_lowercase().starts_with(&ADJACENCY_PREFIX.to_lowercase()) {
        capitalize_first(note)
    } else {
        format!("{ADJACENCY_PREFIX}{note}")
    };
    if !clause.ends_with('.') {
        clause.push('.');
    }
    Some(clause)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
