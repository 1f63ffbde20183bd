//! Station label ("estación") tokenizing.

use tracing::debug;

use crate::numerals::to_words;

/// A station label split into its numeric and letter parts.
///
/// Labels are an optional run of ASCII digits followed by an optional run of
/// ASCII letters ("12", "7B", "A"). Anything else does not tokenize and is
/// shown to the user exactly as typed.
///
/// # Examples
///
/// ```
/// use rumbo_server::domain::StationLabel;
///
/// let label = StationLabel::parse("12a").unwrap();
/// assert_eq!(label.number(), Some(12));
/// assert_eq!(label.letters(), Some("A"));
/// assert_eq!(label.to_text(true), "doce A");
/// assert_eq!(label.to_text(false), "12 A");
///
/// assert!(StationLabel::parse("E-1").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationLabel {
    raw: String,
    digits: Option<String>,
    number: Option<u64>,
    letters: Option<String>,
}

impl StationLabel {
    /// Tokenize a trimmed label. Returns `None` when the label is not
    /// digits-then-letters.
    pub fn parse(s: &str) -> Option<Self> {
        let raw = s.trim();
        let split = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());
        let (digits, letters) = raw.split_at(split);

        if !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }

        let number = if digits.is_empty() {
            None
        } else {
            Some(digits.parse::<u64>().ok()?)
        };

        Some(Self {
            raw: raw.to_string(),
            digits: (!digits.is_empty()).then(|| digits.to_string()),
            number,
            letters: (!letters.is_empty()).then(|| letters.to_ascii_uppercase()),
        })
    }

    /// The numeric part, if any.
    pub fn number(&self) -> Option<u64> {
        self.number
    }

    /// The letter part, uppercased, if any.
    pub fn letters(&self) -> Option<&str> {
        self.letters.as_deref()
    }

    /// Render the label for prose.
    ///
    /// With `convert_numbers` the numeric part is spelled out; numbers that
    /// cannot be spelled (above 999) are kept as digits.
    pub fn to_text(&self, convert_numbers: bool) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(2);

        if let (Some(digits), Some(number)) = (&self.digits, self.number) {
            let rendered = if convert_numbers {
                i64::try_from(number)
                    .ok()
                    .and_then(|n| match to_words(n) {
                        Ok(words) => Some(words),
                        Err(e) => {
                            debug!(label = %self.raw, error = %e, "keeping label digits");
                            None
                        }
                    })
                    .unwrap_or_else(|| digits.clone())
            } else {
                digits.clone()
            };
            parts.push(rendered);
        }
        if let Some(letters) = &self.letters {
            parts.push(letters.clone());
        }

        if parts.is_empty() {
            self.raw.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// Render a raw station label for prose, falling back to the trimmed input
/// when it does not tokenize.
pub fn label_to_text(label: &str, convert_numbers: bool) -> String {
    match StationLabel::parse(label) {
        Some(parsed) => parsed.to_text(convert_numbers),
        None => label.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_and_letters() {
        assert_eq!(label_to_text("7B", true), "siete B");
        assert_eq!(label_to_text("12a", true), "doce A");
        assert_eq!(label_to_text("21", true), "veintiuno");
        assert_eq!(label_to_text("A", true), "A");
        assert_eq!(label_to_text("ab", false), "AB");
    }

    #[test]
    fn literal_digits_when_not_converting() {
        assert_eq!(label_to_text("7B", false), "7 B");
        assert_eq!(label_to_text("0012", false), "0012");
    }

    #[test]
    fn leading_zeros_are_spelled_by_value() {
        assert_eq!(label_to_text("007", true), "siete");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(label_to_text("  3c ", true), "tres C");
    }

    #[test]
    fn non_matching_labels_are_verbatim() {
        assert_eq!(label_to_text("E-1", true), "E-1");
        assert_eq!(label_to_text("B12", true), "B12");
        assert_eq!(label_to_text("P 1", true), "P 1");
        assert_eq!(label_to_text(" PI-3 ", true), "PI-3");
    }

    #[test]
    fn empty_label() {
        assert_eq!(label_to_text("", true), "");
        assert_eq!(label_to_text("   ", true), "");
    }

    #[test]
    fn large_numbers_keep_digits() {
        assert_eq!(label_to_text("1500", true), "1500");
        assert_eq!(label_to_text("1500Z", true), "1500 Z");
    }

    #[test]
    fn overflowing_digits_are_verbatim() {
        let huge = "99999999999999999999999";
        assert!(StationLabel::parse(huge).is_none());
        assert_eq!(label_to_text(huge, true), huge);
    }

    #[test]
    fn accessors() {
        let label = StationLabel::parse("45").unwrap();
        assert_eq!(label.number(), Some(45));
        assert_eq!(label.letters(), None);

        let label = StationLabel::parse("bm").unwrap();
        assert_eq!(label.number(), None);
        assert_eq!(label.letters(), Some("BM"));
    }
}
