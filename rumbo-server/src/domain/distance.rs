//! Distances in metres: spelled-out form and numeric value.
//!
//! The two conversions are independent. [`distance_to_words`] accepts only a
//! plain unsigned decimal, while [`parse_distance`] uses float parsing, so
//! inputs such as `"1e2"` have a numeric value but no words form.

use std::sync::LazyLock;

use regex::Regex;

use crate::numerals::{MAX_THOUSANDS, MAX_WORDS, NumeralDomainError, to_words, to_words_thousands};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?<int>[0-9]+)(?:\.(?<frac>[0-9]+))?$").expect("valid regex"));

/// A distance that is not a usable non-negative number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("distancia inválida: {0:?}")]
pub struct InvalidDistance(pub String);

/// Spell a decimal distance, e.g. `"10.15"` → `"diez punto quince metros"`.
///
/// Either `.` or `,` is accepted as the decimal separator. Returns `None` when
/// the input is not an unsigned decimal. Integer parts above 999,999 and
/// fractional parts above 999 are emitted as digits.
///
/// # Examples
///
/// ```
/// use rumbo_server::domain::distance_to_words;
///
/// assert_eq!(distance_to_words("10.15").as_deref(), Some("diez punto quince metros"));
/// assert_eq!(distance_to_words("10,00").as_deref(), Some("diez metros"));
/// assert_eq!(distance_to_words("abc"), None);
/// ```
pub fn distance_to_words(raw: &str) -> Option<String> {
    let text = raw.trim().replace(',', ".");
    let caps = DECIMAL.captures(&text)?;

    let int_digits = &caps["int"];
    let int_words = spell_or_digits(int_digits, MAX_THOUSANDS, to_words_thousands);

    let frac_digits = caps
        .name("frac")
        .map(|m| m.as_str().trim_end_matches('0'))
        .unwrap_or("");
    if frac_digits.is_empty() {
        return Some(format!("{int_words} metros"));
    }

    let frac_words = spell_or_digits(frac_digits, MAX_WORDS, to_words);
    Some(format!("{int_words} punto {frac_words} metros"))
}

/// Parse the numeric value of a distance.
///
/// Blank input means no distance was given and yields `Ok(None)`. A comma is
/// read as the decimal separator. Negative and non-finite values are rejected.
pub fn parse_distance(raw: &str) -> Result<Option<f64>, InvalidDistance> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }

    match text.replace(',', ".").parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
        _ => Err(InvalidDistance(text.to_string())),
    }
}

fn spell_or_digits(
    digits: &str,
    max: u64,
    spell: fn(i64) -> Result<String, NumeralDomainError>,
) -> String {
    digits
        .parse::<u64>()
        .ok()
        .filter(|&n| n <= max)
        .and_then(|n| spell(n as i64).ok())
        .unwrap_or_else(|| digits.to_string())
}
