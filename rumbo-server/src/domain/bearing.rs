//! Survey bearing ("rumbo") parsing and formatting.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::numerals::{masculine_form, pluralize, to_words};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CARDINAL_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(norte|sur|este|oeste)\b").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[;|/]+").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CARDINAL_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[NnSsEeOo]").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// Why a bearing text could not be turned into a [`Bearing`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearingParseError {
    /// Nothing to parse
    #[error("rumbo vacío")]
    Empty,

    /// Neither the comma form nor the free form matched
    #[error("no se reconoce el formato del rumbo: {0:?}")]
    Unrecognized(String),

    /// A degree, minute or second field is not an integer
    #[error("valor numérico inválido en el rumbo: {0:?}")]
    InvalidNumber(String),

    /// The first cardinal must be N or S
    #[error("orientación inicial inválida: {0:?} (usa N o S)")]
    InvalidStartCardinal(String),

    /// The last cardinal must be E or O
    #[error("orientación final inválida: {0:?} (usa E u O)")]
    InvalidEndCardinal(String),

    /// Degrees above 359 or minutes/seconds above 59
    #[error("rango inválido: grados 0–359, minutos y segundos 0–59")]
    OutOfRange,
}

/// North/south reference of a bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NorthSouth {
    North,
    South,
}

impl NorthSouth {
    /// Parse a single cardinal letter, case-insensitively.
    pub fn from_letter(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" => Some(Self::North),
            "S" => Some(Self::South),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
        }
    }

    pub fn word(self) -> &'static str {
        match self {
            Self::North => "Norte",
            Self::South => "Sur",
        }
    }
}

/// East/west direction of a bearing. West is written "O" (Oeste).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EastWest {
    East,
    West,
}

impl EastWest {
    /// Parse a single cardinal letter, case-insensitively. "W" is accepted for west.
    pub fn from_letter(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "E" => Some(Self::East),
            "O" | "W" => Some(Self::West),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::East => 'E',
            Self::West => 'O',
        }
    }

    pub fn word(self) -> &'static str {
        match self {
            Self::East => "Este",
            Self::West => "Oeste",
        }
    }
}

/// A validated quadrant bearing, e.g. N 25° 35' 20'' O.
///
/// Degrees are in 0–359, minutes and seconds in 0–59. A `Bearing` can only be
/// obtained through [`Bearing::new`] or [`Bearing::parse`], so any value is
/// within range.
///
/// # Examples
///
/// ```
/// use rumbo_server::domain::Bearing;
///
/// let b = Bearing::parse("N, 25, 35, 20, O").unwrap();
/// assert_eq!(b.compact_conventional(), "N 25° 35' 20'' O");
/// assert_eq!(
///     b.prose(),
///     "Norte veinticinco grados, treinta y cinco minutos, veinte segundos Oeste"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bearing {
    start: NorthSouth,
    degrees: u32,
    minutes: u32,
    seconds: u32,
    end: EastWest,
}

impl Bearing {
    /// Build a bearing from already separated components.
    pub fn new(
        start: NorthSouth,
        degrees: u32,
        minutes: u32,
        seconds: u32,
        end: EastWest,
    ) -> Result<Self, BearingParseError> {
        if degrees > 359 || minutes > 59 || seconds > 59 {
            return Err(BearingParseError::OutOfRange);
        }
        Ok(Self {
            start,
            degrees,
            minutes,
            seconds,
            end,
        })
    }

    /// Parse a bearing typed by a person.
    ///
    /// Accepted shapes include `"N, 25, 35, 20, O"`, `"S 10°0'30'' E"`,
    /// `"Norte 5 5 5 Oeste"` and the output of [`Bearing::compact_requested`].
    /// The comma-delimited form is tried first; a scan for cardinal letters
    /// and digit runs is the fallback.
    pub fn parse(raw: &str) -> Result<Self, BearingParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(BearingParseError::Empty);
        }

        let norm = normalize(raw);
        let (c1, degrees, minutes, seconds, c2) = match split_comma_form(&norm) {
            Some(parts) => parse_comma_form(&parts)?,
            None => parse_free_form(&norm)
                .ok_or_else(|| BearingParseError::Unrecognized(raw.to_string()))?,
        };

        let start = NorthSouth::from_letter(&c1)
            .ok_or(BearingParseError::InvalidStartCardinal(c1))?;
        let end = EastWest::from_letter(&c2).ok_or(BearingParseError::InvalidEndCardinal(c2))?;
        Self::new(start, degrees, minutes, seconds, end)
    }

    /// Build a bearing from separate form fields: two cardinal letters and
    /// the degree, minute and second values. Blank numbers count as zero.
    ///
    /// ```
    /// use rumbo_server::domain::Bearing;
    ///
    /// let b = Bearing::from_fields("s", "10", "", "30", "W").unwrap();
    /// assert_eq!(b.compact_conventional(), "S 10° 0' 30'' O");
    /// ```
    pub fn from_fields(
        start: &str,
        degrees: &str,
        minutes: &str,
        seconds: &str,
        end: &str,
    ) -> Result<Self, BearingParseError> {
        let number = |field: &str| -> Result<u32, BearingParseError> {
            let field = field.trim();
            if field.is_empty() {
                return Ok(0);
            }
            match field.parse::<i64>() {
                Ok(n) => u32::try_from(n).map_err(|_| BearingParseError::OutOfRange),
                Err(_) => Err(BearingParseError::InvalidNumber(field.to_string())),
            }
        };

        let degrees = number(degrees)?;
        let minutes = number(minutes)?;
        let seconds = number(seconds)?;
        let start = NorthSouth::from_letter(start)
            .ok_or_else(|| BearingParseError::InvalidStartCardinal(start.trim().to_string()))?;
        let end = EastWest::from_letter(end)
            .ok_or_else(|| BearingParseError::InvalidEndCardinal(end.trim().to_string()))?;
        Self::new(start, degrees, minutes, seconds, end)
    }

    pub fn start(&self) -> NorthSouth {
        self.start
    }

    pub fn degrees(&self) -> u32 {
        self.degrees
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn end(&self) -> EastWest {
        self.end
    }

    /// Full Spanish prose, e.g. "Norte un grado, cero minutos, veintiún segundos Este".
    pub fn prose(&self) -> String {
        format!(
            "{} {}, {}, {} {}",
            self.start.word(),
            quantity(self.degrees, "grado"),
            quantity(self.minutes, "minuto"),
            quantity(self.seconds, "segundo"),
            self.end.word()
        )
    }

    /// Compact notation in the requested layout: `N ° 25 35´20´O`.
    pub fn compact_requested(&self) -> String {
        format!(
            "{} ° {} {}´{}´{}",
            self.start.letter(),
            self.degrees,
            self.minutes,
            self.seconds,
            self.end.letter()
        )
    }

    /// Conventional compact notation: `N 25° 35' 20'' O`.
    pub fn compact_conventional(&self) -> String {
        format!(
            "{} {}° {}' {}'' {}",
            self.start.letter(),
            self.degrees,
            self.minutes,
            self.seconds,
            self.end.letter()
        )
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compact_conventional())
    }
}

/// "veintiún grados", "un minuto", ...
fn quantity(value: u32, noun: &str) -> String {
    // Components are range-checked at construction, so this never falls back.
    let words = to_words(i64::from(value)).unwrap_or_else(|_| value.to_string());
    format!("{} {}", masculine_form(&words), pluralize(value, noun))
}

/// Canonicalize cardinal words, angle marks, separators and the W alias, in that order.
fn normalize(raw: &str) -> String {
    let norm = CARDINAL_WORDS.replace_all(raw, |caps: &Captures| {
        match caps[1].to_lowercase().as_str() {
            "norte" => "N",
            "sur" => "S",
            "este" => "E",
            _ => "O",
        }
        .to_string()
    });
    let norm = norm
        .replace(['°', 'º'], " ")
        .replace(['’', '´'], "'");
    SEPARATORS
        .replace_all(&norm, " ")
        .replace(['W', 'w'], "O")
}

fn split_comma_form(norm: &str) -> Option<Vec<&str>> {
    let parts: Vec<&str> = norm
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    (parts.len() >= 5).then_some(parts)
}

type RawBearing = (String, u32, u32, u32, String);

fn parse_comma_form(parts: &[&str]) -> Result<RawBearing, BearingParseError> {
    let number = |part: &str| -> Result<u32, BearingParseError> {
        let digits: String = part.chars().filter(char::is_ascii_digit).collect();
        digits
            .parse()
            .map_err(|_| BearingParseError::InvalidNumber(part.to_string()))
    };

    Ok((
        parts[0].to_uppercase(),
        number(parts[1])?,
        number(parts[2])?,
        number(parts[3])?,
        parts[4].to_uppercase(),
    ))
}

fn parse_free_form(norm: &str) -> Option<RawBearing> {
    let cards: Vec<&str> = CARDINAL_LETTER.find_iter(norm).map(|m| m.as_str()).collect();
    let nums: Vec<&str> = DIGIT_RUN.find_iter(norm).map(|m| m.as_str()).collect();
    if nums.len() < 3 || cards.len() < 2 {
        return None;
    }

    Some((
        cards[0].to_uppercase(),
        nums[0].parse().ok()?,
        nums[1].parse().ok()?,
        nums[2].parse().ok()?,
        cards[cards.len() - 1].to_uppercase(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bearing(c1: NorthSouth, d: u32, m: u32, s: u32, c2: EastWest) -> Bearing {
        Bearing::new(c1, d, m, s, c2).unwrap()
    }

    #[test]
    fn parses_comma_form() {
        assert_eq!(
            Bearing::parse("N, 25, 35, 20, O").unwrap(),
            bearing(NorthSouth::North, 25, 35, 20, EastWest::West)
        );
    }

    #[test]
    fn comma_form_strips_marks() {
        assert_eq!(
            Bearing::parse("s, 35°, 12', 7'', e").unwrap(),
            bearing(NorthSouth::South, 35, 12, 7, EastWest::East)
        );
    }

    #[test]
    fn comma_form_with_bad_number_fails() {
        assert_eq!(
            Bearing::parse("N, xx, 35, 20, O"),
            Err(BearingParseError::InvalidNumber("xx".into()))
        );
    }

    #[test]
    fn parse_symbol_form() {
        assert_eq!(
            Bearing::parse("S 10°0'30'' E").unwrap(),
            bearing(NorthSouth::South, 10, 0, 30, EastWest::East)
        );
        assert_eq!(
            Bearing::parse("N 45º 30’ 15´´ W").unwrap(),
            bearing(NorthSouth::North, 45, 30, 15, EastWest::West)
        );
    }

    #[test]
    fn parse_word_cardinals() {
        assert_eq!(
            Bearing::parse("Norte 5 5 5 Oeste").unwrap(),
            bearing(NorthSouth::North, 5, 5, 5, EastWest::West)
        );
        assert_eq!(
            Bearing::parse("SUR 89 59 59 ESTE").unwrap(),
            bearing(NorthSouth::South, 89, 59, 59, EastWest::East)
        );
    }

    #[test]
    fn parse_separators() {
        assert_eq!(
            Bearing::parse("N;12|30/45;E").unwrap(),
            bearing(NorthSouth::North, 12, 30, 45, EastWest::East)
        );
    }

    #[test]
    fn w_is_west() {
        assert_eq!(Bearing::parse("n 1 2 3 w").unwrap().end(), EastWest::West);
        assert_eq!(
            Bearing::parse("N, 1, 2, 3, W").unwrap().end(),
            EastWest::West
        );
    }

    #[test]
    fn parse_garbage_fails() {
        assert_eq!(
            Bearing::parse("garbage"),
            Err(BearingParseError::Unrecognized("garbage".into()))
        );
        assert_eq!(Bearing::parse(""), Err(BearingParseError::Empty));
        assert_eq!(Bearing::parse("   "), Err(BearingParseError::Empty));
        assert!(Bearing::parse("N 10 20 O").is_err());
        assert!(Bearing::parse("10 20 30").is_err());
    }

    #[test]
    fn only_ascii_digits_count() {
        assert_eq!(
            Bearing::parse("N ١ ٢ ٣ E"),
            Err(BearingParseError::Unrecognized("N ١ ٢ ٣ E".into()))
        );
        assert_eq!(
            Bearing::parse("N 1 ٢ 3 4 E"),
            Ok(bearing(NorthSouth::North, 1, 3, 4, EastWest::East))
        );
    }

    #[test]
    fn wrong_axis_cardinals_rejected() {
        assert_eq!(
            Bearing::parse("E 10 20 30 N"),
            Err(BearingParseError::InvalidStartCardinal("E".into()))
        );
        assert_eq!(
            Bearing::parse("N 10 20 30 S"),
            Err(BearingParseError::InvalidEndCardinal("S".into()))
        );
    }

    #[test]
    fn out_of_range_rejected() {
        assert_eq!(
            Bearing::parse("N 360 0 0 E"),
            Err(BearingParseError::OutOfRange)
        );
        assert_eq!(
            Bearing::parse("N 10 60 0 E"),
            Err(BearingParseError::OutOfRange)
        );
        assert_eq!(
            Bearing::parse("N, 10, 0, 60, E"),
            Err(BearingParseError::OutOfRange)
        );
    }

    #[test]
    fn from_fields() {
        assert_eq!(
            Bearing::from_fields("N", "25", "35", "20", "O"),
            Ok(bearing(NorthSouth::North, 25, 35, 20, EastWest::West))
        );
        assert_eq!(
            Bearing::from_fields(" s ", "", " ", "", "e"),
            Ok(bearing(NorthSouth::South, 0, 0, 0, EastWest::East))
        );
        assert_eq!(
            Bearing::from_fields("N", "1.5", "0", "0", "E"),
            Err(BearingParseError::InvalidNumber("1.5".into()))
        );
        assert_eq!(
            Bearing::from_fields("N", "-1", "0", "0", "E"),
            Err(BearingParseError::OutOfRange)
        );
        assert_eq!(
            Bearing::from_fields("N", "0", "60", "0", "E"),
            Err(BearingParseError::OutOfRange)
        );
        assert_eq!(
            Bearing::from_fields("", "1", "2", "3", "E"),
            Err(BearingParseError::InvalidStartCardinal(String::new()))
        );
        assert_eq!(
            Bearing::from_fields("N", "1", "2", "3", "N"),
            Err(BearingParseError::InvalidEndCardinal("N".into()))
        );
    }

    #[test]
    fn prose_agreement() {
        let b = bearing(NorthSouth::North, 1, 0, 21, EastWest::East);
        assert_eq!(
            b.prose(),
            "Norte un grado, cero minutos, veintiún segundos Este"
        );

        let b = bearing(NorthSouth::South, 31, 1, 41, EastWest::West);
        assert_eq!(
            b.prose(),
            "Sur treinta y un grados, un minuto, cuarenta y un segundos Oeste"
        );

        let b = bearing(NorthSouth::North, 21, 2, 2, EastWest::West);
        assert_eq!(
            b.prose(),
            "Norte veintiún grados, dos minutos, dos segundos Oeste"
        );
    }

    #[test]
    fn compact_forms() {
        let b = bearing(NorthSouth::North, 25, 35, 20, EastWest::West);
        assert_eq!(b.compact_requested(), "N ° 25 35´20´O");
        assert_eq!(b.compact_conventional(), "N 25° 35' 20'' O");
        assert_eq!(b.to_string(), "N 25° 35' 20'' O");
    }

    #[test]
    fn conventional_form_parses_back() {
        let b = bearing(NorthSouth::South, 100, 5, 9, EastWest::East);
        assert_eq!(Bearing::parse(&b.compact_conventional()).unwrap(), b);
    }

    #[test]
    fn error_display() {
        assert_eq!(BearingParseError::Empty.to_string(), "rumbo vacío");
        assert_eq!(
            BearingParseError::InvalidStartCardinal("E".into()).to_string(),
            "orientación inicial inválida: \"E\" (usa N o S)"
        );
    }
}
