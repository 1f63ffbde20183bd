//! Integer to Spanish words conversion.

/// Largest value accepted by [`to_words`].
pub const MAX_WORDS: u64 = 999;

/// Largest value accepted by [`to_words_thousands`].
pub const MAX_THOUSANDS: u64 = 999_999;

const UNITS: [&str; 10] = [
    "cero", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve",
];

const TEENS: [&str; 10] = [
    "diez",
    "once",
    "doce",
    "trece",
    "catorce",
    "quince",
    "dieciséis",
    "diecisiete",
    "dieciocho",
    "diecinueve",
];

const TWENTIES: [&str; 10] = [
    "veinte",
    "veintiuno",
    "veintidós",
    "veintitrés",
    "veinticuatro",
    "veinticinco",
    "veintiséis",
    "veintisiete",
    "veintiocho",
    "veintinueve",
];

/// Indexed by the tens digit; 0-2 are covered by the tables above.
const TENS: [&str; 10] = [
    "", "", "veinte", "treinta", "cuarenta", "cincuenta", "sesenta", "setenta", "ochenta",
    "noventa",
];

/// Indexed by the hundreds digit. Index 1 is the bare "cien" form.
const HUNDREDS: [&str; 10] = [
    "",
    "cien",
    "doscientos",
    "trescientos",
    "cuatrocientos",
    "quinientos",
    "seiscientos",
    "setecientos",
    "ochocientos",
    "novecientos",
];

/// A value outside the range a converter can spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no se puede convertir {value} a palabras: solo se admite 0–{max}")]
pub struct NumeralDomainError {
    pub value: i64,
    pub max: u64,
}

/// Spell an integer in 0–999 as Spanish words.
///
/// The result is the neutral counting form ("uno", "veintiuno"); see
/// [`super::masculine_form`] for the apocopated forms used before nouns.
///
/// # Examples
///
/// ```
/// use rumbo_server::numerals::to_words;
///
/// assert_eq!(to_words(35).unwrap(), "treinta y cinco");
/// assert_eq!(to_words(100).unwrap(), "cien");
/// assert_eq!(to_words(101).unwrap(), "ciento uno");
/// assert!(to_words(1000).is_err());
/// ```
pub fn to_words(value: i64) -> Result<String, NumeralDomainError> {
    if !(0..=MAX_WORDS as i64).contains(&value) {
        return Err(NumeralDomainError {
            value,
            max: MAX_WORDS,
        });
    }
    Ok(spell_below_thousand(value as usize))
}

/// Spell an integer in 0–999,999 as Spanish words.
///
/// Exactly one thousand is rendered as bare "mil" rather than "uno mil".
pub fn to_words_thousands(value: i64) -> Result<String, NumeralDomainError> {
    if !(0..=MAX_THOUSANDS as i64).contains(&value) {
        return Err(NumeralDomainError {
            value,
            max: MAX_THOUSANDS,
        });
    }

    let thousands = value / 1000;
    let remainder = value % 1000;

    if thousands == 0 {
        return to_words(remainder);
    }

    let mut words = if thousands == 1 {
        "mil".to_string()
    } else {
        format!("{} mil", to_words(thousands)?)
    };
    if remainder > 0 {
        words.push(' ');
        words.push_str(&to_words(remainder)?);
    }
    Ok(words)
}

fn spell_below_thousand(n: usize) -> String {
    match n {
        0..=9 => UNITS[n].to_string(),
        10..=19 => TEENS[n - 10].to_string(),
        20..=29 => TWENTIES[n - 20].to_string(),
        30..=99 => {
            let (tens, units) = (n / 10, n % 10);
            if units == 0 {
                TENS[tens].to_string()
            } else {
                format!("{} y {}", TENS[tens], UNITS[units])
            }
        }
        100 => HUNDREDS[1].to_string(),
        _ => {
            let (hundreds, rest) = (n / 100, n % 100);
            let prefix = if hundreds == 1 {
                "ciento"
            } else {
                HUNDREDS[hundreds]
            };
            if rest == 0 {
                prefix.to_string()
            } else {
                format!("{} {}", prefix, spell_below_thousand(rest))
            }
        }
    }
}
