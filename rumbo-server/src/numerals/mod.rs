//! Spanish numerals for survey prose.
//!
//! Integers are spelled out in their neutral (counting) form by [`to_words`]
//! and [`to_words_thousands`]. Callers that place a numeral before a
//! masculine noun ("grado", "minuto", "segundo") run the result through
//! [`masculine_form`] and pick the noun with [`pluralize`].

mod agreement;
mod words;

pub use agreement::{masculine_form, pluralize};
pub use words::{MAX_THOUSANDS, MAX_WORDS, NumeralDomainError, to_words, to_words_thousands};
