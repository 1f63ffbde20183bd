//! Gender and number agreement for spelled numerals.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static VEINTIUNO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bveintiuno\b").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static Y_UNO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" y uno\b").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static UNO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\buno\b").expect("valid regex"));

/// Rewrite a spelled numeral into the form used before a masculine noun.
///
/// "uno" becomes "un", "veintiuno" becomes "veintiún" and a trailing
/// "y uno" becomes "y un". The specific patterns run before the generic one.
///
/// # Examples
///
/// ```
/// use rumbo_server::numerals::masculine_form;
///
/// assert_eq!(masculine_form("uno"), "un");
/// assert_eq!(masculine_form("veintiuno"), "veintiún");
/// assert_eq!(masculine_form("treinta y uno"), "treinta y un");
/// assert_eq!(masculine_form("dos"), "dos");
/// ```
pub fn masculine_form(phrase: &str) -> String {
    let phrase = VEINTIUNO.replace_all(phrase, "veintiún");
    let phrase = Y_UNO.replace_all(&phrase, " y un");
    UNO.replace_all(&phrase, "un").into_owned()
}

/// Pick the singular noun for exactly one, the plural otherwise.
pub fn pluralize(value: u32, singular: &str) -> String {
    if value == 1 {
        singular.to_string()
    } else {
        format!("{singular}s")
    }
}
