//! Common regex patterns for bill extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Dated history label, strict form: "ENE/23"
    pub static ref MONTH_LABEL_STRICT: Regex = Regex::new(
        r"^[A-Z]{3}/[0-9]{2}.*"
    ).unwrap();

    // Looser form tolerating truncated or long month names: "SEPT/23", "/23"
    pub static ref MONTH_LABEL_LOOSE: Regex = Regex::new(
        r"^[A-Z]*/[0-9]{2}.*"
    ).unwrap();

    // Separators inside a billing date: "15-AGO-23", "AGO/2023", "Periodo AGO 23"
    pub static ref DATE_SEPARATOR: Regex = Regex::new(
        r"[-/\s]+"
    ).unwrap();

    // Runs of whitespace, collapsed when comparing header phrases
    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).unwrap();

    // Bare numeric value as printed in the values band: "152", "1.234,5"
    pub static ref NUMERIC_VALUE: Regex = Regex::new(
        r"^\d{1,3}(?:[.,\s]?\d{3})*(?:[.,]\d+)?$"
    ).unwrap();
}

/// Collapse whitespace runs and lowercase, for loose phrase comparison.
pub fn normalize_phrase(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").to_lowercase()
}
