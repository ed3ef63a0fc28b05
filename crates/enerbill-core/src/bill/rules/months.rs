//! Month abbreviation normalization for history labels and billing dates.

use chrono::NaiveDate;

use super::patterns::DATE_SEPARATOR;

/// Spanish three-letter month abbreviations, January first.
pub const MONTHS: [&str; 12] = [
    "ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SEP", "OCT", "NOV", "DIC",
];

/// Month number (1-12) for an abbreviation, case-insensitive.
pub fn month_number(abbr: &str) -> Option<u32> {
    let abbr = abbr.trim().to_uppercase();
    MONTHS
        .iter()
        .position(|m| *m == abbr)
        .map(|i| i as u32 + 1)
}

/// Canonical `MM/YYYY` for a month and a year token (`23` or `2023`).
pub fn month_year(month: u32, year: &str) -> Option<String> {
    let year = parse_year(year)?;
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.format("%m/%Y").to_string())
}

/// Normalize a dated history label such as `ENE/23` to `01/2023`.
pub fn normalize_label(label: &str) -> Option<String> {
    let (month, year) = label.trim().split_once('/')?;
    month_year(month_number(month)?, year)
}

/// Normalize a billing date such as `AGO-23` or `15-AGO-23` to `08/2023`.
///
/// The first token that is a month abbreviation gives the month, the last
/// token gives the year.
pub fn normalize_billing_date(date: &str) -> Option<String> {
    let tokens: Vec<&str> = DATE_SEPARATOR
        .split(date.trim())
        .filter(|t| !t.is_empty())
        .collect();

    let month_pos = tokens.iter().position(|t| month_number(t).is_some())?;
    let year_pos = tokens.len() - 1;
    if year_pos == month_pos {
        return None;
    }

    month_year(month_number(tokens[month_pos])?, tokens[year_pos])
}

/// Parse the leading digits of a year token. Two-digit years are 20YY.
fn parse_year(token: &str) -> Option<i32> {
    let digits: String = token
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.len() {
        2 => digits.parse::<i32>().ok().map(|y| 2000 + y),
        4 => digits.parse().ok(),
        _ => None,
    }
}
