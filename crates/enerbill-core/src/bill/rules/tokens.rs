//! Split-and-trim primitives shared by the anchor and table rules.

use crate::models::config::Extract;

/// Split `text` on `separator` and return the trimmed token at `index`.
///
/// Returns `None` when the token does not exist or is blank.
pub fn split_token(text: &str, separator: &str, index: usize) -> Option<String> {
    if separator.is_empty() {
        return non_blank(text);
    }
    text.split(separator).nth(index).and_then(non_blank)
}

/// Text between the first `start` and the next `end` (or the end of the text).
pub fn between(text: &str, start: &str, end: &str) -> Option<String> {
    let from = text.find(start)? + start.len();
    let rest = &text[from..];
    let until = if end.is_empty() {
        rest.len()
    } else {
        rest.find(end).unwrap_or(rest.len())
    };
    non_blank(&rest[..until])
}

/// Text after `marker`, with an optional leading `:`.
pub fn after(text: &str, marker: &str) -> Option<String> {
    let from = text.find(marker)? + marker.len();
    let rest = text[from..].trim_start();
    non_blank(rest.strip_prefix(':').unwrap_or(rest))
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl Extract {
    /// Cut the informative part out of `text`.
    pub fn apply(&self, text: &str) -> Option<String> {
        match self {
            Extract::Token { separator, index } => split_token(text, separator, *index),
            Extract::Between { start, end } => between(text, start, end),
            Extract::After { marker } => after(text, marker),
            Extract::Whole => non_blank(text),
        }
    }
}
