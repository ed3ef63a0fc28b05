//! Classification of history sub-table labels.

use regex::Regex;

use crate::error::ExtractionError;
use crate::models::config::LabelConfig;

/// Role a label line plays in the history sub-table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// A month/year label such as `ENE/23`.
    Dated,
    /// The current-period label.
    Current,
    /// The period-average label.
    Average,
}

/// Compiled label patterns.
#[derive(Debug, Clone)]
pub struct LabelMatcher {
    date_patterns: Vec<Regex>,
    current_token: String,
    average_token: String,
}

impl LabelMatcher {
    /// Compile the configured patterns.
    pub fn from_config(config: &LabelConfig) -> Result<Self, ExtractionError> {
        let date_patterns = config
            .date_patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| ExtractionError::InvalidPattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if config.current_token.trim().is_empty() || config.average_token.trim().is_empty() {
            return Err(ExtractionError::InvalidRule(
                "label tokens must not be empty".to_string(),
            ));
        }

        Ok(Self {
            date_patterns,
            current_token: config.current_token.to_lowercase(),
            average_token: config.average_token.to_lowercase(),
        })
    }

    /// Classify a line, or `None` if it is not a label.
    ///
    /// Date patterns win over the current/average tokens.
    pub fn classify(&self, text: &str) -> Option<LabelKind> {
        let text = text.trim();
        if self.date_patterns.iter().any(|p| p.is_match(text)) {
            return Some(LabelKind::Dated);
        }

        let lower = text.to_lowercase();
        if lower.contains(&self.current_token) {
            Some(LabelKind::Current)
        } else if lower.contains(&self.average_token) {
            Some(LabelKind::Average)
        } else {
            None
        }
    }
}

impl Default for LabelMatcher {
    fn default() -> Self {
        Self {
            date_patterns: vec![
                super::patterns::MONTH_LABEL_STRICT.clone(),
                super::patterns::MONTH_LABEL_LOOSE.clone(),
            ],
            current_token: "actual".to_string(),
            average_token: "prom".to_string(),
        }
    }
}
