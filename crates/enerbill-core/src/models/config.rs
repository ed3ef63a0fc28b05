//! Configuration structures for the extraction pipeline.
//!
//! The defaults describe the one supported bill template family. Every
//! keyword anchor, table coordinate and label pattern is data here so a new
//! template variant only needs a different config file.

use serde::{Deserialize, Serialize};

use crate::models::bill::{BillingField, HolderField};

/// Main configuration for enerbill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnerbillConfig {
    /// Bill extraction rules.
    pub extraction: ExtractionConfig,
}

/// Template rule set used by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Keyword anchors tried against every line, in order.
    pub anchors: Vec<AnchorRule>,

    /// Consumption history sub-table localization.
    pub sub_table: SubTableConfig,

    /// Billing table cell mapping.
    pub table: TableConfig,

    /// History label recognition.
    pub labels: LabelConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            anchors: default_anchors(),
            sub_table: SubTableConfig::default(),
            table: TableConfig::default(),
            labels: LabelConfig::default(),
        }
    }
}

/// Where an extracted value is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity", content = "field", rename_all = "snake_case")]
pub enum FieldTarget {
    /// Account holder field.
    Holder(HolderField),
    /// Current billing info field.
    Billing(BillingField),
    /// Product label of the consumption history.
    Product,
}

/// How the informative part of a text is cut out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Extract {
    /// Split on `separator` and take the token at `index`.
    Token { separator: String, index: usize },
    /// Text after the first `start` and before the following `end`.
    Between { start: String, end: String },
    /// Text after `marker`, with a leading `:` dropped.
    After { marker: String },
    /// The whole text.
    Whole,
}

impl Extract {
    pub fn token(separator: &str, index: usize) -> Self {
        Extract::Token {
            separator: separator.to_string(),
            index,
        }
    }
}

/// Where in the document an anchor is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorScope {
    /// Any line of any page.
    #[default]
    Anywhere,
    /// Only once the history sub-table has been located, at or past its start.
    AfterSubTable,
}

/// A keyword anchor mapped to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorRule {
    /// Literal substring a line must contain.
    pub anchor: String,
    pub target: FieldTarget,
    pub extract: Extract,
    #[serde(default)]
    pub scope: AnchorScope,
}

impl AnchorRule {
    pub fn new(anchor: &str, target: FieldTarget, extract: Extract) -> Self {
        Self {
            anchor: anchor.to_string(),
            target,
            extract,
            scope: AnchorScope::Anywhere,
        }
    }

    pub fn with_scope(mut self, scope: AnchorScope) -> Self {
        self.scope = scope;
        self
    }
}

fn default_anchors() -> Vec<AnchorRule> {
    use FieldTarget::{Billing, Holder, Product};

    vec![
        AnchorRule::new(
            "Dirección prestación servicio",
            Holder(HolderField::ServiceAddress),
            Extract::Between {
                start: ":".to_string(),
                end: "Municipio".to_string(),
            },
        ),
        AnchorRule::new(
            "Dirección prestación servicio",
            Holder(HolderField::ServiceMunicipality),
            Extract::After {
                marker: "Municipio".to_string(),
            },
        ),
        AnchorRule::new("Contrato", Holder(HolderField::Contract), Extract::token(" ", 1)),
        AnchorRule::new("Cliente:", Holder(HolderField::Name), Extract::token(":", 1)),
        AnchorRule::new("CC/NIT:", Holder(HolderField::NationalId), Extract::token(":", 1)),
        AnchorRule::new("Estrato:", Holder(HolderField::Stratum), Extract::token(" ", 4)),
        AnchorRule::new(
            "Dirección de cobro:",
            Holder(HolderField::BillingAddress),
            Extract::token(":", 1),
        ),
        AnchorRule::new(
            "Referente de pago:",
            Billing(BillingField::PaymentReference),
            Extract::token(":", 1),
        ),
        AnchorRule::new("Producto:", Product, Extract::token(":", 1))
            .with_scope(AnchorScope::AfterSubTable),
    ]
}

/// Consumption history sub-table localization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubTableConfig {
    /// Unit marker that precedes the sub-table.
    pub anchor: String,

    /// Page the sub-table lives on (1-based).
    pub page: u32,

    /// Lines before this index never locate the sub-table.
    pub min_anchor_line: usize,

    /// Number of lines collected from the sub-table start.
    pub window: usize,

    /// Number of leading candidate lines forming the values band.
    pub values_band: usize,
}

impl Default for SubTableConfig {
    fn default() -> Self {
        Self {
            anchor: "(kWh)".to_string(),
            page: 1,
            min_anchor_line: 50,
            window: 30,
            values_band: 9,
        }
    }
}

/// A table cell mapped to a billing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRule {
    /// Row relative to the detected header offset.
    pub row: usize,
    pub column: usize,
    pub field: BillingField,
    pub extract: Extract,
}

impl CellRule {
    pub fn new(row: usize, column: usize, field: BillingField, extract: Extract) -> Self {
        Self {
            row,
            column,
            field,
            extract,
        }
    }
}

/// Billing table cell mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Position of the billing table in the layout result.
    pub index: usize,

    /// Text of the extra header cell some templates put at (0, 0).
    pub header_phrase: String,

    /// Cell coordinates and target fields.
    pub cells: Vec<CellRule>,
}

impl Default for TableConfig {
    fn default() -> Self {
        use BillingField::*;

        Self {
            index: 2,
            header_phrase: "Lectura actual / Lectura anterior".to_string(),
            cells: vec![
                CellRule::new(0, 2, Constant, Extract::token(" ", 1)),
                CellRule::new(1, 1, ConsumptionUnits, Extract::Whole),
                CellRule::new(2, 0, Date, Extract::token(" ", 1)),
                CellRule::new(2, 1, Consumption, Extract::Whole),
                CellRule::new(2, 2, UnitCost, Extract::Whole),
                CellRule::new(2, 3, TotalValue, Extract::Whole),
                CellRule::new(3, 3, SubsidyValue, Extract::Whole),
                CellRule::new(5, 3, EnergyValue, Extract::Whole),
            ],
        }
    }
}

/// History label recognition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// A line matching any of these is a dated label (`ENE/23`).
    pub date_patterns: Vec<String>,

    /// Token marking the current-period label (case-insensitive).
    pub current_token: String,

    /// Token marking the average label (case-insensitive).
    pub average_token: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            date_patterns: vec![
                r"^[A-Z]{3}/[0-9]{2}.*".to_string(),
                r"^[A-Z]*/[0-9]{2}.*".to_string(),
            ],
            current_token: "actual".to_string(),
            average_token: "prom".to_string(),
        }
    }
}

impl EnerbillConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips() {
        let config = EnerbillConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: EnerbillConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.extraction.anchors, config.extraction.anchors);
        assert_eq!(back.extraction.table.cells, config.extraction.table.cells);
        assert_eq!(back.extraction.sub_table.window, 30);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EnerbillConfig =
            serde_json::from_str(r#"{"extraction": {"sub_table": {"min_anchor_line": 5}}}"#).unwrap();

        assert_eq!(config.extraction.sub_table.min_anchor_line, 5);
        assert_eq!(config.extraction.sub_table.anchor, "(kWh)");
        assert_eq!(config.extraction.table.index, 2);
        assert_eq!(config.extraction.anchors.len(), 9);
    }

    #[test]
    fn test_rule_json_shape() {
        let rule = AnchorRule::new("Cliente:", FieldTarget::Holder(HolderField::Name), Extract::token(":", 1));
        let json = serde_json::to_value(&rule).unwrap();

        assert_eq!(json["target"]["entity"], "holder");
        assert_eq!(json["target"]["field"], "name");
        assert_eq!(json["extract"]["kind"], "token");
        assert_eq!(json["scope"], "anywhere");
    }
}
