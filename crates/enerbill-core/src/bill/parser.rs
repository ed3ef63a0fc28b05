//! The extraction pipeline: scan, map, align, score.

use std::time::Instant;

use tracing::{debug, info};

use super::confidence;
use super::history::HistoryAligner;
use super::rules::LabelMatcher;
use super::scanner::FieldScanner;
use super::table::TableCellMapper;
use super::{BillParser, Result};
use crate::layout::LayoutResult;
use crate::models::bill::{ConsumptionHistory, ExtractionResult};
use crate::models::config::ExtractionConfig;

/// Rule-based extractor for the supported bill template family.
///
/// Holds only the rule set and compiled patterns, so one instance can serve
/// any number of documents and threads.
#[derive(Debug, Clone)]
pub struct BillExtractor {
    config: ExtractionConfig,
    labels: LabelMatcher,
}

impl BillExtractor {
    /// Create an extractor with the default rule set.
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
            labels: LabelMatcher::default(),
        }
    }

    /// Create an extractor from a custom rule set.
    pub fn from_config(config: ExtractionConfig) -> Result<Self> {
        let labels = LabelMatcher::from_config(&config.labels)?;
        Ok(Self { config, labels })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }
}

impl Default for BillExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BillParser for BillExtractor {
    fn extract(&self, layout: &LayoutResult) -> Result<ExtractionResult> {
        let start = Instant::now();
        layout.validate()?;

        info!(
            "Extracting bill from {} pages, {} lines, {} tables",
            layout.pages.len(),
            layout.line_count(),
            layout.tables.len()
        );
        if !layout.languages.is_empty() {
            debug!(
                "Detected languages: {:?}",
                layout.languages.iter().map(|l| l.locale.as_str()).collect::<Vec<_>>()
            );
        }

        let scan = FieldScanner::new(&self.config.anchors, &self.config.sub_table).scan(layout);
        let holder = scan.holder;
        let mut billing = scan.billing;

        TableCellMapper::new(&self.config.table).map(layout, &mut billing);

        let candidates = scan.region.map(|r| r.candidates).unwrap_or_default();
        let consumos = HistoryAligner::new(&self.labels, self.config.sub_table.values_band)
            .align(&candidates, billing.fecha.as_deref());

        let history = ConsumptionHistory {
            usr_contrato: holder.contrato.clone(),
            producto: scan.product,
            consumos,
        };

        let handwriting = layout.has_handwriting();
        if handwriting {
            info!("Document contains handwritten content");
        }
        let general = confidence::score(&holder, &billing, &history, handwriting);

        debug!(
            "Extracted bill in {:?}: holder {}%, billing {}%, history {}% ({} records)",
            start.elapsed(),
            general.porcentaje_rec_usuario.round_dp(2),
            general.porcentaje_rec_info.round_dp(2),
            general.porcentaje_rec_consumos.round_dp(2),
            history.consumos.len()
        );

        Ok(ExtractionResult {
            general,
            usr: holder,
            info: billing,
            consumos_hist: history,
        })
    }
}
