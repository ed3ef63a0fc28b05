//! Consumption history alignment.
//!
//! The history sub-table prints a row of values above a row of month labels.
//! The service's line order does not reliably pair them, but entries of the
//! same column share a left edge, so both bands are sorted by horizontal
//! position and paired by rank.

use std::cmp::Ordering;

use tracing::{debug, trace, warn};

use super::rules::{normalize_billing_date, normalize_label, LabelKind, LabelMatcher, NUMERIC_VALUE};
use super::scanner::CandidateLine;
use crate::models::bill::{Consumption, ConsumptionKind};

/// Order two lines by left edge, then top edge, then line index.
fn positional_order(a: &CandidateLine, b: &CandidateLine) -> Ordering {
    let ax = a.polygon.left_edge().unwrap_or(f64::INFINITY);
    let bx = b.polygon.left_edge().unwrap_or(f64::INFINITY);
    let ay = a.polygon.top_edge().unwrap_or(f64::INFINITY);
    let by = b.polygon.top_edge().unwrap_or(f64::INFINITY);

    ax.total_cmp(&bx)
        .then(ay.total_cmp(&by))
        .then(a.idx.cmp(&b.idx))
}

/// Align two positional bands by ascending left edge, pairing by rank.
///
/// The result has `min(values.len(), labels.len())` pairs; the surplus of the
/// longer band is dropped.
pub fn align_bands<'a>(
    values: &'a [CandidateLine],
    labels: &'a [CandidateLine],
) -> Vec<(&'a CandidateLine, &'a CandidateLine)> {
    let mut values: Vec<&CandidateLine> = values.iter().collect();
    let mut labels: Vec<&CandidateLine> = labels.iter().collect();
    values.sort_by(|a, b| positional_order(a, b));
    labels.sort_by(|a, b| positional_order(a, b));

    if values.len() != labels.len() {
        warn!(
            "History bands differ in length ({} values, {} labels), pairing {}",
            values.len(),
            labels.len(),
            values.len().min(labels.len())
        );
    }

    values.into_iter().zip(labels).collect()
}

/// Builds consumption records from the sub-table candidates.
pub struct HistoryAligner<'m> {
    matcher: &'m LabelMatcher,
    values_band: usize,
}

impl<'m> HistoryAligner<'m> {
    pub fn new(matcher: &'m LabelMatcher, values_band: usize) -> Self {
        Self {
            matcher,
            values_band,
        }
    }

    /// The first `values_band` numeric, non-label candidates by line index.
    ///
    /// Templates print eight or nine values; on an eight-value bill the
    /// ninth line is already a label and must not enter the band.
    pub fn values_band(&self, candidates: &[CandidateLine]) -> Vec<CandidateLine> {
        let mut band: Vec<CandidateLine> = candidates
            .iter()
            .filter(|c| {
                let content = c.content.trim();
                if self.matcher.classify(content).is_some() || !NUMERIC_VALUE.is_match(content) {
                    trace!("Line {} {:?} is not a history value", c.idx, content);
                    return false;
                }
                true
            })
            .cloned()
            .collect();
        band.sort_by_key(|c| c.idx);
        band.truncate(self.values_band);
        band
    }

    /// Every candidate that reads as a history label.
    pub fn labels_band(&self, candidates: &[CandidateLine]) -> Vec<CandidateLine> {
        candidates
            .iter()
            .filter(|c| self.matcher.classify(&c.content).is_some())
            .cloned()
            .collect()
    }

    /// Produce the history records.
    ///
    /// When two or more pairs exist the last two are the current-period and
    /// average entries, dated from `billing_date`. With fewer pairs each
    /// label's own text decides its role.
    pub fn align(&self, candidates: &[CandidateLine], billing_date: Option<&str>) -> Vec<Consumption> {
        if candidates.is_empty() {
            debug!("No history sub-table candidates");
            return Vec::new();
        }

        let values = self.values_band(candidates);
        let labels = self.labels_band(candidates);
        let pairs = align_bands(&values, &labels);

        let summary_date = billing_date.and_then(normalize_billing_date);
        if summary_date.is_none() && pairs.len() >= 2 {
            warn!("Billing date {:?} cannot date the summary entries", billing_date);
        }

        let n = pairs.len();
        let mut records = Vec::with_capacity(n);

        for (i, (value, label)) in pairs.into_iter().enumerate() {
            let kind = if n >= 2 && i == n - 2 {
                LabelKind::Current
            } else if n >= 2 && i == n - 1 {
                LabelKind::Average
            } else if n >= 2 {
                LabelKind::Dated
            } else {
                self.matcher.classify(&label.content).unwrap_or(LabelKind::Dated)
            };

            let valor = value.content.trim();

            let record = match kind {
                LabelKind::Dated => {
                    let fecha = normalize_label(&label.content);
                    if fecha.is_none() {
                        warn!("Unrecognized month in history label {:?}", label.content);
                    }
                    Consumption::new(fecha, ConsumptionKind::Consumption, valor)
                }
                LabelKind::Current => {
                    Consumption::new(summary_date.clone(), ConsumptionKind::Consumption, valor)
                }
                LabelKind::Average => {
                    Consumption::new(summary_date.clone(), ConsumptionKind::Average, valor)
                }
            };
            records.push(record);
        }

        debug!("Aligned {} history records", records.len());
        records
    }
}
