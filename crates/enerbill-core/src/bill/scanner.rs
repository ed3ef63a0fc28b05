//! Keyword-anchor scan over every line of the layout.
//!
//! One pass fills the account holder and the text-only billing fields and
//! locates the consumption history sub-table. The sub-table is found by its
//! unit marker rather than a fixed line range, since templates shift it.

use tracing::debug;

use crate::layout::{LayoutResult, Polygon};
use crate::models::bill::{AccountHolder, CurrentBillingInfo};
use crate::models::config::{AnchorRule, AnchorScope, FieldTarget, SubTableConfig};

/// A line inside the located sub-table.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateLine {
    /// Line index on its page.
    pub idx: usize,
    pub content: String,
    pub polygon: Polygon,
}

impl CandidateLine {
    pub fn new(idx: usize, content: impl Into<String>, polygon: Polygon) -> Self {
        Self {
            idx,
            content: content.into(),
            polygon,
        }
    }
}

/// The located history sub-table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubTableRegion {
    /// Page the region is on.
    pub page: u32,
    /// Index of the first line after the unit marker.
    pub start: usize,
    /// Lines from `start` within the configured window.
    pub candidates: Vec<CandidateLine>,
}

impl SubTableRegion {
    fn contains(&self, page: u32, idx: usize) -> bool {
        page > self.page || (page == self.page && idx >= self.start)
    }
}

/// Everything the scan recovered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    pub holder: AccountHolder,
    pub billing: CurrentBillingInfo,
    pub product: Option<String>,
    /// `None` if the unit marker was never seen.
    pub region: Option<SubTableRegion>,
}

/// Single-pass anchor scanner.
pub struct FieldScanner<'c> {
    anchors: &'c [AnchorRule],
    sub_table: &'c SubTableConfig,
}

impl<'c> FieldScanner<'c> {
    pub fn new(anchors: &'c [AnchorRule], sub_table: &'c SubTableConfig) -> Self {
        Self { anchors, sub_table }
    }

    /// Scan all pages.
    pub fn scan(&self, layout: &LayoutResult) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        for page in &layout.pages {
            for (idx, line) in page.lines.iter().enumerate() {
                self.track_sub_table(&mut outcome.region, page.page_number, idx, line);

                for rule in self.anchors {
                    if !line.content.contains(&rule.anchor) {
                        continue;
                    }
                    if rule.scope == AnchorScope::AfterSubTable
                        && !outcome
                            .region
                            .as_ref()
                            .is_some_and(|r| r.contains(page.page_number, idx))
                    {
                        debug!(
                            "Ignoring {:?} on page {} line {}: outside the history region",
                            rule.anchor, page.page_number, idx
                        );
                        continue;
                    }

                    match rule.extract.apply(&line.content) {
                        Some(value) => {
                            debug!("Anchor {:?} -> {:?} = {:?}", rule.anchor, rule.target, value);
                            assign(&mut outcome, rule.target, value);
                        }
                        None => {
                            debug!(
                                "Anchor {:?} matched line {} but yielded no value",
                                rule.anchor, idx
                            );
                        }
                    }
                }
            }
        }

        outcome.billing.usr_contrato = outcome.holder.contrato.clone();
        outcome
    }

    fn track_sub_table(
        &self,
        region: &mut Option<SubTableRegion>,
        page: u32,
        idx: usize,
        line: &crate::layout::Line,
    ) {
        if page != self.sub_table.page {
            return;
        }

        match region {
            None => {
                if idx >= self.sub_table.min_anchor_line && line.content.contains(&self.sub_table.anchor) {
                    debug!("History sub-table starts after line {} on page {}", idx, page);
                    *region = Some(SubTableRegion {
                        page,
                        start: idx + 1,
                        candidates: Vec::new(),
                    });
                }
            }
            Some(r) => {
                if idx >= r.start && idx < r.start + self.sub_table.window {
                    r.candidates.push(CandidateLine::new(idx, line.content.clone(), line.polygon.clone()));
                }
            }
        }
    }
}

fn assign(outcome: &mut ScanOutcome, target: FieldTarget, value: String) {
    match target {
        FieldTarget::Holder(field) => outcome.holder.set(field, value),
        FieldTarget::Billing(field) => outcome.billing.set(field, value),
        FieldTarget::Product => outcome.product = Some(value),
    }
}
