//! Completeness scoring per entity group.

use rust_decimal::Decimal;

use crate::models::bill::{AccountHolder, ConsumptionHistory, CurrentBillingInfo, ExtractionConfidence};

/// `populated / total * 100`, or zero for an empty group.
pub fn completeness(populated: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    let populated = populated.min(total);
    (Decimal::from(populated) * Decimal::ONE_HUNDRED / Decimal::from(total)).normalize()
}

/// Score all three entity groups.
pub fn score(
    holder: &AccountHolder,
    billing: &CurrentBillingInfo,
    history: &ConsumptionHistory,
    handwriting: bool,
) -> ExtractionConfidence {
    let (hp, ht) = holder.coverage();
    let (bp, bt) = billing.coverage();
    let (cp, ct) = history.coverage();

    ExtractionConfidence {
        deteccion_escritura_manual: handwriting,
        porcentaje_rec_usuario: completeness(hp, ht),
        porcentaje_rec_info: completeness(bp, bt),
        porcentaje_rec_consumos: completeness(cp, ct),
    }
}
