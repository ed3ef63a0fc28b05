//! Maps billing table cells onto the current billing info.

use tracing::debug;

use super::rules::normalize_phrase;
use crate::layout::{LayoutResult, Table};
use crate::models::bill::CurrentBillingInfo;
use crate::models::config::TableConfig;

/// Cell mapper for the billing table.
pub struct TableCellMapper<'c> {
    config: &'c TableConfig,
}

impl<'c> TableCellMapper<'c> {
    pub fn new(config: &'c TableConfig) -> Self {
        Self { config }
    }

    /// Number of rows to shift lookups by: 1 if the table opens with the
    /// known extra header cell, otherwise 0.
    pub fn header_offset(&self, table: &Table) -> usize {
        let phrase = normalize_phrase(&self.config.header_phrase);
        if phrase.is_empty() {
            return 0;
        }

        match table.cell(0, 0) {
            Some(cell) if normalize_phrase(&cell.content) == phrase => 1,
            _ => 0,
        }
    }

    /// Fill billing fields from the configured table. A missing table or
    /// missing cells leave the fields untouched.
    pub fn map(&self, layout: &LayoutResult, billing: &mut CurrentBillingInfo) {
        let Some(table) = layout.tables.get(self.config.index) else {
            debug!(
                "No billing table at index {} ({} tables)",
                self.config.index,
                layout.tables.len()
            );
            return;
        };

        self.map_table(table, billing);
    }

    /// Fill billing fields from `table`.
    pub fn map_table(&self, table: &Table, billing: &mut CurrentBillingInfo) {
        let offset = self.header_offset(table);
        if offset > 0 {
            debug!("Billing table has a header row, shifting lookups by {}", offset);
        }

        for rule in &self.config.cells {
            let row = rule.row + offset;
            let Some(cell) = table.cell(row, rule.column) else {
                debug!("No cell at ({}, {}) for {:?}", row, rule.column, rule.field);
                continue;
            };

            if let Some(value) = rule.extract.apply(&cell.content) {
                debug!("Cell ({}, {}) -> {:?} = {:?}", row, rule.column, rule.field, value);
                billing.set(rule.field, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::billing_table;
    use crate::layout::TableCell;
    use crate::models::bill::BillingField;
    use pretty_assertions::assert_eq;

    fn mapped(table: Table) -> CurrentBillingInfo {
        let config = TableConfig::default();
        let mut billing = CurrentBillingInfo::default();
        TableCellMapper::new(&config).map_table(&table, &mut billing);
        billing
    }

    #[test]
    fn test_maps_fields_without_header() {
        let billing = mapped(billing_table(false));

        assert_eq!(billing.constante.as_deref(), Some("1"));
        assert_eq!(billing.consumo_unidades.as_deref(), Some("kWh"));
        assert_eq!(billing.fecha.as_deref(), Some("AGO-23"));
        assert_eq!(billing.consumo.as_deref(), Some("152"));
        assert_eq!(billing.costo_unidad.as_deref(), Some("812,45"));
        assert_eq!(billing.valor_total.as_deref(), Some("123.492"));
        assert_eq!(billing.valor_subsidio.as_deref(), Some("-18.524"));
        assert_eq!(billing.valor_energia.as_deref(), Some("104.968"));
    }

    #[test]
    fn test_header_row_shifts_lookups() {
        let config = TableConfig::default();
        let mapper = TableCellMapper::new(&config);

        assert_eq!(mapper.header_offset(&billing_table(true)), 1);
        assert_eq!(mapper.header_offset(&billing_table(false)), 0);
        assert_eq!(mapped(billing_table(true)), mapped(billing_table(false)));
    }

    #[test]
    fn test_header_phrase_comparison_is_loose() {
        let table = Table::from_cells(vec![TableCell::new(0, 0, " lectura ACTUAL /  Lectura anterior")]);
        let config = TableConfig::default();
        assert_eq!(TableCellMapper::new(&config).header_offset(&table), 1);
    }

    #[test]
    fn test_short_table_leaves_fields_absent() {
        let table = Table::from_cells(vec![
            TableCell::new(0, 2, "Constante 10"),
            TableCell::new(1, 1, "kWh"),
        ]);

        let billing = mapped(table);

        assert_eq!(billing.get(BillingField::Constant), Some("10"));
        assert_eq!(billing.get(BillingField::ConsumptionUnits), Some("kWh"));
        assert_eq!(billing.get(BillingField::Date), None);
        assert_eq!(billing.get(BillingField::EnergyValue), None);
    }

    #[test]
    fn test_missing_table_is_not_an_error() {
        let config = TableConfig::default();
        let layout = LayoutResult {
            tables: vec![Table::default(), Table::default()],
            ..Default::default()
        };
        let mut billing = CurrentBillingInfo::default();

        TableCellMapper::new(&config).map(&layout, &mut billing);

        assert_eq!(billing, CurrentBillingInfo::default());
    }
}
