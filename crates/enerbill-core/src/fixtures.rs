//! Synthetic layout results for tests.

use crate::bill::scanner::CandidateLine;
use crate::layout::{LayoutResult, Line, Page, Polygon, Style, Table, TableCell};

/// History values, left to right.
pub const SCENARIO_VALUES: [&str; 9] = ["110", "121", "98", "134", "140", "127", "133", "152", "129"];

/// History labels, left to right.
pub const SCENARIO_LABELS: [&str; 9] = [
    "ENE/23", "FEB/23", "MAR/23", "ABR/23", "MAY/23", "JUN/23", "JUL/23", "actual", "prom",
];

/// Column x positions: three entries per column, stacked vertically.
const SCENARIO_X: [f64; 9] = [10.0, 10.0, 10.0, 50.0, 50.0, 50.0, 90.0, 90.0, 90.0];

/// Builds a layout page by page, one line at a time.
pub struct LayoutBuilder {
    pages: Vec<Page>,
    tables: Vec<Table>,
    styles: Vec<Style>,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self {
            pages: vec![Page {
                page_number: 1,
                ..Default::default()
            }],
            tables: Vec::new(),
            styles: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut Page {
        self.pages.last_mut().expect("builder always has a page")
    }

    /// A full-width line below the previous one.
    pub fn line(mut self, content: &str) -> Self {
        let page = self.current();
        let y = page.lines.len() as f64 * 10.0;
        page.lines.push(Line::new(content, Polygon::rect(0.0, y, 200.0, 8.0)));
        self
    }

    /// A line at an explicit position.
    pub fn line_at(mut self, content: &str, x: f64, y: f64) -> Self {
        self.current()
            .lines
            .push(Line::new(content, Polygon::rect(x, y, 20.0, 8.0)));
        self
    }

    /// `count` lines that match no anchor.
    pub fn filler(mut self, count: usize) -> Self {
        for i in 0..count {
            self = self.line(&format!("texto {i}"));
        }
        self
    }

    /// Start a new page.
    pub fn page(mut self) -> Self {
        let number = self.pages.len() as u32 + 1;
        self.pages.push(Page {
            page_number: number,
            ..Default::default()
        });
        self
    }

    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn handwritten(mut self) -> Self {
        self.styles.push(Style {
            is_handwritten: Some(true),
            confidence: 0.9,
        });
        self
    }

    /// The scenario history block: nine values then nine labels, each label
    /// directly under its value.
    pub fn history_block(mut self) -> Self {
        for (i, value) in SCENARIO_VALUES.iter().enumerate() {
            let (x, y) = grid(i);
            self = self.line_at(value, x, y);
        }
        for (i, label) in SCENARIO_LABELS.iter().enumerate() {
            let (x, y) = grid(i);
            self = self.line_at(label, x, y + 15.0);
        }
        self
    }

    pub fn build(self) -> LayoutResult {
        LayoutResult {
            pages: self.pages,
            tables: self.tables,
            styles: self.styles,
            languages: Vec::new(),
        }
    }
}

fn grid(i: usize) -> (f64, f64) {
    (SCENARIO_X[i], 500.0 + (i % 3) as f64 * 40.0)
}

/// Candidate lines of the scenario history block, starting at line 100.
pub fn history_candidates() -> Vec<CandidateLine> {
    let values = SCENARIO_VALUES.iter().enumerate().map(|(i, v)| {
        let (x, y) = grid(i);
        CandidateLine::new(100 + i, *v, Polygon::rect(x, y, 20.0, 8.0))
    });
    let labels = SCENARIO_LABELS.iter().enumerate().map(|(i, l)| {
        let (x, y) = grid(i);
        CandidateLine::new(109 + i, *l, Polygon::rect(x, y + 15.0, 20.0, 8.0))
    });
    values.chain(labels).collect()
}

/// Billing table at index 2 of the template, optionally with the extra header row.
pub fn billing_table(with_header: bool) -> Table {
    let shift = usize::from(with_header);
    let mut cells = vec![
        TableCell::new(0, 0, "Lectura 4521"),
        TableCell::new(0, 2, "Constante 1"),
        TableCell::new(1, 1, "kWh"),
        TableCell::new(2, 0, "Periodo AGO-23"),
        TableCell::new(2, 1, "152"),
        TableCell::new(2, 2, "812,45"),
        TableCell::new(2, 3, "123.492"),
        TableCell::new(3, 3, "-18.524"),
        TableCell::new(5, 3, "104.968"),
    ];
    for cell in &mut cells {
        cell.row_index += shift;
    }
    if with_header {
        cells.insert(0, TableCell::new(0, 0, "Lectura actual / Lectura anterior"));
    }
    Table::from_cells(cells)
}

/// A complete bill of the supported template.
pub fn sample_bill(with_header: bool) -> LayoutResult {
    LayoutBuilder::new()
        .line("Empresa de Energía S.A. E.S.P.")
        .line("Contrato 1234567")
        .line("Cliente: Juan Pérez")
        .line("CC/NIT: 71.234.567")
        .line("Uso Residencial Clase Estrato: 3")
        .line("Dirección prestación servicio: CL 10 # 20-30 Municipio: MEDELLIN")
        .line("Dirección de cobro: CL 10 # 20-30")
        .line("Referente de pago: 99887766")
        .filler(52)
        .line("Historial de consumo (kWh)")
        .history_block()
        .filler(20)
        .line("Producto: Energía residencial")
        .table(Table::default())
        .table(Table::default())
        .table(billing_table(with_header))
        .build()
}
