//! Electricity bill records produced by the extraction pipeline.
//!
//! Every scalar field is optional: `None` means the field was not found on
//! the bill. Serialized keys use the bill's own (Spanish) vocabulary and
//! absent fields serialize as `null` so consumers can rely on key presence.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The customer the bill is addressed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHolder {
    /// Client name.
    pub nombre: Option<String>,
    /// Contract number.
    pub contrato: Option<String>,
    /// National id (CC/NIT).
    pub id: Option<String>,
    /// Address where the service is delivered.
    pub direccion_servicio: Option<String>,
    /// Municipality of the service address.
    pub municipio_servicio: Option<String>,
    /// Address where the bill is sent.
    pub direccion_facturacion: Option<String>,
    /// Socioeconomic stratum.
    pub estrato: Option<String>,
}

/// Figures for the current billing period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentBillingInfo {
    /// Back-reference to the holder's contract.
    pub usr_contrato: Option<String>,
    /// Payment reference.
    pub referencia: Option<String>,
    /// Billing date, e.g. `AGO-23`. Anchors the summary entries of the history.
    pub fecha: Option<String>,
    /// Meter multiplier constant.
    pub constante: Option<String>,
    /// Consumption for the period.
    pub consumo: Option<String>,
    /// Unit the consumption is expressed in.
    pub consumo_unidades: Option<String>,
    /// Cost per unit.
    pub costo_unidad: Option<String>,
    pub valor_total: Option<String>,
    pub valor_subsidio: Option<String>,
    /// Energy value before subsidies.
    pub valor_energia: Option<String>,
}

/// Whether a history entry is a monthly reading or the period average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumptionKind {
    #[serde(rename = "consumo")]
    Consumption,
    #[serde(rename = "promedio")]
    Average,
}

impl fmt::Display for ConsumptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsumptionKind::Consumption => f.write_str("consumo"),
            ConsumptionKind::Average => f.write_str("promedio"),
        }
    }
}

/// One entry of the consumption history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumption {
    /// Month as `MM/YYYY`; `None` when the label's month could not be resolved.
    pub fecha: Option<String>,
    pub descripcion: ConsumptionKind,
    /// Numeric value as printed on the bill.
    pub valor: String,
}

impl Consumption {
    pub fn new(fecha: Option<String>, descripcion: ConsumptionKind, valor: impl Into<String>) -> Self {
        Self {
            fecha,
            descripcion,
            valor: valor.into(),
        }
    }
}

/// Multi-month consumption history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionHistory {
    /// Back-reference to the holder's contract.
    pub usr_contrato: Option<String>,
    /// Product label.
    pub producto: Option<String>,
    /// Entries in the order they were discovered (left to right on the bill).
    pub consumos: Vec<Consumption>,
}

impl ConsumptionHistory {
    /// Consumption readings, excluding the average entry.
    pub fn monthly(&self) -> impl Iterator<Item = &Consumption> {
        self.consumos
            .iter()
            .filter(|c| c.descripcion == ConsumptionKind::Consumption)
    }
}

/// How much of each entity group was recovered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfidence {
    /// True if the layout service detected handwriting.
    pub deteccion_escritura_manual: bool,
    /// Account holder completeness, 0-100.
    pub porcentaje_rec_usuario: Decimal,
    /// Billing info completeness, 0-100.
    pub porcentaje_rec_info: Decimal,
    /// History completeness, 0-100.
    pub porcentaje_rec_consumos: Decimal,
}

/// Serialization envelope for one extracted bill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub general: ExtractionConfidence,
    pub usr: AccountHolder,
    pub info: CurrentBillingInfo,
    pub consumos_hist: ConsumptionHistory,
}

impl ExtractionResult {
    /// Compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Addressable account holder fields, used by the anchor rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolderField {
    Name,
    Contract,
    NationalId,
    ServiceAddress,
    ServiceMunicipality,
    BillingAddress,
    Stratum,
}

/// Addressable billing fields, used by anchor and table-cell rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingField {
    PaymentReference,
    Date,
    Constant,
    Consumption,
    ConsumptionUnits,
    UnitCost,
    TotalValue,
    SubsidyValue,
    EnergyValue,
}

impl AccountHolder {
    pub fn set(&mut self, field: HolderField, value: String) {
        let slot = match field {
            HolderField::Name => &mut self.nombre,
            HolderField::Contract => &mut self.contrato,
            HolderField::NationalId => &mut self.id,
            HolderField::ServiceAddress => &mut self.direccion_servicio,
            HolderField::ServiceMunicipality => &mut self.municipio_servicio,
            HolderField::BillingAddress => &mut self.direccion_facturacion,
            HolderField::Stratum => &mut self.estrato,
        };
        *slot = Some(value);
    }

    /// `(populated, total)` field counts.
    pub fn coverage(&self) -> (usize, usize) {
        let filled = [
            self.nombre.is_some(),
            self.contrato.is_some(),
            self.id.is_some(),
            self.direccion_servicio.is_some(),
            self.municipio_servicio.is_some(),
            self.direccion_facturacion.is_some(),
            self.estrato.is_some(),
        ];
        (filled.iter().filter(|&&v| v).count(), filled.len())
    }
}

impl CurrentBillingInfo {
    pub fn set(&mut self, field: BillingField, value: String) {
        let slot = match field {
            BillingField::PaymentReference => &mut self.referencia,
            BillingField::Date => &mut self.fecha,
            BillingField::Constant => &mut self.constante,
            BillingField::Consumption => &mut self.consumo,
            BillingField::ConsumptionUnits => &mut self.consumo_unidades,
            BillingField::UnitCost => &mut self.costo_unidad,
            BillingField::TotalValue => &mut self.valor_total,
            BillingField::SubsidyValue => &mut self.valor_subsidio,
            BillingField::EnergyValue => &mut self.valor_energia,
        };
        *slot = Some(value);
    }

    pub fn get(&self, field: BillingField) -> Option<&str> {
        match field {
            BillingField::PaymentReference => self.referencia.as_deref(),
            BillingField::Date => self.fecha.as_deref(),
            BillingField::Constant => self.constante.as_deref(),
            BillingField::Consumption => self.consumo.as_deref(),
            BillingField::ConsumptionUnits => self.consumo_unidades.as_deref(),
            BillingField::UnitCost => self.costo_unidad.as_deref(),
            BillingField::TotalValue => self.valor_total.as_deref(),
            BillingField::SubsidyValue => self.valor_subsidio.as_deref(),
            BillingField::EnergyValue => self.valor_energia.as_deref(),
        }
    }

    /// `(populated, total)` field counts.
    pub fn coverage(&self) -> (usize, usize) {
        let filled = [
            self.usr_contrato.is_some(),
            self.referencia.is_some(),
            self.fecha.is_some(),
            self.constante.is_some(),
            self.consumo.is_some(),
            self.consumo_unidades.is_some(),
            self.costo_unidad.is_some(),
            self.valor_total.is_some(),
            self.valor_subsidio.is_some(),
            self.valor_energia.is_some(),
        ];
        (filled.iter().filter(|&&v| v).count(), filled.len())
    }
}

impl ConsumptionHistory {
    /// `(populated, total)` field counts. An empty history list counts as absent.
    pub fn coverage(&self) -> (usize, usize) {
        let filled = [
            self.usr_contrato.is_some(),
            self.producto.is_some(),
            !self.consumos.is_empty(),
        ];
        (filled.iter().filter(|&&v| v).count(), filled.len())
    }
}
