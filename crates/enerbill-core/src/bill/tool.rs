//! Conversational tool wrapper around the extraction pipeline.
//!
//! The agent layer hands over document bytes plus whatever the user typed;
//! the reply carries a short confirmation and a question for every key
//! field the document did not yield.

use serde::Serialize;
use tracing::info;

use super::{BillParser, Result};
use crate::models::bill::{BillingField, ExtractionResult};
use crate::source::LayoutSource;

/// Reply handed back to the conversational layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolReply {
    /// Confirmation message in Spanish.
    pub message: String,
    /// One question per missing key field.
    pub follow_up: Vec<String>,
    /// User-supplied context, echoed unchanged.
    pub context: String,
    pub result: ExtractionResult,
}

impl ToolReply {
    /// True if nothing needs to be asked.
    pub fn is_complete(&self) -> bool {
        self.follow_up.is_empty()
    }
}

/// Runs a layout source and an extractor for one document per call.
pub struct BillTool<'a> {
    source: &'a dyn LayoutSource,
    extractor: &'a dyn BillParser,
}

impl<'a> BillTool<'a> {
    pub fn new(source: &'a dyn LayoutSource, extractor: &'a dyn BillParser) -> Self {
        Self { source, extractor }
    }

    /// Analyze `document` and build the reply.
    pub fn call(&self, document: &[u8], context: &str) -> Result<ToolReply> {
        info!("Bill tool invoked ({} bytes), context: {:?}", document.len(), context);

        let layout = self.source.analyze(document)?;
        let result = self.extractor.extract(&layout)?;

        Ok(ToolReply {
            message: confirmation(&result),
            follow_up: follow_up_questions(&result),
            context: context.to_string(),
            result,
        })
    }
}

fn confirmation(result: &ExtractionResult) -> String {
    let months = result.consumos_hist.monthly().count();

    let mut message = String::from("Factura procesada");
    match (&result.usr.nombre, &result.usr.contrato) {
        (Some(name), Some(contract)) => {
            message.push_str(&format!(" para {name}, contrato {contract}"));
        }
        (Some(name), None) => message.push_str(&format!(" para {name}")),
        (None, Some(contract)) => message.push_str(&format!(" del contrato {contract}")),
        (None, None) => {}
    }
    message.push_str(&match months {
        0 => ". No se encontró historial de consumo.".to_string(),
        1 => ". Se recuperó 1 mes de historial de consumo.".to_string(),
        n => format!(". Se recuperaron {n} meses de historial de consumo."),
    });
    message
}

/// Questions for the key fields the extraction left empty.
pub fn follow_up_questions(result: &ExtractionResult) -> Vec<String> {
    let usr = &result.usr;
    let checks = [
        (usr.nombre.is_none(), "¿Cuál es el nombre del titular de la factura?"),
        (usr.contrato.is_none(), "¿Cuál es el número de contrato?"),
        (
            usr.direccion_servicio.is_none(),
            "¿Cuál es la dirección donde se presta el servicio?",
        ),
        (
            result.info.get(BillingField::Consumption).is_none(),
            "¿Cuántos kWh consumió en el último periodo facturado?",
        ),
        (
            result.info.get(BillingField::UnitCost).is_none(),
            "¿Cuál es el costo por kWh que aparece en la factura?",
        ),
    ];

    checks
        .into_iter()
        .filter(|(missing, _)| *missing)
        .map(|(_, question)| question.to_string())
        .collect()
}
