//! Process command - extract data from a single recorded layout result.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use enerbill_core::models::bill::ExtractionResult;
use enerbill_core::source::{AnalyzeResultReader, LayoutSource};
use enerbill_core::{BillExtractor, BillParser};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (recorded analyzeResult JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Show extraction confidence scores
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let extractor = super::build_extractor(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Reading layout result...");
    pb.set_position(20);
    let data = fs::read(&args.input)?;

    pb.set_message("Extracting bill data...");
    pb.set_position(50);
    let result = extract_document(&data, &extractor)?;

    pb.finish_and_clear();

    let output = format_result(&result, args.format, args.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        let general = &result.general;
        println!();
        println!(
            "{} Account holder: {}%",
            style("ℹ").blue(),
            general.porcentaje_rec_usuario.round_dp(1)
        );
        println!(
            "{} Billing info:   {}%",
            style("ℹ").blue(),
            general.porcentaje_rec_info.round_dp(1)
        );
        println!(
            "{} History:        {}%",
            style("ℹ").blue(),
            general.porcentaje_rec_consumos.round_dp(1)
        );
        if general.deteccion_escritura_manual {
            println!("{} Handwriting detected", style("⚠").yellow());
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read a recorded layout result and run the extractor on it.
pub fn extract_document(data: &[u8], extractor: &BillExtractor) -> anyhow::Result<ExtractionResult> {
    let layout = AnalyzeResultReader::new().analyze(data)?;
    Ok(extractor.extract(&layout)?)
}

/// Extract the file at `path`.
pub fn extract_file(path: &Path, extractor: &BillExtractor) -> anyhow::Result<ExtractionResult> {
    let data = fs::read(path)?;
    extract_document(&data, extractor)
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(result.to_json_pretty()?),
        OutputFormat::Json => Ok(result.to_json()?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

/// One row per history record, prefixed with the contract and product.
fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["usr_contrato", "producto", "fecha", "descripcion", "valor"])?;

    let history = &result.consumos_hist;
    let contract = history.usr_contrato.as_deref().unwrap_or_default();
    let product = history.producto.as_deref().unwrap_or_default();

    for record in &history.consumos {
        wtr.write_record([
            contract,
            product,
            record.fecha.as_deref().unwrap_or_default(),
            record.descripcion.to_string().as_str(),
            record.valor.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    fn field(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or("-")
    }

    let usr = &result.usr;
    let info = &result.info;
    let mut output = String::new();

    output.push_str("Account holder:\n");
    output.push_str(&format!("  Name:     {}\n", field(&usr.nombre)));
    output.push_str(&format!("  Contract: {}\n", field(&usr.contrato)));
    output.push_str(&format!("  ID:       {}\n", field(&usr.id)));
    output.push_str(&format!(
        "  Service:  {}, {}\n",
        field(&usr.direccion_servicio),
        field(&usr.municipio_servicio)
    ));
    output.push_str(&format!("  Billing:  {}\n", field(&usr.direccion_facturacion)));
    output.push_str(&format!("  Stratum:  {}\n", field(&usr.estrato)));
    output.push('\n');

    output.push_str("Current billing:\n");
    output.push_str(&format!("  Reference: {}\n", field(&info.referencia)));
    output.push_str(&format!("  Period:    {}\n", field(&info.fecha)));
    output.push_str(&format!(
        "  Consumed:  {} {}\n",
        field(&info.consumo),
        info.consumo_unidades.as_deref().unwrap_or_default()
    ));
    output.push_str(&format!("  Unit cost: {}\n", field(&info.costo_unidad)));
    output.push_str(&format!("  Total:     {}\n", field(&info.valor_total)));
    output.push_str(&format!("  Subsidy:   {}\n", field(&info.valor_subsidio)));
    output.push_str(&format!("  Energy:    {}\n", field(&info.valor_energia)));
    output.push('\n');

    let history = &result.consumos_hist;
    output.push_str(&format!("History ({}):\n", field(&history.producto)));
    if history.consumos.is_empty() {
        output.push_str("  none\n");
    }
    for record in &history.consumos {
        output.push_str(&format!(
            "  {:<8} {:<9} {}\n",
            record.fecha.as_deref().unwrap_or("?"),
            record.descripcion.to_string(),
            record.valor
        ));
    }

    output
}
