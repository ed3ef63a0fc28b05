//! Reply command - run the agent tool path on a single bill.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use enerbill_core::source::AnalyzeResultReader;
use enerbill_core::BillTool;

/// Arguments for the reply command.
#[derive(Args)]
pub struct ReplyArgs {
    /// Input file (recorded analyzeResult JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Free-text context from the user, echoed in the reply
    #[arg(long, default_value = "")]
    context: String,

    /// Print the full reply as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: ReplyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let extractor = super::build_extractor(config_path)?;
    let source = AnalyzeResultReader::new();

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Building reply for {}", args.input.display());
    let document = fs::read(&args.input)?;
    let reply = BillTool::new(&source, &extractor).call(&document, &args.context)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
        return Ok(());
    }

    println!("{} {}", style("✓").green(), reply.message);

    if !reply.follow_up.is_empty() {
        println!();
        for question in &reply.follow_up {
            println!("  {} {}", style("?").yellow(), question);
        }
    }

    Ok(())
}
