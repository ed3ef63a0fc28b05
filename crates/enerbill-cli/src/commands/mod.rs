//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod process;
pub mod reply;

use std::path::Path;

use tracing::debug;

use enerbill_core::models::config::EnerbillConfig;
use enerbill_core::BillExtractor;

/// Load the configuration from `path`, or from the default location if a
/// file exists there, or fall back to defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<EnerbillConfig> {
    if let Some(path) = path {
        debug!("Loading config from {}", path);
        return Ok(EnerbillConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(EnerbillConfig::from_file(&default_path)?)
    } else {
        Ok(EnerbillConfig::default())
    }
}

/// Build an extractor from the loaded configuration.
pub fn build_extractor(config_path: Option<&str>) -> anyhow::Result<BillExtractor> {
    let config = load_config(config_path)?;
    Ok(BillExtractor::from_config(config.extraction)?)
}
