//! Configuration commands.

use std::path::Path;

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};

/// Renders the effective configuration as TOML.
pub fn render(config: &ExportConfig) -> ExportResult<String> {
    toml::to_string_pretty(config)
        .map_err(|e| ExportError::Config(format!("failed to serialize config: {}", e)))
}

/// Dump the effective configuration to stdout.
pub fn dump(config: &ExportConfig, path: &Path) -> ExportResult<()> {
    println!("# config.toml ({})", path.display());
    println!("{}", render(config)?);
    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ExportConfig) -> ExportResult<()> {
    let firestore = config.firestore.to_firestore_config(None)?;
    let url = firestore.run_query_url().map_err(|e| {
        ExportError::Config(format!("firestore settings do not form a valid URL: {}", e))
    })?;

    println!("runQuery endpoint: {}", url);
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> ExportResult<()> {
    println!("config: {}", path.display());
    Ok(())
}
