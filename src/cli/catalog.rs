//! Catalog command implementation.

use super::output::format_catalog_text;
use super::{CliError, OutputFormat, load_catalog};
use std::path::Path;

/// Execute the catalog command.
///
/// # Errors
///
/// Returns an error if the catalog file cannot be read or is invalid.
pub(crate) fn execute(path: Option<&Path>, format: OutputFormat) -> Result<(), CliError> {
    let catalog = load_catalog(path)?;

    match format {
        OutputFormat::Text => print!("{}", format_catalog_text(&catalog)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(catalog.entries())?),
    }

    Ok(())
}
