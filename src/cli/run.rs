//! Run command implementation.

use super::output::{JsonMatchResult, format_text};
use super::{CliError, MatchSetup, OutputFormat, resolve_seed};
use robobattle::arena::run_match;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the catalog or config cannot be loaded.
pub(crate) fn execute(
    setup: &MatchSetup,
    seed: Option<u64>,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let (catalog, config) = setup.load()?;
    let seed = resolve_seed(seed);

    if !quiet && format == OutputFormat::Text {
        println!("Running battle with seed {seed}...");
        println!();
    }

    let result = run_match(seed, &setup.loadout(), &catalog, &config);

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&result, !quiet));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonMatchResult::from_match_result(&result))?;
            println!("{json}");
        }
    }

    Ok(())
}
