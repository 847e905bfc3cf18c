//! CLI command implementations for Robobattle.

pub(crate) mod catalog;
pub(crate) mod run;
pub(crate) mod tournament;

mod output;

use clap::ValueEnum;
use robobattle::game::{Catalog, EquipmentId, Loadout};
use robobattle::{CatalogError, ConfigError, MatchConfig};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Output format for the `run` and `catalog` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Options shared by every command that plays battles.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct MatchSetup {
    /// Player weapon (default: first in catalog)
    #[arg(long)]
    pub(crate) weapon: Option<EquipmentId>,

    /// Player armor (default: first in catalog)
    #[arg(long)]
    pub(crate) armor: Option<EquipmentId>,

    /// Player accessory (default: first in catalog)
    #[arg(long)]
    pub(crate) accessory: Option<EquipmentId>,

    /// Match config JSON file
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Equipment catalog JSON file (default: built-in table)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

impl MatchSetup {
    /// Player loadout from the command line.
    pub(crate) fn loadout(&self) -> Loadout {
        Loadout {
            weapon: self.weapon,
            armor: self.armor,
            accessory: self.accessory,
        }
    }

    /// Load the catalog and config named on the command line.
    pub(crate) fn load(&self) -> Result<(Catalog, MatchConfig), CliError> {
        let catalog = load_catalog(self.catalog.as_deref())?;
        let config = match &self.config {
            Some(path) => MatchConfig::load(path)?,
            None => MatchConfig::default(),
        };
        Ok((catalog, config))
    }
}

/// Load a catalog file, or the built-in table.
pub(crate) fn load_catalog(path: Option<&std::path::Path>) -> Result<Catalog, CliError> {
    let catalog = match path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    Ok(catalog)
}

/// Seed from the command line, or a fresh random one.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<CatalogError> for CliError {
    fn from(e: CatalogError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
