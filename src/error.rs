//! Error types for loading engine data.
//!
//! Combat and phase transitions are total and never fail. The only fallible
//! surface is startup: reading the equipment catalog and the match config.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::game::{EquipmentCategory, EquipmentId};

/// Errors raised while loading or validating an equipment catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The catalog definition is not valid JSON for the expected schema.
    #[error("malformed catalog definition: {0}")]
    Parse(#[from] serde_json::Error),

    /// A category has no items, so its selection menu would be empty.
    #[error("catalog has no {0} entries")]
    EmptyCategory(EquipmentCategory),

    /// The same identifier is defined more than once.
    #[error("equipment {0} is defined more than once")]
    DuplicateId(EquipmentId),

    /// A rate delta is NaN or infinite.
    #[error("equipment {0} has a non-finite rate delta")]
    NonFiniteRate(EquipmentId),
}

/// Errors raised while loading a match configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The config file is not valid JSON for the expected schema.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The battle log must hold at least one entry.
    #[error("log capacity must be at least 1")]
    ZeroLogCapacity,

    /// Timed battles need a non-zero interval.
    #[error("round interval must be at least 1ms")]
    ZeroRoundInterval,
}
