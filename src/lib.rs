// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Robobattle: a deterministic turn-based robot combat engine.
//!
//! Two robots with stat blocks and equipment fight until one is down. This
//! crate is the engine only; drawing, fonts and input devices belong to the
//! host, which talks to the engine through three calls:
//! - [`Match::apply_input`] with an abstract [`InputEvent`]
//! - [`Match::advance`] with elapsed time
//! - [`Match::view`] to read a [`MatchView`] snapshot
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI / headless arena runner       │
//! ├─────────────────────────────────────┤
//! │   Match state machine               │
//! ├─────────────────────────────────────┤
//! │   Battle session                    │
//! ├─────────────────────────────────────┤
//! │   Combat resolver  │  Catalog       │
//! ├─────────────────────────────────────┤
//! │   Robots           │  Seeded RNG    │
//! └─────────────────────────────────────┘
//! ```

pub mod arena;
pub mod config;
pub mod error;
pub mod game;
pub mod rng;
pub mod state;
pub mod view;

pub use config::{BattleMode, MatchConfig};
pub use error::{CatalogError, ConfigError};

// Re-export key game types at crate root for convenience
pub use game::{
    BattleAction, BattleOutcome, BattleSession, Catalog, EquipmentCategory, EquipmentId, Loadout,
    Robot,
};
pub use rng::{BattleRng, GameRng, ScriptedRng};
pub use state::{InputEvent, Match, Phase, SelectionStep};
pub use view::MatchView;
