//! Read-only snapshots for presentation layers.
//!
//! A renderer (terminal, window, JSON dump) only ever sees these types; it
//! never holds a reference into the live match.

use serde::Serialize;

use crate::game::{BattleAction, BattleOutcome, EquipmentId, Robot};
use crate::state::{Phase, SelectionStep};

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchView {
    /// Current phase.
    pub phase: Phase,
    /// Player robot, with equipment.
    pub player: Robot,
    /// Opponent robot, with equipment.
    pub enemy: Robot,
    /// Equipment menu, while one is open.
    pub selection: Option<SelectionView>,
    /// Command menu, during command-driven battles.
    pub command: Option<CommandView>,
    /// Battle log, oldest line first.
    pub log: Vec<String>,
    /// Next round number.
    pub round: u32,
    /// Result of the current battle once decided.
    pub outcome: Option<BattleOutcome>,
    /// Battles won since the last restart.
    pub wins: u32,
}

/// An open equipment menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionView {
    /// Which slot is being chosen.
    pub step: SelectionStep,
    /// Highlighted index.
    pub cursor: usize,
    /// Menu rows in order.
    pub items: Vec<MenuItem>,
}

/// One equipment menu row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Item identifier.
    pub id: EquipmentId,
    /// Catalog description.
    pub details: String,
    /// Whether the cursor is on this row.
    pub highlighted: bool,
}

/// The battle command menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandView {
    /// Highlighted index.
    pub cursor: usize,
    /// Commands in menu order.
    pub commands: Vec<BattleAction>,
}

impl MatchView {
    /// One-line status for a robot, as shown beside the log.
    #[must_use]
    pub fn status_line(robot: &Robot) -> String {
        format!(
            "{} HP {} ATK {} DEF {} SPD {} CRIT {:.2} EVA {:.2} HIT {:.2}",
            robot.name,
            robot.display_hp(),
            robot.attack,
            robot.defense,
            robot.speed,
            robot.critical_rate,
            robot.evasion_rate,
            robot.hit_rate
        )
    }
}
