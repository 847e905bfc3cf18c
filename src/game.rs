//! Game layer for robobattle.
//!
//! Pure engine data and rules, leaves first:
//! - Equipment catalog (static stat deltas and descriptions)
//! - Robots (stat blocks, equipment slots)
//! - Combat resolution (hit, evasion, critical, damage)
//! - Bounded battle log
//! - Battle session (turn order, round loop, termination)

mod catalog;
mod combat;
mod log;
mod robot;
mod session;

pub use catalog::{
    Catalog, EquipmentCategory, EquipmentEntry, EquipmentId, NO_DETAILS, StatDelta,
    UnknownEquipment,
};
pub use combat::{
    AttackOutcome, AttackReport, BattleAction, CombatRules, DEFEND_BONUS, HEAL_AMOUNT, defend,
    heal, perform, resolve_attack,
};
pub use log::{BattleLog, DEFAULT_LOG_CAPACITY};
pub use robot::{Loadout, MAX_HP, Robot};
pub use session::{BattleOutcome, BattleSession, BattleStatus, RoundStep, Side};
