//! Headless match runner.
//!
//! Provides a pure function interface: `(seed, loadout) -> MatchResult`.
//! The runner drives a real [`Match`] through the same input events a player
//! would send, with rounds resolved back to back instead of once a second.

use crate::config::{BattleMode, MatchConfig};
use crate::game::{BattleOutcome, Catalog, EquipmentCategory, Loadout};
use crate::state::{InputEvent, Match, Phase, SelectionStep};

/// Final result of a headless match (the first battle only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Seed the match ran with.
    pub seed: u64,
    /// Equipment the player actually ended up with.
    pub loadout: Loadout,
    /// Battle result, `None` if the round limit was hit.
    pub outcome: Option<BattleOutcome>,
    /// Rounds resolved.
    pub rounds: u32,
    /// Player HP at the end, floored at zero.
    pub player_hp: i32,
    /// Enemy HP at the end, floored at zero.
    pub enemy_hp: i32,
    /// Last lines of the battle log.
    pub log: Vec<String>,
}

/// Play one battle with the given player loadout.
///
/// Slots left empty, or naming an item the catalog does not list for that
/// slot, fall back to the first item of the slot's menu.
#[must_use]
pub fn run_match(seed: u64, loadout: &Loadout, catalog: &Catalog, config: &MatchConfig) -> MatchResult {
    let mut game = Match::seeded(catalog.clone(), *config, seed);

    game.apply_input(InputEvent::Confirm);
    while let SelectionStep::Pick(category) = game.selection_step() {
        let target = menu_index(catalog, category, loadout);
        while game.cursor(category) != target {
            game.apply_input(InputEvent::CursorDown);
        }
        game.apply_input(InputEvent::Confirm);
        if game.phase() != Phase::EquipmentSelection {
            break;
        }
    }
    if game.phase() == Phase::EquipmentSelection {
        game.apply_input(InputEvent::Confirm);
    }

    while game.phase() == Phase::Battle {
        let session = game.session();
        let decided = !session.player().is_alive() || !session.enemy().is_alive();
        if !decided && session.rounds_played() >= config.max_rounds {
            break;
        }
        match config.battle_mode {
            BattleMode::Timed => {
                game.tick();
            }
            BattleMode::Command => game.apply_input(InputEvent::Confirm),
        }
    }

    let session = game.session();
    let result = MatchResult {
        seed,
        loadout: session.player().equipment,
        outcome: session.outcome(),
        rounds: session.rounds_played(),
        player_hp: session.player().display_hp(),
        enemy_hp: session.enemy().display_hp(),
        log: session.log().entries().map(str::to_string).collect(),
    };
    tracing::debug!(seed, outcome = ?result.outcome, rounds = result.rounds, "match finished");
    result
}

fn menu_index(catalog: &Catalog, category: EquipmentCategory, loadout: &Loadout) -> usize {
    loadout
        .get(category)
        .and_then(|id| catalog.items(category).position(|e| e.id == id))
        .unwrap_or_else(|| {
            tracing::warn!(%category, "no usable choice in loadout, taking first item");
            0
        })
}
