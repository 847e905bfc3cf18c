//! Match state machine.
//!
//! A match moves through Title, equipment selection, battle, an optional
//! post-battle re-equip, and the end screen. The host feeds it abstract input
//! events and elapsed time; it never touches the match state directly.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{BattleMode, MatchConfig};
use crate::game::{
    BattleAction, BattleOutcome, BattleSession, Catalog, EquipmentCategory, Robot, RoundStep,
};
use crate::rng::{BattleRng, GameRng};
use crate::view::{CommandView, MatchView, MenuItem, SelectionView};

/// Top-level phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the player to start.
    Title,
    /// Picking weapon, armor and accessory.
    EquipmentSelection,
    /// Rounds are being resolved.
    Battle,
    /// Won a battle; picking a new weapon for the next opponent.
    PostBattleEquip,
    /// Result screen.
    BattleEnd,
}

/// Progress through equipment selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionStep {
    /// Choosing an item for this slot.
    Pick(EquipmentCategory),
    /// All slots chosen; waiting for Confirm to fight.
    Ready,
}

/// Abstract player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Move the highlight up.
    CursorUp,
    /// Move the highlight down.
    CursorDown,
    /// Accept the current choice.
    Confirm,
}

/// A full match between the player and a series of opponents.
#[derive(Debug, Clone)]
pub struct Match<R = GameRng> {
    catalog: Catalog,
    config: MatchConfig,
    phase: Phase,
    session: BattleSession,
    selection: SelectionStep,
    cursors: [usize; 3],
    command_cursor: usize,
    pending: Duration,
    wins: u32,
    rng: R,
}

impl Match<GameRng> {
    /// Match driven by a seeded `ChaCha8` source.
    #[must_use]
    pub fn seeded(catalog: Catalog, config: MatchConfig, seed: u64) -> Self {
        Self::new(catalog, config, GameRng::from_seed(seed))
    }
}

impl<R: BattleRng> Match<R> {
    /// Match at the title screen with fresh robots.
    #[must_use]
    pub fn new(catalog: Catalog, config: MatchConfig, rng: R) -> Self {
        let session = Self::fresh_session(&catalog, &config);
        Self {
            catalog,
            config,
            phase: Phase::Title,
            session,
            selection: SelectionStep::Pick(EquipmentCategory::Weapon),
            cursors: [0; 3],
            command_cursor: 0,
            pending: Duration::ZERO,
            wins: 0,
            rng,
        }
    }

    fn fresh_enemy(catalog: &Catalog, config: &MatchConfig) -> Robot {
        let mut enemy = Robot::enemy();
        enemy.apply_loadout(catalog, &config.enemy_loadout);
        enemy
    }

    fn fresh_session(catalog: &Catalog, config: &MatchConfig) -> BattleSession {
        BattleSession::new(
            Robot::player(),
            Self::fresh_enemy(catalog, config),
            config.log_capacity,
            config.combat_rules(),
        )
    }

    /// Apply one input event.
    pub fn apply_input(&mut self, event: InputEvent) {
        match self.phase {
            Phase::Title => {
                if event == InputEvent::Confirm {
                    self.set_phase(Phase::EquipmentSelection);
                }
            }
            Phase::EquipmentSelection => self.handle_selection(event),
            Phase::Battle => self.handle_battle_input(event),
            Phase::PostBattleEquip => self.handle_re_equip(event),
            Phase::BattleEnd => {
                if event == InputEvent::Confirm {
                    self.restart();
                }
            }
        }
    }

    /// Apply the inputs of one frame. Repeats of the same event within a
    /// frame count once, so a held key cannot skip a phase.
    pub fn apply_frame(&mut self, events: &[InputEvent]) {
        let mut seen = Vec::with_capacity(events.len());
        for &event in events {
            if !seen.contains(&event) {
                seen.push(event);
                self.apply_input(event);
            }
        }
    }

    /// Let time pass. In a timed battle, resolves at most one round once a
    /// full interval has accumulated; leftover time is not carried over.
    pub fn advance(&mut self, elapsed: Duration) -> Option<RoundStep> {
        if self.phase != Phase::Battle || self.config.battle_mode != BattleMode::Timed {
            return None;
        }
        self.pending = self.pending.saturating_add(elapsed);
        if self.pending < self.config.round_interval() {
            return None;
        }
        self.pending = Duration::ZERO;

        let step = self.session.play_round(BattleAction::Attack, &mut self.rng);
        if let RoundStep::Ended(outcome) = step {
            self.finish_battle(outcome);
        }
        Some(step)
    }

    /// Advance by exactly one round interval.
    pub fn tick(&mut self) -> Option<RoundStep> {
        self.advance(self.config.round_interval())
    }

    fn handle_selection(&mut self, event: InputEvent) {
        let category = match self.selection {
            SelectionStep::Pick(category) => category,
            SelectionStep::Ready => {
                if event == InputEvent::Confirm {
                    self.enter_battle();
                }
                return;
            }
        };

        if event == InputEvent::Confirm {
            self.equip_highlighted(category);
            match next_category(category) {
                Some(next) => self.selection = SelectionStep::Pick(next),
                None if self.config.pre_battle_gate => self.selection = SelectionStep::Ready,
                None => self.enter_battle(),
            }
        } else {
            self.move_cursor(category, event);
        }
    }

    fn handle_battle_input(&mut self, event: InputEvent) {
        if self.config.battle_mode != BattleMode::Command {
            return;
        }
        let count = BattleAction::ALL.len();
        match event {
            InputEvent::CursorUp => self.command_cursor = (self.command_cursor + count - 1) % count,
            InputEvent::CursorDown => self.command_cursor = (self.command_cursor + 1) % count,
            InputEvent::Confirm => {
                let action = BattleAction::ALL[self.command_cursor];
                let step = self.session.play_round(action, &mut self.rng);
                let outcome = match step {
                    RoundStep::Ended(outcome) => Some(outcome),
                    RoundStep::Resolved { .. } => self.session.conclude(),
                };
                if let Some(outcome) = outcome {
                    self.finish_battle(outcome);
                }
            }
        }
    }

    fn handle_re_equip(&mut self, event: InputEvent) {
        if event != InputEvent::Confirm {
            self.move_cursor(EquipmentCategory::Weapon, event);
            return;
        }
        self.equip_highlighted(EquipmentCategory::Weapon);
        self.session.player_mut().restore();
        let enemy = Self::fresh_enemy(&self.catalog, &self.config);
        self.session.rematch(enemy);
        self.enter_battle();
    }

    fn move_cursor(&mut self, category: EquipmentCategory, event: InputEvent) {
        let count = self.catalog.item_count(category).max(1);
        let cursor = &mut self.cursors[slot_index(category)];
        match event {
            InputEvent::CursorUp => *cursor = (*cursor + count - 1) % count,
            InputEvent::CursorDown => *cursor = (*cursor + 1) % count,
            InputEvent::Confirm => {}
        }
    }

    fn equip_highlighted(&mut self, category: EquipmentCategory) {
        let cursor = self.cursors[slot_index(category)];
        if let Some(id) = self.catalog.item_at(category, cursor).map(|e| e.id) {
            self.session.player_mut().equip(&self.catalog, category, id);
        }
    }

    fn enter_battle(&mut self) {
        self.pending = Duration::ZERO;
        self.command_cursor = 0;
        self.session.start();
        self.set_phase(Phase::Battle);
    }

    fn finish_battle(&mut self, outcome: BattleOutcome) {
        if outcome == BattleOutcome::Victory {
            self.wins += 1;
            if self.config.rematch {
                self.set_phase(Phase::PostBattleEquip);
                return;
            }
        }
        self.set_phase(Phase::BattleEnd);
    }

    fn restart(&mut self) {
        self.session = Self::fresh_session(&self.catalog, &self.config);
        self.selection = SelectionStep::Pick(EquipmentCategory::Weapon);
        self.cursors = [0; 3];
        self.command_cursor = 0;
        self.pending = Duration::ZERO;
        self.wins = 0;
        self.set_phase(Phase::Title);
    }

    fn set_phase(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current selection sub-phase.
    #[must_use]
    pub const fn selection_step(&self) -> SelectionStep {
        self.selection
    }

    /// Highlighted menu index for a slot.
    #[must_use]
    pub const fn cursor(&self, category: EquipmentCategory) -> usize {
        self.cursors[slot_index(category)]
    }

    /// Highlighted battle command.
    #[must_use]
    pub const fn command(&self) -> BattleAction {
        BattleAction::ALL[self.command_cursor]
    }

    /// The battle in progress (or the last one).
    #[must_use]
    pub const fn session(&self) -> &BattleSession {
        &self.session
    }

    /// Battles won since the last restart.
    #[must_use]
    pub const fn wins(&self) -> u32 {
        self.wins
    }

    /// Equipment table in use.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Snapshot of everything a renderer needs.
    #[must_use]
    pub fn view(&self) -> MatchView {
        let selection = match self.phase {
            Phase::EquipmentSelection => Some(self.selection_view(self.selection)),
            Phase::PostBattleEquip => {
                Some(self.selection_view(SelectionStep::Pick(EquipmentCategory::Weapon)))
            }
            _ => None,
        };
        let command = (self.phase == Phase::Battle && self.config.battle_mode == BattleMode::Command)
            .then(|| CommandView {
                cursor: self.command_cursor,
                commands: BattleAction::ALL.to_vec(),
            });

        MatchView {
            phase: self.phase,
            player: self.session.player().clone(),
            enemy: self.session.enemy().clone(),
            selection,
            command,
            log: self.session.log().entries().map(str::to_string).collect(),
            round: self.session.round(),
            outcome: self.session.outcome(),
            wins: self.wins,
        }
    }

    fn selection_view(&self, step: SelectionStep) -> SelectionView {
        let SelectionStep::Pick(category) = step else {
            return SelectionView {
                step,
                cursor: 0,
                items: Vec::new(),
            };
        };
        let cursor = self.cursor(category);
        let items = self
            .catalog
            .items(category)
            .enumerate()
            .map(|(i, entry)| MenuItem {
                id: entry.id,
                details: entry.description.clone(),
                highlighted: i == cursor,
            })
            .collect();
        SelectionView {
            step,
            cursor,
            items,
        }
    }
}

const fn slot_index(category: EquipmentCategory) -> usize {
    match category {
        EquipmentCategory::Weapon => 0,
        EquipmentCategory::Armor => 1,
        EquipmentCategory::Accessory => 2,
    }
}

const fn next_category(category: EquipmentCategory) -> Option<EquipmentCategory> {
    match category {
        EquipmentCategory::Weapon => Some(EquipmentCategory::Armor),
        EquipmentCategory::Armor => Some(EquipmentCategory::Accessory),
        EquipmentCategory::Accessory => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BattleStatus, EquipmentId, MAX_HP};
    use crate::rng::ScriptedRng;

    use super::InputEvent::{Confirm, CursorDown, CursorUp};

    fn new_match(config: MatchConfig) -> Match<ScriptedRng> {
        Match::new(Catalog::builtin().unwrap(), config, ScriptedRng::new([0.5]))
    }

    #[test]
    fn test_title_to_selection() {
        let mut m = new_match(MatchConfig::default());
        assert_eq!(m.phase(), Phase::Title);
        m.apply_input(CursorDown);
        assert_eq!(m.phase(), Phase::Title);
        m.apply_input(Confirm);
        assert_eq!(m.phase(), Phase::EquipmentSelection);
        assert_eq!(m.selection_step(), SelectionStep::Pick(EquipmentCategory::Weapon));
    }

    #[test]
    fn test_repeated_confirm_in_one_frame() {
        let mut m = new_match(MatchConfig::default());
        m.apply_frame(&[Confirm, Confirm, Confirm]);
        assert_eq!(m.phase(), Phase::EquipmentSelection);
        assert_eq!(m.selection_step(), SelectionStep::Pick(EquipmentCategory::Weapon));
        assert_eq!(m.session().player().equipment.weapon, None);
    }

    #[test]
    fn test_cursor_wraps_both_ways() {
        let mut m = new_match(MatchConfig::default());
        m.apply_input(Confirm);
        m.apply_input(CursorUp);
        assert_eq!(m.cursor(EquipmentCategory::Weapon), 2);
        m.apply_input(CursorDown);
        assert_eq!(m.cursor(EquipmentCategory::Weapon), 0);
        m.apply_input(CursorDown);
        m.apply_input(CursorDown);
        m.apply_input(CursorDown);
        assert_eq!(m.cursor(EquipmentCategory::Weapon), 0);
    }

    #[test]
    fn test_selection_equips_and_gates() {
        let mut m = new_match(MatchConfig::default());
        m.apply_input(Confirm);
        m.apply_input(CursorDown); // Gun
        m.apply_input(Confirm);
        m.apply_input(CursorUp); // NanoSuit
        m.apply_input(Confirm);
        m.apply_input(Confirm); // Boots
        assert_eq!(m.phase(), Phase::EquipmentSelection);
        assert_eq!(m.selection_step(), SelectionStep::Ready);

        let player = m.session().player();
        assert_eq!(player.equipment.weapon, Some(EquipmentId::Gun));
        assert_eq!(player.equipment.armor, Some(EquipmentId::NanoSuit));
        assert_eq!(player.equipment.accessory, Some(EquipmentId::Boots));
        assert_eq!(player.attack, 35);
        assert_eq!(player.defense, 30);
        assert_eq!(player.speed, 8);

        // Time does not run before the gate is passed.
        assert_eq!(m.tick(), None);
        m.apply_input(Confirm);
        assert_eq!(m.phase(), Phase::Battle);
        assert_eq!(m.session().status(), BattleStatus::InProgress);
    }

    #[test]
    fn test_no_gate_goes_straight_to_battle() {
        let config = MatchConfig {
            pre_battle_gate: false,
            ..MatchConfig::default()
        };
        let mut m = new_match(config);
        for _ in 0..4 {
            m.apply_input(Confirm);
        }
        assert_eq!(m.phase(), Phase::Battle);
    }

    #[test]
    fn test_timed_rounds_need_a_full_interval() {
        let mut m = new_match(MatchConfig::default());
        for _ in 0..5 {
            m.apply_input(Confirm);
        }
        assert_eq!(m.advance(Duration::from_millis(400)), None);
        assert_eq!(m.advance(Duration::from_millis(400)), None);
        assert!(m.advance(Duration::from_millis(400)).is_some());
        assert_eq!(m.session().round(), 2);
        // A long stall still resolves only one round.
        assert!(m.advance(Duration::from_secs(10)).is_some());
        assert_eq!(m.session().round(), 3);
    }

    #[test]
    fn test_timed_battle_ignores_input() {
        let mut m = new_match(MatchConfig::default());
        for _ in 0..5 {
            m.apply_input(Confirm);
        }
        m.apply_input(Confirm);
        assert_eq!(m.session().round(), 1);
        assert!(m.session().log().is_empty());
    }

    #[test]
    fn test_command_mode() {
        let config = MatchConfig {
            battle_mode: BattleMode::Command,
            ..MatchConfig::default()
        };
        let mut m = new_match(config);
        for _ in 0..5 {
            m.apply_input(Confirm);
        }
        assert_eq!(m.phase(), Phase::Battle);
        assert_eq!(m.tick(), None);

        m.apply_input(CursorDown);
        assert_eq!(m.command(), BattleAction::Defend);
        let defense = m.session().player().defense;
        m.apply_input(Confirm);
        assert_eq!(m.session().player().defense, defense + 5);
        assert_eq!(m.session().round(), 2);

        m.apply_input(CursorUp);
        m.apply_input(CursorUp);
        assert_eq!(m.command(), BattleAction::Heal);
    }

    #[test]
    fn test_defeat_goes_to_end_and_restart_resets() {
        let mut m = new_match(MatchConfig::default());
        for _ in 0..5 {
            m.apply_input(Confirm);
        }
        // Sword/Shield/Boots vs the default enemy loses under a flat 0.5 script.
        while m.phase() == Phase::Battle {
            m.tick();
        }
        assert_eq!(m.phase(), Phase::BattleEnd);
        assert_eq!(m.session().outcome(), Some(BattleOutcome::Defeat));

        m.apply_input(Confirm);
        assert_eq!(m.phase(), Phase::Title);
        assert_eq!(*m.session().player(), Robot::player());
        assert!(m.session().log().is_empty());
        assert_eq!(m.cursor(EquipmentCategory::Weapon), 0);
    }

    #[test]
    fn test_victory_rematch_flow() {
        let mut m = new_match(MatchConfig::default());
        m.apply_input(Confirm);
        m.apply_input(CursorUp); // Laser
        m.apply_input(Confirm);
        m.apply_input(CursorUp); // NanoSuit
        m.apply_input(Confirm);
        m.apply_input(CursorUp); // Gloves
        m.apply_input(Confirm);
        m.apply_input(Confirm);
        while m.phase() == Phase::Battle {
            m.tick();
        }
        assert_eq!(m.phase(), Phase::PostBattleEquip);
        assert_eq!(m.wins(), 1);
        assert_eq!(m.view().outcome, Some(BattleOutcome::Victory));

        let attack = m.session().player().attack;
        m.apply_input(CursorDown); // wraps Laser -> Sword
        m.apply_input(Confirm);
        assert_eq!(m.phase(), Phase::Battle);
        assert_eq!(m.session().player().attack, attack + 10);
        assert_eq!(m.session().player().hp, MAX_HP);
        assert_eq!(m.session().enemy().hp, MAX_HP);
        assert_eq!(m.session().round(), 1);
        assert!(m.session().log().is_empty());
    }

    #[test]
    fn test_victory_without_rematch_ends() {
        let config = MatchConfig {
            rematch: false,
            ..MatchConfig::default()
        };
        let mut m = new_match(config);
        m.apply_input(Confirm);
        m.apply_input(CursorUp);
        m.apply_input(Confirm);
        m.apply_input(CursorUp);
        m.apply_input(Confirm);
        m.apply_input(CursorUp);
        m.apply_input(Confirm);
        m.apply_input(Confirm);
        while m.phase() == Phase::Battle {
            m.tick();
        }
        assert_eq!(m.phase(), Phase::BattleEnd);
        assert_eq!(m.wins(), 1);
    }

    #[test]
    fn test_view_selection_menu() {
        let mut m = new_match(MatchConfig::default());
        assert!(m.view().selection.is_none());
        m.apply_input(Confirm);
        m.apply_input(CursorDown);
        let view = m.view();
        let selection = view.selection.unwrap();
        assert_eq!(selection.step, SelectionStep::Pick(EquipmentCategory::Weapon));
        assert_eq!(selection.cursor, 1);
        assert_eq!(selection.items.len(), 3);
        assert!(selection.items[1].highlighted);
        assert_eq!(selection.items[1].details, "Gun: Attack +15, Speed -2, Hit Rate +5%");
    }
}
