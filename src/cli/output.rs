//! Output formatting utilities for CLI.

#![allow(clippy::cast_precision_loss)]

use robobattle::arena::MatchResult;
use robobattle::game::{BattleOutcome, Catalog, EquipmentId, Loadout};
use serde::Serialize;

fn slot_name(id: Option<EquipmentId>) -> &'static str {
    id.map_or("none", EquipmentId::name)
}

fn outcome_name(outcome: Option<BattleOutcome>) -> &'static str {
    match outcome {
        Some(BattleOutcome::Victory) => "victory",
        Some(BattleOutcome::Defeat) => "defeat",
        None => "undecided",
    }
}

/// JSON-serializable match result.
#[derive(Debug, Serialize)]
pub(super) struct JsonMatchResult<'a> {
    /// Random seed used.
    pub(super) seed: u64,
    /// Player equipment.
    pub(super) loadout: Loadout,
    /// `victory`, `defeat` or `undecided`.
    pub(super) outcome: &'static str,
    /// Rounds resolved.
    pub(super) rounds: u32,
    /// Final player HP.
    pub(super) player_hp: i32,
    /// Final enemy HP.
    pub(super) enemy_hp: i32,
    /// Last battle log lines.
    pub(super) log: &'a [String],
}

impl<'a> JsonMatchResult<'a> {
    /// Create from a MatchResult.
    pub(super) fn from_match_result(result: &'a MatchResult) -> Self {
        Self {
            seed: result.seed,
            loadout: result.loadout,
            outcome: outcome_name(result.outcome),
            rounds: result.rounds,
            player_hp: result.player_hp,
            enemy_hp: result.enemy_hp,
            log: &result.log,
        }
    }
}

/// Format a match result as human-readable text.
pub(super) fn format_text(result: &MatchResult, show_log: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("Battle Result (seed: {})\n", result.seed));
    output.push_str(&format!(
        "  Loadout: {} / {} / {}\n",
        slot_name(result.loadout.weapon),
        slot_name(result.loadout.armor),
        slot_name(result.loadout.accessory)
    ));
    let headline = match result.outcome {
        Some(BattleOutcome::Victory) => "You Win!",
        Some(BattleOutcome::Defeat) => "You Lose...",
        None => "Round limit reached",
    };
    output.push_str(&format!("  Result: {headline}\n"));
    output.push_str(&format!("  Rounds: {}\n", result.rounds));
    output.push_str(&format!(
        "  HP: player {} / enemy {}\n",
        result.player_hp, result.enemy_hp
    ));

    if show_log && !result.log.is_empty() {
        output.push_str("\nBattle Log:\n");
        for line in &result.log {
            output.push_str(&format!("  {line}\n"));
        }
    }

    output
}

/// Tournament statistics for aggregated results.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct TournamentStats {
    /// Total battles played.
    pub(super) games_played: u64,
    /// Player victories.
    pub(super) wins: u64,
    /// Player defeats.
    pub(super) defeats: u64,
    /// Battles stopped by the round limit.
    pub(super) undecided: u64,
    /// Total rounds across all battles.
    total_rounds: u64,
    /// Sum of remaining player HP.
    total_player_hp: u64,
    /// Sum of remaining player HP squared, for std dev.
    player_hp_sq_sum: f64,
    /// Longest battle seen.
    pub(super) max_rounds: u32,
}

impl TournamentStats {
    /// Add a match result to the stats.
    pub(super) fn add_result(&mut self, result: &MatchResult) {
        self.games_played += 1;
        self.total_rounds += u64::from(result.rounds);
        self.max_rounds = self.max_rounds.max(result.rounds);

        match result.outcome {
            Some(BattleOutcome::Victory) => self.wins += 1,
            Some(BattleOutcome::Defeat) => self.defeats += 1,
            None => self.undecided += 1,
        }

        let hp = u64::try_from(result.player_hp).unwrap_or(0);
        self.total_player_hp += hp;
        self.player_hp_sq_sum += (hp * hp) as f64;
    }

    /// Merge stats from another accumulator.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.wins += other.wins;
        self.defeats += other.defeats;
        self.undecided += other.undecided;
        self.total_rounds += other.total_rounds;
        self.total_player_hp += other.total_player_hp;
        self.player_hp_sq_sum += other.player_hp_sq_sum;
        self.max_rounds = self.max_rounds.max(other.max_rounds);
    }

    fn rate(&self, count: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        count as f64 / self.games_played as f64
    }

    /// Player win rate (0.0-1.0).
    pub(super) fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    /// Average battle length.
    pub(super) fn avg_rounds(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.games_played as f64
    }

    /// Average player HP left at the end.
    pub(super) fn avg_player_hp(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_player_hp as f64 / self.games_played as f64
    }

    /// Standard deviation of player HP left at the end.
    pub(super) fn player_hp_std_dev(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let mean = self.avg_player_hp();
        let variance = self.player_hp_sq_sum / self.games_played as f64 - mean * mean;
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    games_played: u64,
    loadout: Loadout,
    wins: u64,
    defeats: u64,
    undecided: u64,
    win_rate: f64,
    avg_rounds: f64,
    max_rounds: u32,
    avg_player_hp: f64,
    player_hp_std_dev: f64,
}

impl JsonTournamentResult {
    /// Create from stats and the loadout that was tested.
    pub(super) fn from_stats(stats: &TournamentStats, loadout: Loadout) -> Self {
        Self {
            games_played: stats.games_played,
            loadout,
            wins: stats.wins,
            defeats: stats.defeats,
            undecided: stats.undecided,
            win_rate: stats.win_rate(),
            avg_rounds: stats.avg_rounds(),
            max_rounds: stats.max_rounds,
            avg_player_hp: stats.avg_player_hp(),
            player_hp_std_dev: stats.player_hp_std_dev(),
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats, loadout: &Loadout) -> String {
    let mut output = String::new();

    output.push_str(&format!("Tournament Results ({} battles)\n", stats.games_played));
    output.push_str("========================================\n\n");
    output.push_str(&format!(
        "Loadout: {} / {} / {}\n\n",
        slot_name(loadout.weapon),
        slot_name(loadout.armor),
        slot_name(loadout.accessory)
    ));

    output.push_str("Outcomes:\n");
    output.push_str(&format!(
        "  Victories: {} ({:.1}%)\n",
        stats.wins,
        stats.win_rate() * 100.0
    ));
    output.push_str(&format!(
        "  Defeats:   {} ({:.1}%)\n",
        stats.defeats,
        stats.rate(stats.defeats) * 100.0
    ));
    output.push_str(&format!(
        "  Undecided: {} ({:.1}%)\n\n",
        stats.undecided,
        stats.rate(stats.undecided) * 100.0
    ));

    output.push_str(&format!(
        "Average Player HP Left: {:.1} (+/- {:.1})\n",
        stats.avg_player_hp(),
        stats.player_hp_std_dev()
    ));
    output.push_str(&format!(
        "Average Battle Length: {:.1} rounds (max {})\n",
        stats.avg_rounds(),
        stats.max_rounds
    ));

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats, loadout: &Loadout) -> String {
    let mut output = String::new();

    output.push_str(
        "weapon,armor,accessory,games,wins,defeats,undecided,win_rate,avg_rounds,avg_player_hp\n",
    );
    output.push_str(&format!(
        "{},{},{},{},{},{},{},{:.4},{:.2},{:.2}\n",
        slot_name(loadout.weapon),
        slot_name(loadout.armor),
        slot_name(loadout.accessory),
        stats.games_played,
        stats.wins,
        stats.defeats,
        stats.undecided,
        stats.win_rate(),
        stats.avg_rounds(),
        stats.avg_player_hp()
    ));

    output
}

/// Format the equipment table as human-readable text.
pub(super) fn format_catalog_text(catalog: &Catalog) -> String {
    let mut output = String::new();

    for category in robobattle::EquipmentCategory::ALL {
        output.push_str(&format!("{category}:\n"));
        for entry in catalog.items(category) {
            output.push_str(&format!("  {:<10} {}\n", entry.id.name(), entry.description));
        }
        output.push('\n');
    }

    output
}
