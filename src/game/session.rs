//! Battle session: turn order, round loop and termination.
//!
//! The session owns both robots for the whole battle and lends them to the
//! combat resolver one action at a time.

use serde::{Deserialize, Serialize};

use crate::game::{BattleAction, BattleLog, CombatRules, Robot, perform};
use crate::rng::BattleRng;

/// One side of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// The human-controlled robot.
    Player,
    /// The opponent.
    Enemy,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// Battle result from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// The enemy went down.
    Victory,
    /// The player went down.
    Defeat,
}

/// Lifecycle of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleStatus {
    /// Created, no round played.
    NotStarted,
    /// Rounds are being resolved.
    InProgress,
    /// Finished with a result.
    Ended(BattleOutcome),
}

/// What a call to [`BattleSession::play_round`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStep {
    /// A round was resolved.
    Resolved {
        /// Round number that was played.
        round: u32,
        /// Who acted first.
        first: Side,
        /// Whether the second robot got to act.
        both_acted: bool,
    },
    /// A robot was already down at round start; the battle is over.
    Ended(BattleOutcome),
}

/// A battle between the player and one opponent.
#[derive(Debug, Clone)]
pub struct BattleSession {
    player: Robot,
    enemy: Robot,
    log: BattleLog,
    round: u32,
    status: BattleStatus,
    rules: CombatRules,
}

impl BattleSession {
    /// New battle; nothing happens until [`BattleSession::start`].
    #[must_use]
    pub fn new(player: Robot, enemy: Robot, log_capacity: usize, rules: CombatRules) -> Self {
        Self {
            player,
            enemy,
            log: BattleLog::new(log_capacity),
            round: 1,
            status: BattleStatus::NotStarted,
            rules,
        }
    }

    /// Move from `NotStarted` to `InProgress`. No effect afterwards.
    pub fn start(&mut self) {
        if self.status == BattleStatus::NotStarted {
            tracing::debug!(player = %self.player.name, enemy = %self.enemy.name, "battle started");
            self.status = BattleStatus::InProgress;
        }
    }

    /// Resolve one round, or end the battle if a robot is already down.
    ///
    /// The faster robot acts first; on equal speed the player does. The
    /// second robot acts only if it survived the first action. The enemy
    /// always attacks; the player performs `player_action`.
    pub fn play_round<R: BattleRng + ?Sized>(
        &mut self,
        player_action: BattleAction,
        rng: &mut R,
    ) -> RoundStep {
        self.start();
        if let Some(outcome) = self.conclude() {
            return RoundStep::Ended(outcome);
        }

        let round = self.round;
        let first = self.first_mover();
        let second = first.opponent();
        self.act(first, Self::action_for(first, player_action), rng);
        let both_acted = self.robot(second).is_alive();
        if both_acted {
            self.act(second, Self::action_for(second, player_action), rng);
        }
        self.round += 1;

        RoundStep::Resolved {
            round,
            first,
            both_acted,
        }
    }

    /// End the battle if either robot is down. The player is checked first,
    /// so a double knockout counts as a defeat.
    pub fn conclude(&mut self) -> Option<BattleOutcome> {
        if let BattleStatus::Ended(outcome) = self.status {
            return Some(outcome);
        }
        let outcome = if !self.player.is_alive() {
            BattleOutcome::Defeat
        } else if !self.enemy.is_alive() {
            BattleOutcome::Victory
        } else {
            return None;
        };
        tracing::debug!(?outcome, rounds = self.round - 1, "battle ended");
        self.status = BattleStatus::Ended(outcome);
        Some(outcome)
    }

    /// Play attack-only rounds back to back until the battle ends.
    ///
    /// Gives up once `max_rounds` rounds have been resolved without a
    /// result and returns `None`. A robot already down at that point still
    /// ends the battle.
    pub fn run_to_end<R: BattleRng + ?Sized>(
        &mut self,
        rng: &mut R,
        max_rounds: u32,
    ) -> Option<BattleOutcome> {
        while self.rounds_played() < max_rounds {
            if let RoundStep::Ended(outcome) = self.play_round(BattleAction::Attack, rng) {
                return Some(outcome);
            }
        }
        let outcome = self.conclude();
        if outcome.is_none() {
            tracing::warn!(max_rounds, "battle hit the round limit");
        }
        outcome
    }

    /// Swap in a new opponent and clear the log and round counter.
    pub fn rematch(&mut self, enemy: Robot) {
        self.enemy = enemy;
        self.log.clear();
        self.round = 1;
        self.status = BattleStatus::NotStarted;
    }

    fn first_mover(&self) -> Side {
        if self.player.speed >= self.enemy.speed {
            Side::Player
        } else {
            Side::Enemy
        }
    }

    const fn action_for(side: Side, player_action: BattleAction) -> BattleAction {
        match side {
            Side::Player => player_action,
            Side::Enemy => BattleAction::Attack,
        }
    }

    const fn robot(&self, side: Side) -> &Robot {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    fn act<R: BattleRng + ?Sized>(&mut self, side: Side, action: BattleAction, rng: &mut R) {
        let message = match side {
            Side::Player => perform(action, &mut self.player, &mut self.enemy, rng, self.rules),
            Side::Enemy => perform(action, &mut self.enemy, &mut self.player, rng, self.rules),
        };
        self.log.push(self.round, &message);
    }

    /// The player's robot.
    #[must_use]
    pub const fn player(&self) -> &Robot {
        &self.player
    }

    /// Mutable access to the player's robot between battles.
    pub fn player_mut(&mut self) -> &mut Robot {
        &mut self.player
    }

    /// The opponent.
    #[must_use]
    pub const fn enemy(&self) -> &Robot {
        &self.enemy
    }

    /// Battle log.
    #[must_use]
    pub const fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Number of the next round to be played (starts at 1).
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Rounds resolved so far.
    #[must_use]
    pub const fn rounds_played(&self) -> u32 {
        self.round - 1
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> BattleStatus {
        self.status
    }

    /// Result once ended.
    #[must_use]
    pub const fn outcome(&self) -> Option<BattleOutcome> {
        match self.status {
            BattleStatus::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }
}
