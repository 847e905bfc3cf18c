//! Combat resolution.
//!
//! An attack must clear two independent gates before it connects: the
//! attacker's hit roll and the defender's evasion roll. A connecting attack
//! then rolls for a critical and for a small damage spread.

use serde::{Deserialize, Serialize};

use crate::game::Robot;
use crate::rng::BattleRng;

/// Damage multiplier on a critical hit.
const CRITICAL_MULTIPLIER: f64 = 2.0;

/// Damage spread: the roll is uniform over `[-DAMAGE_SPREAD, DAMAGE_SPREAD]`.
const DAMAGE_SPREAD: i32 = 3;

/// Defense gained by [`defend`].
pub const DEFEND_BONUS: i32 = 5;

/// HP restored by [`heal`].
pub const HEAL_AMOUNT: i32 = 10;

/// Which optional rolls the resolver performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRules {
    /// Roll against the attacker's hit rate before the evasion roll.
    ///
    /// When disabled only evasion can stop an attack, and the hit rate stat
    /// is ignored.
    pub hit_check: bool,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self { hit_check: true }
    }
}

/// How an attack played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// Failed the attacker's hit roll.
    Missed,
    /// Dodged by the defender.
    Evaded,
    /// Connected normally.
    Hit,
    /// Connected for double damage.
    Critical,
}

impl AttackOutcome {
    /// Whether the attack connected.
    #[must_use]
    pub const fn connected(self) -> bool {
        matches!(self, Self::Hit | Self::Critical)
    }
}

/// Result of one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    /// Damage dealt. Zero on a miss, never negative.
    pub damage: i32,
    /// Outcome.
    pub outcome: AttackOutcome,
}

impl AttackReport {
    /// Log line for this attack.
    ///
    /// Always a single line: the critical notice is appended after a space
    /// rather than on a line of its own, so one log entry stays one row.
    #[must_use]
    pub fn message(&self, attacker: &str, defender: &str) -> String {
        match self.outcome {
            AttackOutcome::Missed | AttackOutcome::Evaded => {
                format!("{attacker} attacks {defender} but misses!")
            }
            AttackOutcome::Hit => {
                format!("{attacker} attacks {defender} for {} damage.", self.damage)
            }
            AttackOutcome::Critical => format!(
                "{attacker} attacks {defender} for {} damage. It's a critical hit!",
                self.damage
            ),
        }
    }
}

/// Resolve one attack and apply its damage to the defender.
///
/// Draw order is fixed: hit (if enabled), evasion, critical, damage spread.
/// A miss consumes only the draws made so far and leaves the defender
/// untouched.
pub fn resolve_attack<R: BattleRng + ?Sized>(
    attacker: &Robot,
    defender: &mut Robot,
    rng: &mut R,
    rules: CombatRules,
) -> AttackReport {
    if rules.hit_check && rng.next_unit() > attacker.hit_rate {
        return AttackReport {
            damage: 0,
            outcome: AttackOutcome::Missed,
        };
    }

    if rng.next_unit() < defender.evasion_rate {
        return AttackReport {
            damage: 0,
            outcome: AttackOutcome::Evaded,
        };
    }

    let critical = rng.next_unit() < attacker.critical_rate;
    let multiplier = if critical { CRITICAL_MULTIPLIER } else { 1.0 };

    let base = attacker
        .attack
        .saturating_sub(defender.defense)
        .saturating_add(rng.roll_offset(DAMAGE_SPREAD));
    #[allow(clippy::cast_possible_truncation)]
    let damage = ((f64::from(base) * multiplier).floor() as i32).max(0);

    defender.take_damage(damage);

    AttackReport {
        damage,
        outcome: if critical {
            AttackOutcome::Critical
        } else {
            AttackOutcome::Hit
        },
    }
}

/// Brace for impact: permanently raise defense.
pub fn defend(actor: &mut Robot) -> String {
    actor.raise_defense(DEFEND_BONUS);
    format!("{} braces and raises defense by {DEFEND_BONUS}.", actor.name)
}

/// Repair: restore HP up to the maximum.
pub fn heal(actor: &mut Robot) -> String {
    let before = actor.hp;
    actor.heal(HEAL_AMOUNT);
    format!(
        "{} repairs itself and recovers {} HP.",
        actor.name,
        actor.hp.saturating_sub(before).max(0)
    )
}

/// An action a robot can take on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattleAction {
    /// Attack the opponent.
    #[default]
    Attack,
    /// Raise own defense.
    Defend,
    /// Restore own HP.
    Heal,
}

impl BattleAction {
    /// Command menu order.
    pub const ALL: [Self; 3] = [Self::Attack, Self::Defend, Self::Heal];

    /// Menu label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Attack => "Attack",
            Self::Defend => "Defend",
            Self::Heal => "Heal",
        }
    }
}

/// Carry out `action` for `actor` against `target`, returning the log line.
pub fn perform<R: BattleRng + ?Sized>(
    action: BattleAction,
    actor: &mut Robot,
    target: &mut Robot,
    rng: &mut R,
    rules: CombatRules,
) -> String {
    match action {
        BattleAction::Attack => {
            let report = resolve_attack(actor, target, rng, rules);
            tracing::trace!(
                attacker = %actor.name,
                defender = %target.name,
                damage = report.damage,
                outcome = ?report.outcome,
                "attack resolved"
            );
            report.message(&actor.name, &target.name)
        }
        BattleAction::Defend => defend(actor),
        BattleAction::Heal => heal(actor),
    }
}
