//! Random sources for battle resolution.
//!
//! The engine never reaches for ambient randomness. Every draw goes through a
//! [`BattleRng`] owned by the caller, so a seeded source replays a match
//! exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A sequential source of uniform draws.
pub trait BattleRng {
    /// Next value, uniform in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Map one draw onto the inclusive range `[-spread, spread]`.
    ///
    /// Each of the `2 * spread + 1` values is equally likely.
    fn roll_offset(&mut self, spread: i32) -> i32 {
        let width = spread.saturating_mul(2).saturating_add(1).max(1);
        #[allow(clippy::cast_possible_truncation)]
        let bucket = (self.next_unit() * f64::from(width)).floor() as i32;
        bucket.clamp(0, width - 1) - spread
    }
}

/// Seeded `ChaCha8` source used by real matches.
///
/// `ChaCha8` output is stable across platforms and releases, which keeps
/// seeds meaningful in bug reports and tournament logs.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: Option<u64>,
}

impl GameRng {
    /// Deterministic source for the given seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Source seeded once from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    /// The seed this source was built from, if it was seeded explicitly.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl BattleRng for GameRng {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of draws, cycling when it runs out.
///
/// Handy for pinning down an exact combat sequence.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    /// Script the given draws. Values are clamped into `[0, 1)`; an empty
    /// script always yields `0.0`.
    #[must_use]
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws = draws
            .into()
            .into_iter()
            .map(|d| if d.is_finite() { d.clamp(0.0, 1.0 - f64::EPSILON) } else { 0.0 })
            .collect();
        Self { draws, cursor: 0 }
    }

    /// Number of draws consumed so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.cursor
    }
}

impl BattleRng for ScriptedRng {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}
