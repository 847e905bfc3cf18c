//! Match configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. The defaults reproduce the full game: hit and evasion rolls, a
//! confirm gate before the first battle, one round per second and a rematch
//! after every win.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::{CombatRules, DEFAULT_LOG_CAPACITY, EquipmentId, Loadout};

/// How battle rounds are triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleMode {
    /// One attack-only round per elapsed interval.
    #[default]
    Timed,
    /// The player picks Attack, Defend or Heal; Confirm resolves a round.
    Command,
}

/// Tunables for a [`Match`](crate::state::Match).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Battle log lines kept.
    pub log_capacity: usize,
    /// Real-time pacing between timed rounds, in milliseconds.
    pub round_interval_ms: u64,
    /// Round trigger.
    pub battle_mode: BattleMode,
    /// Roll the attacker's hit rate before evasion.
    pub hit_check: bool,
    /// Require a Confirm after the last equipment pick before fighting.
    pub pre_battle_gate: bool,
    /// After a win, re-equip and fight a fresh opponent.
    pub rematch: bool,
    /// Equipment the opponent starts every battle with.
    pub enemy_loadout: Loadout,
    /// Safety bound for headless runs.
    pub max_rounds: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            log_capacity: DEFAULT_LOG_CAPACITY,
            round_interval_ms: 1000,
            battle_mode: BattleMode::Timed,
            hit_check: true,
            pre_battle_gate: true,
            rematch: true,
            enemy_loadout: Loadout::new(EquipmentId::Gun, EquipmentId::Armor, EquipmentId::Helmet),
            max_rounds: 500,
        }
    }
}

impl MatchConfig {
    /// Parse a JSON config.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero log capacity or a zero round interval.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }
        if self.round_interval_ms == 0 {
            return Err(ConfigError::ZeroRoundInterval);
        }
        Ok(())
    }

    /// Round pacing as a duration.
    #[must_use]
    pub const fn round_interval(&self) -> Duration {
        Duration::from_millis(self.round_interval_ms)
    }

    /// Combat rules implied by this config.
    #[must_use]
    pub const fn combat_rules(&self) -> CombatRules {
        CombatRules {
            hit_check: self.hit_check,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.log_capacity, 12);
        assert_eq!(config.round_interval(), Duration::from_secs(1));
        assert!(config.combat_rules().hit_check);
        assert_eq!(config.enemy_loadout.weapon, Some(EquipmentId::Gun));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MatchConfig::from_json(r#"{"battle_mode": "command", "rematch": false}"#).unwrap();
        assert_eq!(config.battle_mode, BattleMode::Command);
        assert!(!config.rematch);
        assert_eq!(config.log_capacity, 12);
        assert!(config.pre_battle_gate);
    }

    #[test]
    fn test_enemy_loadout_from_json() {
        let config =
            MatchConfig::from_json(r#"{"enemy_loadout": {"weapon": "Laser"}}"#).unwrap();
        assert_eq!(
            config.enemy_loadout,
            Loadout {
                weapon: Some(EquipmentId::Laser),
                armor: None,
                accessory: None
            }
        );
    }

    #[test]
    fn test_rejects_zero_capacity() {
        assert!(matches!(
            MatchConfig::from_json(r#"{"log_capacity": 0}"#),
            Err(ConfigError::ZeroLogCapacity)
        ));
    }

    #[test]
    fn test_rejects_zero_interval() {
        assert!(matches!(
            MatchConfig::from_json(r#"{"round_interval_ms": 0}"#),
            Err(ConfigError::ZeroRoundInterval)
        ));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(
            MatchConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");
        std::fs::write(&path, r#"{"max_rounds": 42}"#).unwrap();
        assert_eq!(MatchConfig::load(&path).unwrap().max_rounds, 42);
    }
}
