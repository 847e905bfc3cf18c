//! Equipment catalog.
//!
//! Equipment is static data: an identifier, the slot it fits, a set of stat
//! deltas and a line of descriptive text. The built-in table is embedded from
//! `data/equipment.json`; an external file with the same schema can replace it.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Embedded default equipment table.
const BUILTIN_CATALOG: &str = include_str!("../../data/equipment.json");

/// Text returned for equipment the catalog does not know.
pub const NO_DETAILS: &str = "No details available.";

/// Equipment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentCategory {
    /// Offensive slot.
    Weapon,
    /// Body slot.
    Armor,
    /// Trinket slot.
    Accessory,
}

impl EquipmentCategory {
    /// Every category, in selection order.
    pub const ALL: [Self; 3] = [Self::Weapon, Self::Armor, Self::Accessory];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Weapon => "Weapon",
            Self::Armor => "Armor",
            Self::Accessory => "Accessory",
        }
    }
}

impl fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed set of equipment identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentId {
    /// Balanced melee weapon.
    Sword,
    /// Heavy ranged weapon.
    Gun,
    /// High-precision weapon.
    Laser,
    /// Light armor.
    Shield,
    /// Heavy plating.
    Armor,
    /// Evasive armor.
    NanoSuit,
    /// Speed accessory.
    Boots,
    /// Defensive accessory.
    Helmet,
    /// Offensive accessory.
    Gloves,
}

impl EquipmentId {
    /// Every identifier.
    pub const ALL: [Self; 9] = [
        Self::Sword,
        Self::Gun,
        Self::Laser,
        Self::Shield,
        Self::Armor,
        Self::NanoSuit,
        Self::Boots,
        Self::Helmet,
        Self::Gloves,
    ];

    /// Stable identifier string.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sword => "Sword",
            Self::Gun => "Gun",
            Self::Laser => "Laser",
            Self::Shield => "Shield",
            Self::Armor => "Armor",
            Self::NanoSuit => "NanoSuit",
            Self::Boots => "Boots",
            Self::Helmet => "Helmet",
            Self::Gloves => "Gloves",
        }
    }
}

impl fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known equipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEquipment(pub String);

impl fmt::Display for UnknownEquipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown equipment: {}", self.0)
    }
}

impl std::error::Error for UnknownEquipment {}

impl FromStr for EquipmentId {
    type Err = UnknownEquipment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownEquipment(s.to_string()))
    }
}

/// Additive stat changes granted by a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatDelta {
    /// Attack change.
    pub attack: i32,
    /// Defense change.
    pub defense: i32,
    /// Speed change.
    pub speed: i32,
    /// Critical rate change.
    pub critical_rate: f64,
    /// Evasion rate change.
    pub evasion_rate: f64,
    /// Hit rate change.
    pub hit_rate: f64,
}

impl StatDelta {
    fn rates_finite(&self) -> bool {
        self.critical_rate.is_finite() && self.evasion_rate.is_finite() && self.hit_rate.is_finite()
    }
}

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentEntry {
    /// Identifier.
    pub id: EquipmentId,
    /// Slot this item fits.
    pub category: EquipmentCategory,
    /// Stat changes applied on equip.
    #[serde(default)]
    pub delta: StatDelta,
    /// Human-readable summary.
    pub description: String,
}

/// Validated equipment table.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<EquipmentEntry>,
}

impl Catalog {
    /// The embedded default table.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded data is broken, which the unit
    /// tests guard against.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a JSON catalog definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a category is empty, an
    /// identifier repeats, or a rate delta is not finite.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<EquipmentEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Read a catalog definition from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Validate a list of entries.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_json`].
    pub fn from_entries(entries: Vec<EquipmentEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
            if !entry.delta.rates_finite() {
                return Err(CatalogError::NonFiniteRate(entry.id));
            }
        }
        for category in EquipmentCategory::ALL {
            if !entries.iter().any(|e| e.category == category) {
                return Err(CatalogError::EmptyCategory(category));
            }
        }

        tracing::info!(entries = entries.len(), "equipment catalog loaded");
        Ok(Self { entries })
    }

    /// All entries in definition order.
    #[must_use]
    pub fn entries(&self) -> &[EquipmentEntry] {
        &self.entries
    }

    /// Entries for one slot, in definition order. Never empty.
    pub fn items(&self, category: EquipmentCategory) -> impl Iterator<Item = &EquipmentEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Number of items in a slot.
    #[must_use]
    pub fn item_count(&self, category: EquipmentCategory) -> usize {
        self.items(category).count()
    }

    /// The `index`-th item of a slot.
    #[must_use]
    pub fn item_at(&self, category: EquipmentCategory, index: usize) -> Option<&EquipmentEntry> {
        self.items(category).nth(index)
    }

    /// Look up an item, requiring it to fit the given slot.
    #[must_use]
    pub fn entry(&self, category: EquipmentCategory, id: EquipmentId) -> Option<&EquipmentEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id && e.category == category)
    }

    /// Description for an item, or [`NO_DETAILS`] if the slot has no such item.
    #[must_use]
    pub fn details(&self, category: EquipmentCategory, id: EquipmentId) -> &str {
        self.entry(category, id)
            .map_or(NO_DETAILS, |e| e.description.as_str())
    }
}
