//! Robot stat blocks and equipment slots.

use serde::{Deserialize, Serialize};

use crate::game::{Catalog, EquipmentCategory, EquipmentId, StatDelta};

/// Hit point ceiling for every robot.
pub const MAX_HP: i32 = 100;

/// Equipment choice for each slot. `None` leaves the slot empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Loadout {
    /// Weapon slot.
    pub weapon: Option<EquipmentId>,
    /// Armor slot.
    pub armor: Option<EquipmentId>,
    /// Accessory slot.
    pub accessory: Option<EquipmentId>,
}

impl Loadout {
    /// Loadout with every slot filled.
    #[must_use]
    pub const fn new(weapon: EquipmentId, armor: EquipmentId, accessory: EquipmentId) -> Self {
        Self {
            weapon: Some(weapon),
            armor: Some(armor),
            accessory: Some(accessory),
        }
    }

    /// The item chosen for a slot.
    #[must_use]
    pub const fn get(&self, category: EquipmentCategory) -> Option<EquipmentId> {
        match category {
            EquipmentCategory::Weapon => self.weapon,
            EquipmentCategory::Armor => self.armor,
            EquipmentCategory::Accessory => self.accessory,
        }
    }

    fn set(&mut self, category: EquipmentCategory, id: EquipmentId) {
        match category {
            EquipmentCategory::Weapon => self.weapon = Some(id),
            EquipmentCategory::Armor => self.armor = Some(id),
            EquipmentCategory::Accessory => self.accessory = Some(id),
        }
    }
}

/// A combatant.
///
/// HP is allowed to dip below zero when a blow lands on a nearly dead robot;
/// anything at or below zero counts as defeated. Use [`Robot::display_hp`]
/// for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Robot {
    /// Display name.
    pub name: String,
    /// Current hit points.
    pub hp: i32,
    /// Attack power.
    pub attack: i32,
    /// Defense, subtracted from incoming attack power.
    pub defense: i32,
    /// Turn order priority. May go negative with heavy equipment.
    pub speed: i32,
    /// Chance of a double-damage hit.
    pub critical_rate: f64,
    /// Chance of dodging an incoming attack.
    pub evasion_rate: f64,
    /// Chance of an outgoing attack connecting.
    pub hit_rate: f64,
    /// Equipped items.
    pub equipment: Loadout,
}

impl Robot {
    /// Robot with the given base stats and nothing equipped.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        attack: i32,
        defense: i32,
        speed: i32,
        critical_rate: f64,
        evasion_rate: f64,
        hit_rate: f64,
    ) -> Self {
        Self {
            name: name.into(),
            hp: MAX_HP,
            attack,
            defense,
            speed,
            critical_rate,
            evasion_rate,
            hit_rate,
            equipment: Loadout::default(),
        }
    }

    /// The player's robot at its starting stats.
    #[must_use]
    pub fn player() -> Self {
        Self::new("PlayerBot", 20, 10, 5, 0.1, 0.1, 0.8)
    }

    /// The opponent at its starting stats, before its loadout.
    #[must_use]
    pub fn enemy() -> Self {
        Self::new("EnemyBot", 18, 8, 4, 0.05, 0.05, 0.75)
    }

    /// Equip an item into a slot, stacking its deltas onto current stats.
    ///
    /// Equipping is not idempotent: the same item twice adds its delta twice.
    /// Items the catalog does not list for this slot change nothing.
    /// Returns whether the catalog resolved the item.
    pub fn equip(&mut self, catalog: &Catalog, category: EquipmentCategory, id: EquipmentId) -> bool {
        let Some(entry) = catalog.entry(category, id) else {
            tracing::debug!(robot = %self.name, %category, %id, "equipment not in catalog, ignored");
            return false;
        };
        self.apply_delta(&entry.delta);
        self.equipment.set(category, id);
        true
    }

    /// Equip a weapon.
    pub fn equip_weapon(&mut self, catalog: &Catalog, id: EquipmentId) -> bool {
        self.equip(catalog, EquipmentCategory::Weapon, id)
    }

    /// Equip armor.
    pub fn equip_armor(&mut self, catalog: &Catalog, id: EquipmentId) -> bool {
        self.equip(catalog, EquipmentCategory::Armor, id)
    }

    /// Equip an accessory.
    pub fn equip_accessory(&mut self, catalog: &Catalog, id: EquipmentId) -> bool {
        self.equip(catalog, EquipmentCategory::Accessory, id)
    }

    /// Equip every filled slot of a loadout.
    pub fn apply_loadout(&mut self, catalog: &Catalog, loadout: &Loadout) {
        for category in EquipmentCategory::ALL {
            if let Some(id) = loadout.get(category) {
                self.equip(catalog, category, id);
            }
        }
    }

    fn apply_delta(&mut self, delta: &StatDelta) {
        self.attack = self.attack.saturating_add(delta.attack);
        self.defense = self.defense.saturating_add(delta.defense);
        self.speed = self.speed.saturating_add(delta.speed);
        self.critical_rate += delta.critical_rate;
        self.evasion_rate += delta.evasion_rate;
        self.hit_rate += delta.hit_rate;
    }

    /// Subtract damage. Unclamped; see the type docs.
    pub fn take_damage(&mut self, damage: i32) {
        self.hp = self.hp.saturating_sub(damage);
    }

    /// Restore HP, never exceeding [`MAX_HP`].
    pub fn heal(&mut self, amount: i32) {
        self.hp = self.hp.saturating_add(amount).min(MAX_HP);
    }

    /// Restore HP to [`MAX_HP`].
    pub fn restore(&mut self) {
        self.hp = MAX_HP;
    }

    /// Permanently raise defense.
    pub fn raise_defense(&mut self, amount: i32) {
        self.defense = self.defense.saturating_add(amount);
    }

    /// Whether the robot can still act.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// HP floored at zero.
    #[must_use]
    pub fn display_hp(&self) -> i32 {
        self.hp.max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_equip_extreme_delta_saturates() {
        let json = r#"[
            {"id": "Sword", "category": "Weapon", "delta": {"attack": 2147483647}, "description": "s"},
            {"id": "Shield", "category": "Armor", "delta": {"defense": -2147483648}, "description": "a"},
            {"id": "Boots", "category": "Accessory", "description": "b"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let mut robot = Robot::player();
        assert!(robot.equip_weapon(&catalog, EquipmentId::Sword));
        assert!(robot.equip_weapon(&catalog, EquipmentId::Sword));
        assert_eq!(robot.attack, i32::MAX);
        assert!(robot.equip_armor(&catalog, EquipmentId::Shield));
        assert!(robot.equip_armor(&catalog, EquipmentId::Shield));
        assert_eq!(robot.defense, i32::MIN);
    }

    #[test]
    fn test_player_base_stats() {
        let player = Robot::player();
        assert_eq!(player.name, "PlayerBot");
        assert_eq!(player.hp, MAX_HP);
        assert_eq!((player.attack, player.defense, player.speed), (20, 10, 5));
        assert_eq!(player.equipment, Loadout::default());
    }

    #[test]
    fn test_equip_weapon_applies_delta() {
        let mut player = Robot::player();
        assert!(player.equip_weapon(&catalog(), EquipmentId::Laser));
        assert_eq!(player.attack, 40);
        assert!((player.critical_rate - 0.15).abs() < 1e-9);
        assert!((player.hit_rate - 0.95).abs() < 1e-9);
        assert_eq!(player.equipment.weapon, Some(EquipmentId::Laser));
    }

    #[test]
    fn test_equip_stacks() {
        let mut player = Robot::player();
        let catalog = catalog();
        player.equip_weapon(&catalog, EquipmentId::Sword);
        player.equip_weapon(&catalog, EquipmentId::Sword);
        assert_eq!(player.attack, 40);
    }

    #[test]
    fn test_equip_wrong_slot_is_noop() {
        let mut player = Robot::player();
        let before = player.clone();
        assert!(!player.equip_weapon(&catalog(), EquipmentId::Boots));
        assert_eq!(player, before);
    }

    #[test]
    fn test_enemy_default_loadout() {
        let mut enemy = Robot::enemy();
        enemy.apply_loadout(
            &catalog(),
            &Loadout::new(EquipmentId::Gun, EquipmentId::Armor, EquipmentId::Helmet),
        );
        assert_eq!(enemy.attack, 33);
        assert_eq!(enemy.defense, 28);
        assert_eq!(enemy.speed, -2);
        assert!((enemy.hit_rate - 0.80).abs() < 1e-9);
    }

    #[test]
    fn test_heal_clamps() {
        let mut robot = Robot::player();
        robot.take_damage(5);
        robot.heal(10);
        assert_eq!(robot.hp, MAX_HP);

        robot.take_damage(30);
        robot.heal(10);
        assert_eq!(robot.hp, 80);
    }

    #[test]
    fn test_damage_can_go_negative() {
        let mut robot = Robot::enemy();
        robot.take_damage(130);
        assert_eq!(robot.hp, -30);
        assert!(!robot.is_alive());
        assert_eq!(robot.display_hp(), 0);
    }

    #[test]
    fn test_raise_defense() {
        let mut robot = Robot::player();
        robot.raise_defense(5);
        assert_eq!(robot.defense, 15);
    }
}
