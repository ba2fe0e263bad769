//! Core identifiers and small enums shared by every module

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Equipment slot on a player-like entity
///
/// Ordering follows the per-slot modifier UUID tables in the stat catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Feet,
    Legs,
    Chest,
    Head,
    OffHand,
    MainHand,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Feet,
            EquipmentSlot::Legs,
            EquipmentSlot::Chest,
            EquipmentSlot::Head,
            EquipmentSlot::OffHand,
            EquipmentSlot::MainHand,
        ]
    }

    /// The four armour slots
    pub fn armor() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Feet,
            EquipmentSlot::Legs,
            EquipmentSlot::Chest,
            EquipmentSlot::Head,
        ]
    }

    /// Position in the per-slot UUID tables
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_armor(self) -> bool {
        self.index() < 4
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquipmentSlot::Feet => "feet",
            EquipmentSlot::Legs => "legs",
            EquipmentSlot::Chest => "chest",
            EquipmentSlot::Head => "head",
            EquipmentSlot::OffHand => "offhand",
            EquipmentSlot::MainHand => "mainhand",
        };
        f.write_str(name)
    }
}

/// Item rarity, drives how many stats a piece of gear rolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn all() -> &'static [Rarity] {
        &[
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ]
    }

    /// Number of (primary, secondary) stats rolled at this rarity
    pub fn stat_counts(self) -> (usize, usize) {
        match self {
            Rarity::Common => (1, 0),
            Rarity::Uncommon => (1, 1),
            Rarity::Rare => (2, 1),
            Rarity::Epic => (2, 2),
            Rarity::Legendary => (3, 2),
        }
    }

    /// Relative weight when a loot token rolls its own rarity
    pub fn drop_weight(self) -> u32 {
        match self {
            Rarity::Common => 50,
            Rarity::Uncommon => 25,
            Rarity::Rare => 10,
            Rarity::Epic => 4,
            Rarity::Legendary => 1,
        }
    }
}

/// When (and whether) an item becomes locked to a single owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    None,
    BindOnEquip,
    BindOnPickup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorType {
    Cloth,
    Leather,
    Mail,
    Plate,
}

impl ArmorType {
    pub fn all() -> &'static [ArmorType] {
        &[
            ArmorType::Cloth,
            ArmorType::Leather,
            ArmorType::Mail,
            ArmorType::Plate,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    Sword,
    Axe,
    Mace,
    Dagger,
    Wand,
    Greatsword,
    Greataxe,
    Staff,
    Bow,
}

impl WeaponType {
    pub fn all() -> &'static [WeaponType] {
        &[
            WeaponType::Sword,
            WeaponType::Axe,
            WeaponType::Mace,
            WeaponType::Dagger,
            WeaponType::Wand,
            WeaponType::Greatsword,
            WeaponType::Greataxe,
            WeaponType::Staff,
            WeaponType::Bow,
        ]
    }

    /// Two-handed weapons disable whatever sits in the off-hand
    pub fn is_two_hander(self) -> bool {
        matches!(
            self,
            WeaponType::Greatsword | WeaponType::Greataxe | WeaponType::Staff | WeaponType::Bow
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffhandType {
    Shield,
    Tome,
    Quiver,
}

impl OffhandType {
    pub fn all() -> &'static [OffhandType] {
        &[OffhandType::Shield, OffhandType::Tome, OffhandType::Quiver]
    }
}

/// Kind of gear, as consumed by the roll functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GearType {
    Armor(ArmorType),
    Weapon(WeaponType),
    Offhand(OffhandType),
}

impl GearType {
    pub fn is_two_hander(self) -> bool {
        matches!(self, GearType::Weapon(w) if w.is_two_hander())
    }
}

/// Handle to a player entity in the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new_random() -> Self {
        PlayerId(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier for a skill definition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkillId(pub String);

impl From<&str> for SkillId {
    fn from(s: &str) -> Self {
        SkillId(s.to_string())
    }
}

impl From<String> for SkillId {
    fn from(s: String) -> Self {
        SkillId(s)
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier for a player class definition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClassId(pub String);

impl From<&str> for ClassId {
    fn from(s: &str) -> Self {
        ClassId(s.to_string())
    }
}

impl From<String> for ClassId {
    fn from(s: String) -> Self {
        ClassId(s)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// World position of a block (used to address editor stations)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        BlockPos { x, y, z }
    }
}

/// Which side of the connection a piece of code runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Authoritative simulation
    Server,
    Client,
}

/// Tick phase reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPhase {
    Start,
    End,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_indices_follow_uuid_layout() {
        assert_eq!(EquipmentSlot::Feet.index(), 0);
        assert_eq!(EquipmentSlot::Head.index(), 3);
        assert_eq!(EquipmentSlot::OffHand.index(), 4);
        assert_eq!(EquipmentSlot::MainHand.index(), 5);
        assert!(EquipmentSlot::Chest.is_armor());
        assert!(!EquipmentSlot::OffHand.is_armor());
    }

    #[test]
    fn test_two_handers() {
        assert!(GearType::Weapon(WeaponType::Greatsword).is_two_hander());
        assert!(GearType::Weapon(WeaponType::Bow).is_two_hander());
        assert!(!GearType::Weapon(WeaponType::Dagger).is_two_hander());
        assert!(!GearType::Offhand(OffhandType::Shield).is_two_hander());
    }

    #[test]
    fn test_rarity_counts_grow() {
        let mut last = 0;
        for rarity in Rarity::all() {
            let (p, s) = rarity.stat_counts();
            assert!(p + s >= last);
            assert!(p >= 1, "every rarity rolls at least one primary stat");
            last = p + s;
        }
    }
}
