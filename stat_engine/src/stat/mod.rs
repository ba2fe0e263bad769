//! Stat registry: the catalog of primary, secondary and fixed stats
//!
//! Every stat is a plain `Copy` identifier backed by one [`StatDef`] record in
//! an ordered static table. The record carries the per-slot modifier UUIDs, the
//! host attribute it writes into, and the transform/roll behaviour.

mod catalog;
pub mod collection;
pub mod roll;

pub use collection::{Owner, StatsCollection};
pub use roll::{default_roll, CatalogRoller, RollFn, RollInput, StatRoller};

use crate::types::EquipmentSlot;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Stat lookup error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatError {
    #[error("`{stat}` is not applicable to slot `{slot}`")]
    UnsupportedSlot { stat: Stat, slot: EquipmentSlot },
    #[error("Unknown stat key: {0}")]
    UnknownStat(String),
}

/// Which catalog a stat belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Primary,
    Secondary,
    Fixed,
}

/// Attributes that already exist in the host and must not be registered again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostAttribute {
    MaxHealth,
    MovementSpeed,
    AttackDamage,
}

/// Binding from a stat into the host's derived-attribute system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    /// Attribute owned by this engine, registered per player entity
    Custom(&'static str),
    /// Pre-existing host attribute
    Host(HostAttribute),
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKey::Custom(name) => f.write_str(name),
            AttributeKey::Host(host) => write!(f, "host.{:?}", host),
        }
    }
}

/// A character statistic
///
/// Discriminants index the catalog table, so variant order is the fixed
/// enumeration order returned by [`Stat::values`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stat {
    // === Primary ===
    Strength,
    Constitution,
    Dexterity,
    Intelligence,
    Wisdom,
    Charisma,

    // === Secondary ===
    Psyche,
    Regen,
    Spirit,
    Reflect,
    Block,
    Dodge,
    Speed,
    LifeStealChance,
    LifeSteal,
    ManaLeechChance,
    ManaLeech,
    CritChance,
    CritDamage,
    BonusToSkill,
    BonusDamage,
    Resistance,
    Root,
    Slow,
    CooldownReduction,
    ManaReduction,

    // === Fixed ===
    Health,
    Armor,
    BaseDamage,
}

const PRIMARY_END: usize = 6;
const SECONDARY_END: usize = 26;

impl Stat {
    /// All stats in fixed enumeration order
    pub fn values() -> &'static [Stat] {
        &ALL_STATS
    }

    pub fn primaries() -> &'static [Stat] {
        &ALL_STATS[..PRIMARY_END]
    }

    pub fn secondaries() -> &'static [Stat] {
        &ALL_STATS[PRIMARY_END..SECONDARY_END]
    }

    pub fn fixed() -> &'static [Stat] {
        &ALL_STATS[SECONDARY_END..]
    }

    /// The catalog record for this stat
    pub fn def(self) -> &'static StatDef {
        &catalog::STAT_DEFS[self as usize]
    }

    pub fn kind(self) -> StatKind {
        self.def().kind
    }

    /// Stable identity, used as JSON/tag/wire key
    pub fn key(self) -> &'static str {
        self.def().key
    }

    /// Look a stat up by its stable key
    pub fn from_key(key: &str) -> Result<Stat, StatError> {
        Stat::values()
            .iter()
            .copied()
            .find(|s| s.key() == key)
            .ok_or_else(|| StatError::UnknownStat(key.to_string()))
    }

    /// Modifier UUID for this stat in the given slot
    pub fn uuid(self, slot: EquipmentSlot) -> Result<Uuid, StatError> {
        let def = self.def();
        (def.slot_lookup)(def.uuids, slot).ok_or(StatError::UnsupportedSlot { stat: self, slot })
    }

    pub fn attribute(self) -> AttributeKey {
        self.def().attribute
    }

    /// Whether the attribute must be registered into the host per entity
    pub fn should_register(self) -> bool {
        matches!(self.def().attribute, AttributeKey::Custom(_))
    }

    pub fn has_transform(self) -> bool {
        self.def().has_transform
    }

    /// Convert a stored integer into the host attribute value
    pub fn transform(self, value: i32) -> f64 {
        (self.def().transform)(value)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Stat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Stat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Stat::from_key(&key).map_err(serde::de::Error::custom)
    }
}

/// Catalog entry: identity plus behaviour table
pub struct StatDef {
    pub stat: Stat,
    pub kind: StatKind,
    pub key: &'static str,
    uuids: &'static [Uuid],
    slot_lookup: fn(&'static [Uuid], EquipmentSlot) -> Option<Uuid>,
    pub attribute: AttributeKey,
    has_transform: bool,
    transform: fn(i32) -> f64,
    roll: RollFn,
}

impl StatDef {
    /// Roll a value for this stat on a new piece of gear
    pub fn roll(&self, input: &RollInput, rng: &mut dyn rand::RngCore) -> i32 {
        (self.roll)(input, rng)
    }
}

impl fmt::Debug for StatDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatDef")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("attribute", &self.attribute)
            .finish()
    }
}

static ALL_STATS: [Stat; 29] = [
    Stat::Strength,
    Stat::Constitution,
    Stat::Dexterity,
    Stat::Intelligence,
    Stat::Wisdom,
    Stat::Charisma,
    Stat::Psyche,
    Stat::Regen,
    Stat::Spirit,
    Stat::Reflect,
    Stat::Block,
    Stat::Dodge,
    Stat::Speed,
    Stat::LifeStealChance,
    Stat::LifeSteal,
    Stat::ManaLeechChance,
    Stat::ManaLeech,
    Stat::CritChance,
    Stat::CritDamage,
    Stat::BonusToSkill,
    Stat::BonusDamage,
    Stat::Resistance,
    Stat::Root,
    Stat::Slow,
    Stat::CooldownReduction,
    Stat::ManaReduction,
    Stat::Health,
    Stat::Armor,
    Stat::BaseDamage,
];
