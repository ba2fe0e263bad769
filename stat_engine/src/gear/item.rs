//! Item stacks as seen by the pipeline

use super::{GearStats, TokenStats};
use crate::stat::{Stat, StatsCollection};
use crate::types::{ClassId, EquipmentSlot, GearType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a player must have to benefit from a piece of gear
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub class: Option<ClassId>,
    #[serde(default)]
    pub stats: BTreeMap<Stat, i32>,
}

/// Read-only view of the player fields requirements are checked against
#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    pub level: u32,
    pub classes: &'a [Option<ClassId>],
    /// Base stats only; gear bonuses never satisfy gear requirements
    pub stats: &'a StatsCollection,
}

impl Requirements {
    pub fn met(&self, player: &PlayerView<'_>) -> bool {
        if player.level < self.level {
            return false;
        }
        if let Some(class) = &self.class {
            if !player.classes.iter().flatten().any(|c| c == class) {
                return false;
            }
        }
        self.stats
            .iter()
            .all(|(stat, min)| player.stats.get(*stat) >= *min)
    }
}

/// Equippable gear piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GearItem {
    pub gear_type: GearType,
    /// Slot this piece is worn in
    pub slot: EquipmentSlot,
    pub stats: GearStats,
    pub requirements: Requirements,
}

impl GearItem {
    pub fn new(gear_type: GearType, slot: EquipmentSlot, stats: GearStats) -> Self {
        GearItem {
            gear_type,
            slot,
            stats,
            requirements: Requirements::default(),
        }
    }

    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn is_two_hander(&self) -> bool {
        self.gear_type.is_two_hander()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Gear(GearItem),
    /// Loot token that opens into a gear piece
    Token(TokenStats),
    /// Anything the engine does not manage
    Misc(String),
}

/// An item plus the per-stack flags the pipeline maintains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    pub kind: ItemKind,
    /// Off-hand item suppressed by a two-handed main-hand weapon
    pub two_hand_disabled: bool,
    /// Wearer no longer meets the item's requirements
    pub requirement_disabled: bool,
}

impl ItemStack {
    pub fn new(kind: ItemKind) -> Self {
        ItemStack {
            kind,
            two_hand_disabled: false,
            requirement_disabled: false,
        }
    }

    pub fn gear(item: GearItem) -> Self {
        Self::new(ItemKind::Gear(item))
    }

    pub fn token(token: TokenStats) -> Self {
        Self::new(ItemKind::Token(token))
    }

    pub fn misc(name: impl Into<String>) -> Self {
        Self::new(ItemKind::Misc(name.into()))
    }

    pub fn as_gear(&self) -> Option<&GearItem> {
        match &self.kind {
            ItemKind::Gear(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_gear_mut(&mut self) -> Option<&mut GearItem> {
        match &mut self.kind {
            ItemKind::Gear(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&TokenStats> {
        match &self.kind {
            ItemKind::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn is_gear(&self) -> bool {
        matches!(self.kind, ItemKind::Gear(_))
    }

    /// Gear that currently contributes its stats
    pub fn is_enabled(&self) -> bool {
        !self.two_hand_disabled && !self.requirement_disabled
    }

    pub fn is_two_hander(&self) -> bool {
        self.as_gear().is_some_and(GearItem::is_two_hander)
    }
}
