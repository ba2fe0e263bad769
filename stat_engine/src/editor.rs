//! Item stat editor stations
//!
//! A station sits at a block position and holds one item plus working copies
//! of gear and token stats. Saving copies the working stats into the item;
//! loading copies the item's stats into the working copies.

use crate::gear::{GearStats, ItemKind, ItemStack, TokenStats, TokenType};
use crate::stat::{Owner, StatsCollection};
use crate::types::BlockPos;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stats sent from the editor UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditorPayload {
    Gear(GearStats),
    Token(TokenStats),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorStation {
    pub item: Option<ItemStack>,
    pub gear: GearStats,
    pub token: TokenStats,
}

impl Default for EditorStation {
    fn default() -> Self {
        EditorStation {
            item: None,
            gear: GearStats {
                stats: StatsCollection::new(Owner::Detached),
                ..Default::default()
            },
            token: TokenStats::new(TokenType::Armor, 1),
        }
    }
}

impl EditorStation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working copy matching the payload kind
    pub fn apply(&mut self, payload: EditorPayload) {
        match payload {
            EditorPayload::Gear(gear) => self.gear = gear.detached_copy(),
            EditorPayload::Token(token) => self.token = token,
        }
    }

    /// Write the working copy into the held item, false if nothing to write to
    pub fn save(&mut self) -> bool {
        let Some(item) = self.item.as_mut() else {
            return false;
        };
        match &mut item.kind {
            ItemKind::Gear(gear) => {
                gear.stats.load_from(&self.gear);
                true
            }
            ItemKind::Token(token) => {
                *token = self.token.clone();
                true
            }
            ItemKind::Misc(_) => false,
        }
    }

    /// Copy the held item's stats into the working copy
    pub fn load(&mut self) -> bool {
        let Some(item) = self.item.as_ref() else {
            return false;
        };
        match &item.kind {
            ItemKind::Gear(gear) => {
                self.gear = gear.stats.detached_copy();
                true
            }
            ItemKind::Token(token) => {
                self.token = token.clone();
                true
            }
            ItemKind::Misc(_) => false,
        }
    }
}

/// Stations by position
#[derive(Debug, Clone, Default)]
pub struct EditorStations {
    stations: HashMap<BlockPos, EditorStation>,
}

impl EditorStations {
    pub fn place(&mut self, pos: BlockPos) -> &mut EditorStation {
        self.stations.entry(pos).or_default()
    }

    pub fn remove(&mut self, pos: BlockPos) -> Option<EditorStation> {
        self.stations.remove(&pos)
    }

    pub fn get(&self, pos: BlockPos) -> Option<&EditorStation> {
        self.stations.get(&pos)
    }

    pub fn get_mut(&mut self, pos: BlockPos) -> Option<&mut EditorStation> {
        self.stations.get_mut(&pos)
    }

    pub fn contains(&self, pos: BlockPos) -> bool {
        self.stations.contains_key(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::GearItem;
    use crate::mediation::Unmediated;
    use crate::stat::Stat;
    use crate::types::{EquipmentSlot, GearType, OffhandType, Rarity};

    fn shield() -> ItemStack {
        ItemStack::gear(GearItem::new(
            GearType::Offhand(OffhandType::Shield),
            EquipmentSlot::OffHand,
            GearStats::default(),
        ))
    }

    #[test]
    fn test_save_writes_working_copy() {
        let mut station = EditorStation::new();
        station.item = Some(shield());

        let mut edited = GearStats::new(Rarity::Legendary, 40);
        edited.stats.set(Stat::Block, 9, &mut Unmediated);
        station.apply(EditorPayload::Gear(edited));
        assert_eq!(station.gear.stats.owner(), Owner::Detached);

        assert!(station.save());
        let gear = station.item.as_ref().and_then(ItemStack::as_gear).unwrap();
        assert_eq!(gear.stats.rarity, Rarity::Legendary);
        assert_eq!(gear.stats.stats.get(Stat::Block), 9);
        assert_eq!(gear.stats.stats.owner(), Owner::Item);
    }

    #[test]
    fn test_load_reads_item() {
        let mut station = EditorStation::new();
        let mut stack = shield();
        if let Some(gear) = stack.as_gear_mut() {
            gear.stats.stats.set(Stat::Reflect, 2, &mut Unmediated);
        }
        station.item = Some(stack);

        assert!(station.load());
        assert_eq!(station.gear.stats.get(Stat::Reflect), 2);
        assert_eq!(station.gear.stats.owner(), Owner::Detached);
    }

    #[test]
    fn test_empty_station() {
        let mut station = EditorStation::new();
        assert!(!station.save());
        assert!(!station.load());
        station.item = Some(ItemStack::misc("apple"));
        assert!(!station.save());
    }
}
