//! Gear stats: rarity, binding, item level and rolled bonus stats
//!
//! A piece of gear starts ungenerated. `generate` picks which stats to roll
//! through a [`RaritySelector`] and rolls each one through a
//! [`StatRoller`], accumulating into the item's collection.

pub mod item;
pub mod tag;
pub mod token;

pub use item::{GearItem, ItemKind, ItemStack, PlayerView, Requirements};
pub use tag::{GearTag, TagError};
pub use token::{TokenStats, TokenType};

use crate::mediation::Unmediated;
use crate::stat::{RollInput, Stat, StatRoller, StatsCollection};
use crate::types::{Binding, EquipmentSlot, GearType, PlayerId, Rarity};
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Chooses which stats a new piece of gear rolls
pub trait RaritySelector {
    fn select(
        &self,
        rarity: Rarity,
        gear_type: GearType,
        slot: EquipmentSlot,
        rng: &mut dyn RngCore,
    ) -> Vec<Stat>;
}

/// Uniform picks without replacement from the primary and secondary pools,
/// counts driven by [`Rarity::stat_counts`], plus every fixed stat the slot
/// supports
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogSelector;

impl RaritySelector for CatalogSelector {
    fn select(
        &self,
        rarity: Rarity,
        _gear_type: GearType,
        slot: EquipmentSlot,
        rng: &mut dyn RngCore,
    ) -> Vec<Stat> {
        let (primary, secondary) = rarity.stat_counts();
        let mut picked: Vec<Stat> = Stat::primaries()
            .choose_multiple(rng, primary)
            .copied()
            .collect();
        picked.extend(Stat::secondaries().choose_multiple(rng, secondary).copied());
        picked.extend(
            Stat::fixed()
                .iter()
                .copied()
                .filter(|stat| stat.uuid(slot).is_ok()),
        );
        picked
    }
}

/// Per-item gear capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GearTag", from = "GearTag")]
pub struct GearStats {
    pub rarity: Rarity,
    pub binding: Binding,
    pub bound: bool,
    pub bound_to: Option<PlayerId>,
    pub ilvl: i32,
    pub generated: bool,
    pub stats: StatsCollection,
}

impl Default for GearStats {
    fn default() -> Self {
        GearStats {
            rarity: Rarity::Common,
            binding: Binding::BindOnEquip,
            bound: false,
            bound_to: None,
            ilvl: 1,
            generated: false,
            stats: StatsCollection::for_item(),
        }
    }
}

impl GearStats {
    pub fn new(rarity: Rarity, ilvl: i32) -> Self {
        GearStats {
            rarity,
            ilvl,
            ..Default::default()
        }
    }

    /// Replace this item's stats with a fresh roll
    ///
    /// Each chosen stat is accumulated with a separate `add`, so a stat that
    /// appears twice in the selection stacks.
    pub fn generate(
        &mut self,
        gear_type: GearType,
        slot: EquipmentSlot,
        selector: &dyn RaritySelector,
        roller: &dyn StatRoller,
        rng: &mut dyn RngCore,
    ) {
        let input = RollInput {
            ilvl: self.ilvl,
            rarity: self.rarity,
            gear_type,
            slot,
        };
        self.stats.clear();
        for stat in selector.select(self.rarity, gear_type, slot, rng) {
            let value = roller.roll(stat, &input, rng);
            debug!(%stat, value, ilvl = self.ilvl, "rolled gear stat");
            self.stats.add(stat, value, &mut Unmediated);
        }
        if self.stats.is_empty() {
            warn!(rarity = ?self.rarity, %slot, "gear generation produced no stats");
        }
        self.generated = true;
    }

    /// Lock the item to `player` if it is not bound yet
    pub fn bind_to(&mut self, player: PlayerId) -> bool {
        if self.bound {
            return false;
        }
        self.bound = true;
        self.bound_to = Some(player);
        true
    }

    /// True when `player` may hold this item
    pub fn check_binding(&self, player: PlayerId) -> bool {
        !self.bound || self.bound_to == Some(player)
    }

    /// Copy for editing, with a detached stat collection
    pub fn detached_copy(&self) -> Self {
        GearStats {
            stats: self.stats.detached_copy(),
            ..self.clone()
        }
    }

    /// Overwrite every field with `other`'s, keeping this item's collection owner
    pub fn load_from(&mut self, other: &GearStats) {
        self.rarity = other.rarity;
        self.binding = other.binding;
        self.bound = other.bound;
        self.bound_to = other.bound_to;
        self.ilvl = other.ilvl;
        self.generated = other.generated;
        self.stats.load_from(&other.stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat::{CatalogRoller, StatKind};
    use crate::types::{ArmorType, WeaponType};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct ZeroRoller;

    impl StatRoller for ZeroRoller {
        fn roll(&self, _stat: Stat, _input: &RollInput, _rng: &mut dyn RngCore) -> i32 {
            0
        }
    }

    fn count(stats: &[Stat], kind: StatKind) -> usize {
        stats.iter().filter(|s| s.kind() == kind).count()
    }

    #[test]
    fn test_defaults() {
        let gear = GearStats::default();
        assert_eq!(gear.rarity, Rarity::Common);
        assert_eq!(gear.binding, Binding::BindOnEquip);
        assert_eq!(gear.ilvl, 1);
        assert!(!gear.generated);
        assert!(gear.stats.is_empty());
    }

    #[test]
    fn test_selection_counts_per_rarity() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let gear_type = GearType::Armor(ArmorType::Mail);
        for rarity in Rarity::all() {
            let picked = CatalogSelector.select(*rarity, gear_type, EquipmentSlot::Chest, &mut rng);
            let (p, s) = rarity.stat_counts();
            assert_eq!(count(&picked, StatKind::Primary), p);
            assert_eq!(count(&picked, StatKind::Secondary), s);
            // Health and Armor both support the chest
            assert_eq!(count(&picked, StatKind::Fixed), 2);
        }
    }

    #[test]
    fn test_main_hand_rolls_base_damage() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let picked = CatalogSelector.select(
            Rarity::Common,
            GearType::Weapon(WeaponType::Sword),
            EquipmentSlot::MainHand,
            &mut rng,
        );
        assert!(picked.contains(&Stat::BaseDamage));
        assert!(!picked.contains(&Stat::Health));
        assert!(!picked.contains(&Stat::Armor));
    }

    #[test]
    fn test_generate_is_non_empty_for_every_rarity() {
        for rarity in Rarity::all() {
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            let mut gear = GearStats::new(*rarity, 5);
            gear.generate(
                GearType::Armor(ArmorType::Plate),
                EquipmentSlot::Head,
                &CatalogSelector,
                &CatalogRoller,
                &mut rng,
            );
            assert!(gear.generated);
            assert!(!gear.stats.is_empty(), "{:?} generated nothing", rarity);
            assert!(gear.stats.iter().all(|(_, v)| (5..15).contains(&v)));
        }
    }

    #[test]
    fn test_generate_is_deterministic_for_a_seed() {
        let roll = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut gear = GearStats::new(Rarity::Legendary, 20);
            gear.generate(
                GearType::Weapon(WeaponType::Staff),
                EquipmentSlot::MainHand,
                &CatalogSelector,
                &CatalogRoller,
                &mut rng,
            );
            gear.stats.to_map()
        };
        assert_eq!(roll(9), roll(9));
    }

    #[test]
    fn test_generate_replaces_previous_stats() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut gear = GearStats::new(Rarity::Common, 1);
        gear.stats.set(Stat::Charisma, 999, &mut Unmediated);
        let gear_type = GearType::Armor(ArmorType::Leather);

        for _ in 0..2 {
            gear.generate(
                gear_type,
                EquipmentSlot::Chest,
                &CatalogSelector,
                &CatalogRoller,
                &mut rng,
            );
            assert_ne!(gear.stats.get(Stat::Charisma), 999);
            // Common rolls at ilvl 1 stay below 11, so nothing stacked
            assert!(gear.stats.iter().all(|(_, v)| (1..11).contains(&v)));
        }
        let (p, s) = Rarity::Common.stat_counts();
        assert!(gear.stats.len() <= p + s + 2);
    }

    #[test]
    fn test_degenerate_roller_yields_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut gear = GearStats::new(Rarity::Epic, 10);
        gear.generate(
            GearType::Armor(ArmorType::Cloth),
            EquipmentSlot::Feet,
            &CatalogSelector,
            &ZeroRoller,
            &mut rng,
        );
        assert!(gear.generated);
        assert!(gear.stats.is_empty());
    }

    #[test]
    fn test_binding_happens_once() {
        let a = PlayerId::new_random();
        let b = PlayerId::new_random();
        let mut gear = GearStats::default();
        assert!(gear.check_binding(a));
        assert!(gear.check_binding(b));

        assert!(gear.bind_to(a));
        assert!(!gear.bind_to(b));
        assert_eq!(gear.bound_to, Some(a));
        assert!(gear.check_binding(a));
        assert!(!gear.check_binding(b));
    }
}
