//! Loot tokens: unopened gear of a known category

use super::{GearItem, GearStats, ItemStack, Requirements};
use crate::types::{
    ArmorType, Binding, EquipmentSlot, GearType, OffhandType, PlayerId, Rarity, WeaponType,
};
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Category of gear a token opens into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Armor,
    Weapon,
    Offhand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStats {
    pub token_type: TokenType,
    /// Fixed rarity, or rolled on open when absent
    #[serde(default)]
    pub rarity: Option<Rarity>,
    pub ilvl: i32,
    pub level_req: u32,
    pub binding: Binding,
    #[serde(default)]
    pub bound: bool,
    #[serde(default)]
    pub bound_to: Option<PlayerId>,
}

impl TokenStats {
    pub fn new(token_type: TokenType, ilvl: i32) -> Self {
        TokenStats {
            token_type,
            rarity: None,
            ilvl,
            level_req: 1,
            binding: Binding::BindOnEquip,
            bound: false,
            bound_to: None,
        }
    }

    pub fn bind_to(&mut self, player: PlayerId) -> bool {
        if self.bound {
            return false;
        }
        self.bound = true;
        self.bound_to = Some(player);
        true
    }

    pub fn check_binding(&self, player: PlayerId) -> bool {
        !self.bound || self.bound_to == Some(player)
    }

    /// Open the token into an ungenerated gear stack
    ///
    /// Rarity, binding state, item level and level requirement carry over.
    pub fn open(&self, rng: &mut dyn RngCore) -> ItemStack {
        let rarity = match self.rarity {
            Some(rarity) => rarity,
            None => Rarity::all()
                .choose_weighted(rng, |r| r.drop_weight())
                .copied()
                .unwrap_or(Rarity::Common),
        };

        let (gear_type, slot) = match self.token_type {
            TokenType::Armor => (
                GearType::Armor(*ArmorType::all().choose(rng).unwrap_or(&ArmorType::Cloth)),
                *EquipmentSlot::armor()
                    .choose(rng)
                    .unwrap_or(&EquipmentSlot::Chest),
            ),
            TokenType::Weapon => (
                GearType::Weapon(*WeaponType::all().choose(rng).unwrap_or(&WeaponType::Sword)),
                EquipmentSlot::MainHand,
            ),
            TokenType::Offhand => (
                GearType::Offhand(
                    *OffhandType::all()
                        .choose(rng)
                        .unwrap_or(&OffhandType::Shield),
                ),
                EquipmentSlot::OffHand,
            ),
        };

        let stats = GearStats {
            rarity,
            binding: self.binding,
            bound: self.bound,
            bound_to: self.bound_to,
            ilvl: self.ilvl,
            ..Default::default()
        };
        debug!(?gear_type, %slot, ?rarity, ilvl = self.ilvl, "opened loot token");

        ItemStack::gear(GearItem::new(gear_type, slot, stats).with_requirements(Requirements {
            level: self.level_req,
            ..Default::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_open_carries_fields() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let owner = PlayerId::new_random();
        let mut token = TokenStats::new(TokenType::Weapon, 30);
        token.rarity = Some(Rarity::Rare);
        token.level_req = 25;
        token.binding = Binding::BindOnPickup;
        token.bind_to(owner);

        let stack = token.open(&mut rng);
        let gear = stack.as_gear().unwrap();
        assert_eq!(gear.slot, EquipmentSlot::MainHand);
        assert!(matches!(gear.gear_type, GearType::Weapon(_)));
        assert_eq!(gear.stats.rarity, Rarity::Rare);
        assert_eq!(gear.stats.ilvl, 30);
        assert_eq!(gear.stats.bound_to, Some(owner));
        assert!(!gear.stats.generated);
        assert_eq!(gear.requirements.level, 25);
    }

    #[test]
    fn test_armor_token_lands_in_armor_slot() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..20 {
            let stack = TokenStats::new(TokenType::Armor, 1).open(&mut rng);
            let gear = stack.as_gear().unwrap();
            assert!(gear.slot.is_armor());
            assert!(matches!(gear.gear_type, GearType::Armor(_)));
        }
    }

    #[test]
    fn test_offhand_token() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let stack = TokenStats::new(TokenType::Offhand, 1).open(&mut rng);
        assert_eq!(stack.as_gear().map(|g| g.slot), Some(EquipmentSlot::OffHand));
    }
}
