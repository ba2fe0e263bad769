//! Pickup and drop mediation

use super::{Engine, EngineError};
use crate::gear::{GearItem, ItemKind, ItemStack, RaritySelector};
use crate::stat::StatRoller;
use crate::types::{Binding, PlayerId};
use rand::RngCore;
use tracing::debug;

/// Verdict on a pickup attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    Allowed,
    /// Item is bound to someone else
    Denied,
}

impl Engine {
    /// Mediate a player picking up `stack`
    ///
    /// Bind-on-pickup items bind to the picker. With
    /// `loot.auto_identify_on_pickup`, ungenerated gear is rolled here.
    pub fn pickup(
        &mut self,
        id: PlayerId,
        stack: &mut ItemStack,
    ) -> Result<PickupOutcome, EngineError> {
        if !self.players.contains_key(&id) {
            return Err(EngineError::UnknownPlayer(id));
        }

        match &mut stack.kind {
            ItemKind::Gear(gear) => {
                if !gear.stats.check_binding(id) {
                    debug!(player = %id, "pickup denied, gear bound to another player");
                    return Ok(PickupOutcome::Denied);
                }
                if gear.stats.binding == Binding::BindOnPickup && gear.stats.bind_to(id) {
                    debug!(player = %id, "bound on pickup");
                }
                if self.config.loot.auto_identify_on_pickup {
                    identify(
                        gear,
                        self.selector.as_ref(),
                        self.roller.as_ref(),
                        self.rng.as_mut(),
                    );
                }
            }
            ItemKind::Token(token) => {
                if !token.check_binding(id) {
                    debug!(player = %id, "pickup denied, token bound to another player");
                    return Ok(PickupOutcome::Denied);
                }
                if token.binding == Binding::BindOnPickup && token.bind_to(id) {
                    debug!(player = %id, "token bound on pickup");
                }
            }
            ItemKind::Misc(_) => {}
        }
        Ok(PickupOutcome::Allowed)
    }

    /// Transform loot before it is dropped into the world
    ///
    /// `loot.auto_open` expands tokens, then `loot.auto_identify_on_drop`
    /// rolls ungenerated gear. Both are independent.
    pub fn prepare_drops(&mut self, drops: Vec<ItemStack>) -> Vec<ItemStack> {
        let loot = &self.config.loot;
        drops
            .into_iter()
            .map(|stack| {
                let opened = match &stack.kind {
                    ItemKind::Token(token) if loot.auto_open => Some(token.open(self.rng.as_mut())),
                    _ => None,
                };
                let mut stack = opened.unwrap_or(stack);
                if loot.auto_identify_on_drop {
                    if let Some(gear) = stack.as_gear_mut() {
                        identify(
                            gear,
                            self.selector.as_ref(),
                            self.roller.as_ref(),
                            self.rng.as_mut(),
                        );
                    }
                }
                stack
            })
            .collect()
    }
}

/// Roll stats for gear that has not been generated yet
fn identify(
    gear: &mut GearItem,
    selector: &dyn RaritySelector,
    roller: &dyn StatRoller,
    rng: &mut dyn RngCore,
) {
    if gear.stats.generated {
        return;
    }
    gear.stats
        .generate(gear.gear_type, gear.slot, selector, roller, rng);
    debug!(slot = %gear.slot, stats = gear.stats.stats.len(), "identified gear");
}
