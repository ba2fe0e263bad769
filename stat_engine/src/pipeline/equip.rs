//! Equipment change mediation

use super::{Engine, EngineError};
use crate::attributes::AttributeHost;
use crate::gear::ItemStack;
use crate::player::PlayerState;
use crate::stat::Stat;
use crate::types::{Binding, EquipmentSlot, PlayerId};
use tracing::{debug, warn};

impl Engine {
    /// Put `stack` into `slot` (or empty it), returning what was there
    ///
    /// Runs the two-hand rule, bind-on-equip, the requirement re-check and
    /// the gear modifier refresh. Non-gear items are carried but ignored.
    pub fn set_equipment(
        &mut self,
        id: PlayerId,
        slot: EquipmentSlot,
        stack: Option<ItemStack>,
    ) -> Result<Option<ItemStack>, EngineError> {
        let mut ctx = self.player_ctx(id)?;
        let player = &mut *ctx.player;

        let mut previous = player.take_equipment(slot);
        let mut incoming = stack;
        let from_two_hander = previous.as_ref().is_some_and(ItemStack::is_two_hander);

        match slot {
            EquipmentSlot::MainHand => {
                let to_two_hander = incoming.as_ref().is_some_and(ItemStack::is_two_hander);
                if let Some(offhand) = player.equipment_mut(EquipmentSlot::OffHand) {
                    if to_two_hander && !from_two_hander {
                        offhand.two_hand_disabled = true;
                        debug!(player = %id, "off-hand disabled by two-hander");
                    } else if from_two_hander && !to_two_hander {
                        offhand.two_hand_disabled = false;
                        debug!(player = %id, "off-hand restored");
                    }
                }
            }
            EquipmentSlot::OffHand => {
                let main_two_hander = player
                    .equipment(EquipmentSlot::MainHand)
                    .is_some_and(ItemStack::is_two_hander);
                if let Some(stack) = incoming.as_mut().filter(|s| s.is_gear()) {
                    stack.two_hand_disabled = main_two_hander;
                }
            }
            _ => {}
        }

        if let Some(gear) = incoming.as_mut().and_then(ItemStack::as_gear_mut) {
            if gear.stats.binding == Binding::BindOnEquip && gear.stats.bind_to(id) {
                debug!(player = %id, %slot, "bound on equip");
            }
        }

        // Flags only mean something while the stack is worn
        if let Some(stack) = previous.as_mut() {
            stack.two_hand_disabled = false;
            stack.requirement_disabled = false;
        }

        player.put_equipment(slot, incoming);
        ctx.refresh_gear();
        Ok(previous)
    }
}

/// Replace every gear modifier of a player with those of its enabled gear
pub(super) fn refresh_modifiers(player: &PlayerState, attributes: &mut dyn AttributeHost) {
    for slot in EquipmentSlot::all() {
        for stat in Stat::values() {
            if let Ok(id) = stat.uuid(*slot) {
                attributes.remove_modifier(player.id, stat.attribute(), id);
            }
        }

        let Some(stack) = player.equipment(*slot).filter(|s| s.is_enabled()) else {
            continue;
        };
        let Some(gear) = stack.as_gear() else {
            continue;
        };
        for (stat, value) in gear.stats.stats.iter() {
            match stat.uuid(*slot) {
                Ok(id) => {
                    attributes.apply_modifier(player.id, stat.attribute(), id, stat.transform(value))
                }
                Err(e) => warn!(player = %player.id, error = %e, "skipping gear stat"),
            }
        }
    }
}
