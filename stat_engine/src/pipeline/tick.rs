//! Periodic per-player reconciliation

use super::{Engine, EngineError};
use crate::player::PlayerState;
use crate::skill::{PassiveEffect, SkillRegistry};
use crate::stat::Stat;
use crate::sync::ServerMessage;
use crate::types::{PlayerId, Side, TickPhase};
use tracing::trace;

impl Engine {
    /// Tick every online player
    pub fn tick(&mut self, phase: TickPhase) {
        let mut online: Vec<PlayerId> = self
            .players
            .keys()
            .copied()
            .filter(|id| self.live.contains(*id))
            .collect();
        online.sort();
        for id in online {
            // Ids come from the player table, so this cannot miss
            let _ = self.tick_player(id, phase);
        }
    }

    /// One player tick; only the end phase on the server does anything
    ///
    /// Order: cooldowns and combat timer, dirty-state sync, clamp to max
    /// after the grace period, passive skills, then regeneration.
    pub fn tick_player(&mut self, id: PlayerId, phase: TickPhase) -> Result<(), EngineError> {
        if phase != TickPhase::End || self.side != Side::Server {
            return Ok(());
        }
        let ctx = self.player_ctx(id)?;
        if !ctx.live {
            return Ok(());
        }
        let player = ctx.player;
        let ticks = &ctx.config.ticks;
        let vitals = &ctx.config.vitals;
        player.ticks_existed += 1;

        player.cooldowns.tick();
        player.combat_ticks = player.combat_ticks.saturating_sub(1);

        if player.stats_dirty() {
            ctx.outbox.push(id, ServerMessage::stats_snapshot(player));
            player.clean_stats();
        }
        if player.class.is_dirty() {
            ctx.outbox.push(id, ServerMessage::class_snapshot(player));
            player.class.clean();
        }

        let totals = player.totals();
        let max_health = player.max_health(vitals, &totals);
        let max_mana = player.max_mana(vitals, &totals);

        if player.ticks_existed > ticks.grace_ticks {
            player.vitals.health = player.vitals.health.min(max_health);
            player.vitals.mana = player.vitals.mana.min(max_mana);
        }

        if player.ticks_existed.checked_rem(ticks.passive_interval) == Some(0) {
            apply_passives(player, ctx.skills, max_health, max_mana);
        }

        player.regen_countdown = player.regen_countdown.saturating_sub(1);
        if player.regen_countdown == 0 {
            player.regen_countdown = ticks.regen_interval;
            let factor = if player.in_combat() {
                ticks.combat_regen_factor
            } else {
                1.0
            };
            let health = f64::from(totals.get(Stat::Regen)) * factor;
            let mana = f64::from(totals.get(Stat::Spirit)) * factor;
            player.vitals.health = (player.vitals.health + health).min(max_health);
            player.vitals.mana = (player.vitals.mana + mana).min(max_mana);
            trace!(player = %id, health, mana, "regen pulse");
        }
        Ok(())
    }
}

fn apply_passives(player: &mut PlayerState, skills: &SkillRegistry, max_health: f64, max_mana: f64) {
    for (skill, level) in player.class.skills() {
        let Some(effect) = skills.get(skill).and_then(|def| def.passive) else {
            continue;
        };
        let level = f64::from(level);
        match effect {
            PassiveEffect::Heal { per_level } => {
                player.vitals.health = (player.vitals.health + per_level * level).min(max_health);
            }
            PassiveEffect::RestoreMana { per_level } => {
                player.vitals.mana = (player.vitals.mana + per_level * level).min(max_mana);
            }
        }
    }
}
