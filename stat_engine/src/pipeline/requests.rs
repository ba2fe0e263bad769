//! Client requests and progression
//!
//! Every request is re-validated here; the client is never trusted with
//! amounts, points or slots. A request that fails validation is a no-op and
//! reports `false`.

use super::{Engine, EngineError};
use crate::class::CLASS_SLOTS;
use crate::editor::{EditorPayload, EditorStation};
use crate::mediation::Mediator;
use crate::stat::{Stat, StatKind, StatsCollection};
use crate::sync::{ClientMessage, ServerMessage};
use crate::types::{BlockPos, ClassId, PlayerId, SkillId};
use std::collections::BTreeMap;
use tracing::{debug, info};

impl Engine {
    /// Dispatch one decoded client message from `sender`
    pub fn handle(&mut self, sender: PlayerId, message: ClientMessage) -> Result<bool, EngineError> {
        match message {
            ClientMessage::RaiseStat { stat, amount } => self.raise_stat(sender, stat, amount),
            ClientMessage::SetClass { class, slot } => self.set_class(sender, class, slot),
            ClientMessage::ChangeSkill { skill, increase } => {
                self.change_skill(sender, &skill, increase)
            }
            ClientMessage::EditorSetStats { pos, payload } => {
                self.editor_set_stats(sender, pos, payload)
            }
            ClientMessage::EditorSaveLoad { pos, saving } => {
                self.editor_save_load(sender, pos, saving)
            }
        }
    }

    /// Spend attribute points on a primary stat
    ///
    /// Points are only deducted once the stat change went through.
    pub fn raise_stat(&mut self, id: PlayerId, stat: Stat, amount: i32) -> Result<bool, EngineError> {
        let mut ctx = self.player_ctx(id)?;
        if stat.kind() != StatKind::Primary || amount <= 0 {
            debug!(player = %id, %stat, amount, "rejected raise request");
            return Ok(false);
        }
        let cost = amount.unsigned_abs();
        if ctx.player.attribute_points() < cost {
            debug!(player = %id, %stat, amount, points = ctx.player.attribute_points(), "not enough attribute points");
            return Ok(false);
        }
        if !ctx.player.base_stats.add(stat, amount, &mut ctx.mediator) {
            return Ok(false);
        }
        ctx.player.spend_attribute_points(cost);
        ctx.refresh_gear();
        Ok(true)
    }

    /// Put a class into a slot, or clear it with `None`
    ///
    /// An occupied slot can only change when `remove_class_whenever` is set.
    /// The old class's base stats are removed and the new class's added; if a
    /// listener denies any of those changes the slot keeps its old class.
    pub fn set_class(
        &mut self,
        id: PlayerId,
        class: Option<ClassId>,
        slot: usize,
    ) -> Result<bool, EngineError> {
        let mut ctx = self.player_ctx(id)?;
        let classes = ctx.classes;
        if slot >= CLASS_SLOTS {
            debug!(player = %id, slot, "class slot out of range");
            return Ok(false);
        }
        let current = ctx.player.class.class(slot).cloned();
        if current.is_some() && !ctx.config.progression.remove_class_whenever {
            debug!(player = %id, slot, "class slot already taken");
            return Ok(false);
        }
        let incoming = match &class {
            Some(key) => match classes.get(key) {
                Some(def) if !ctx.player.class.has_class(key) || current.as_ref() == Some(key) => {
                    Some(def)
                }
                Some(_) => {
                    debug!(player = %id, class = %key, "class already selected in another slot");
                    return Ok(false);
                }
                None => {
                    debug!(player = %id, class = %key, "unknown class");
                    return Ok(false);
                }
            },
            None => None,
        };

        let outgoing = current.as_ref().and_then(|key| classes.get(key));
        if let Some(old) = outgoing {
            if !shift_stats(&mut ctx.player.base_stats, &old.base_stats, -1, &mut ctx.mediator) {
                debug!(player = %id, slot, class = %old.key, "removing class stats denied");
                return Ok(false);
            }
        }
        if let Some(def) = incoming {
            if !shift_stats(&mut ctx.player.base_stats, &def.base_stats, 1, &mut ctx.mediator) {
                if let Some(old) = outgoing {
                    shift_stats(&mut ctx.player.base_stats, &old.base_stats, 1, &mut ctx.mediator);
                }
                debug!(player = %id, slot, class = %def.key, "adding class stats denied");
                return Ok(false);
            }
        }
        ctx.player.class.set_class(slot, class);
        ctx.refresh_gear();
        Ok(true)
    }

    /// Raise a skill by one level, or lower it when `remove_skills_whenever`
    ///
    /// Raising needs a free skill point, a selected class offering the skill
    /// at or below the player's level, and room below the skill's max level.
    pub fn change_skill(
        &mut self,
        id: PlayerId,
        skill: &SkillId,
        increase: bool,
    ) -> Result<bool, EngineError> {
        let mut ctx = self.player_ctx(id)?;
        let (skills, classes) = (ctx.skills, ctx.classes);
        let def = skills
            .get(skill)
            .ok_or_else(|| EngineError::UnknownSkill(skill.clone()))?;
        let current = ctx.player.class.skill_level(skill);

        if !increase {
            if !ctx.config.progression.remove_skills_whenever || current == 0 {
                return Ok(false);
            }
            if !ctx.player.class.set_skill(skill, current - 1, &mut ctx.mediator) {
                return Ok(false);
            }
            ctx.player.class.grant_skill_points(1);
            return Ok(true);
        }

        if current >= def.max_level {
            debug!(player = %id, %skill, "skill at max level");
            return Ok(false);
        }
        let required = ctx
            .player
            .class
            .classes()
            .iter()
            .flatten()
            .filter_map(|key| classes.get(key))
            .filter_map(|class| class.skill_requirement(skill))
            .min();
        match required {
            Some(level) if level <= ctx.player.level => {}
            Some(level) => {
                debug!(player = %id, %skill, required = level, "level too low for skill");
                return Ok(false);
            }
            None => {
                debug!(player = %id, %skill, "no selected class offers skill");
                return Ok(false);
            }
        }
        if ctx.player.class.skill_points() == 0 {
            debug!(player = %id, %skill, "no skill points");
            return Ok(false);
        }
        if !ctx.player.class.set_skill(skill, current + 1, &mut ctx.mediator) {
            return Ok(false);
        }
        ctx.player.class.spend_skill_point();
        Ok(true)
    }

    /// Activate a learned skill
    ///
    /// Mana cost and cooldown are reduced by the ManaReduction and
    /// CooldownReduction totals, read as percentages.
    pub fn use_skill(&mut self, id: PlayerId, skill: &SkillId) -> Result<bool, EngineError> {
        let ctx = self.player_ctx(id)?;
        let def = ctx
            .skills
            .get(skill)
            .ok_or_else(|| EngineError::UnknownSkill(skill.clone()))?;
        let player = ctx.player;

        if def.is_passive() || player.class.skill_level(skill) == 0 {
            return Ok(false);
        }
        if player.cooldowns.is_active(skill) {
            debug!(player = %id, %skill, "skill on cooldown");
            return Ok(false);
        }
        let totals = player.totals();
        let cost = def.mana_cost * (1.0 - totals.percent(Stat::ManaReduction));
        if player.vitals.mana < cost {
            debug!(player = %id, %skill, cost, mana = player.vitals.mana, "not enough mana");
            return Ok(false);
        }
        player.vitals.mana -= cost;

        let cooldown =
            (f64::from(def.cooldown) * (1.0 - totals.percent(Stat::CooldownReduction))).round() as u32;
        if cooldown > 0 {
            player.cooldowns.start(skill.clone(), cooldown);
            if let Some(wire_id) = ctx.skills.wire_id(skill).filter(|_| ctx.live) {
                ctx.outbox.push(
                    id,
                    ServerMessage::Cooldown {
                        skill: wire_id,
                        ticks: cooldown,
                    },
                );
            }
        }
        Ok(true)
    }

    /// Clear a running cooldown and tell the client if they are online
    pub fn reset_cooldown(&mut self, id: PlayerId, skill: &SkillId) -> Result<bool, EngineError> {
        let ctx = self.player_ctx(id)?;
        let wire_id = ctx
            .skills
            .wire_id(skill)
            .ok_or_else(|| EngineError::UnknownSkill(skill.clone()))?;
        if !ctx.player.cooldowns.clear(skill) {
            return Ok(false);
        }
        if ctx.live {
            ctx.outbox.push(
                id,
                ServerMessage::Cooldown {
                    skill: wire_id,
                    ticks: 0,
                },
            );
        }
        Ok(true)
    }

    /// Advance a player one level and grant the per-level points
    pub fn level_up(&mut self, id: PlayerId) -> Result<u32, EngineError> {
        let mut ctx = self.player_ctx(id)?;
        let progression = &ctx.config.progression;
        ctx.player.level += 1;
        ctx.player
            .grant_attribute_points(progression.attribute_points_per_level);
        ctx.player
            .class
            .grant_skill_points(progression.skill_points_per_level);
        let level = ctx.player.level;
        ctx.refresh_gear();
        info!(player = %id, level, "level up");
        Ok(level)
    }

    /// Apply damage to `victim` and flag both sides as in combat
    ///
    /// Returns the victim's remaining health.
    pub fn on_damage(
        &mut self,
        victim: PlayerId,
        attacker: Option<PlayerId>,
        amount: f64,
    ) -> Result<f64, EngineError> {
        let timeout = self.config.ticks.combat_timeout;
        let player = self
            .players
            .get_mut(&victim)
            .ok_or(EngineError::UnknownPlayer(victim))?;
        player.vitals.health = (player.vitals.health - amount.max(0.0)).max(0.0);
        player.combat_ticks = timeout;
        let remaining = player.vitals.health;

        if let Some(attacker) = attacker.and_then(|a| self.players.get_mut(&a)) {
            attacker.combat_ticks = timeout;
        }
        Ok(remaining)
    }

    /// Record that `id` opened the editor UI at `pos`
    pub fn open_editor(&mut self, id: PlayerId, pos: BlockPos) -> Result<bool, EngineError> {
        let exists = self.editors.contains(pos);
        let player = self
            .players
            .get_mut(&id)
            .ok_or(EngineError::UnknownPlayer(id))?;
        if !exists {
            return Ok(false);
        }
        player.open_editor = Some(pos);
        Ok(true)
    }

    pub fn close_editor(&mut self, id: PlayerId) -> Result<(), EngineError> {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(EngineError::UnknownPlayer(id))?;
        player.open_editor = None;
        Ok(())
    }

    /// Remove a station and close it for anyone who had it open
    pub fn remove_editor(&mut self, pos: BlockPos) -> Option<EditorStation> {
        for player in self.players.values_mut() {
            if player.open_editor == Some(pos) {
                player.open_editor = None;
            }
        }
        self.editors.remove(pos)
    }

    /// Replace a station's working stats; requires that station's UI open
    pub fn editor_set_stats(
        &mut self,
        id: PlayerId,
        pos: BlockPos,
        payload: EditorPayload,
    ) -> Result<bool, EngineError> {
        let Some(station) = self.open_station(id, pos)? else {
            return Ok(false);
        };
        station.apply(payload);
        Ok(true)
    }

    /// Save the working stats into the item, or load them from it
    pub fn editor_save_load(
        &mut self,
        id: PlayerId,
        pos: BlockPos,
        saving: bool,
    ) -> Result<bool, EngineError> {
        let Some(station) = self.open_station(id, pos)? else {
            return Ok(false);
        };
        Ok(if saving { station.save() } else { station.load() })
    }

    fn open_station(
        &mut self,
        id: PlayerId,
        pos: BlockPos,
    ) -> Result<Option<&mut EditorStation>, EngineError> {
        let player = self
            .players
            .get(&id)
            .ok_or(EngineError::UnknownPlayer(id))?;
        if player.open_editor != Some(pos) {
            debug!(player = %id, ?pos, "editor request for a station that is not open");
            return Ok(None);
        }
        Ok(self.editors.get_mut(pos))
    }
}

/// Add `sign * value` for each entry of `bonus`
///
/// Stops at the first denied change and reverts the ones already applied.
fn shift_stats(
    stats: &mut StatsCollection,
    bonus: &BTreeMap<Stat, i32>,
    sign: i32,
    mediator: &mut dyn Mediator,
) -> bool {
    let mut applied = Vec::with_capacity(bonus.len());
    for (stat, value) in bonus {
        if !stats.add(*stat, sign * value, mediator) {
            for (stat, value) in applied.into_iter().rev() {
                stats.add(stat, -sign * value, mediator);
            }
            return false;
        }
        applied.push((*stat, *value));
    }
    true
}
