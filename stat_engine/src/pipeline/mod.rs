//! The mutation pipeline
//!
//! [`Engine`] owns every player's state and reacts to host events: equipment
//! changes, pickups and drops, damage, ticks and client requests. Each entry
//! point runs to completion on the caller's thread before the next one starts.

mod equip;
mod loot;
mod requests;
mod tick;

pub use loot::PickupOutcome;

use crate::attributes::{AttributeHost, AttributeMap};
use crate::class::ClassRegistry;
use crate::config::PipelineConfig;
use crate::editor::EditorStations;
use crate::gear::{CatalogSelector, RaritySelector};
use crate::mediation::{ChangeListener, Listeners, LiveSubjects, MutationContext};
use crate::player::PlayerState;
use crate::skill::SkillRegistry;
use crate::stat::{CatalogRoller, Stat, StatRoller};
use crate::sync::{Outbox, ServerMessage};
use crate::types::{PlayerId, Side, SkillId};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

/// Engine entry point error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),
    #[error("Unknown skill: {0}")]
    UnknownSkill(SkillId),
}

/// Authoritative stat engine
pub struct Engine {
    side: Side,
    config: PipelineConfig,
    players: HashMap<PlayerId, PlayerState>,
    live: LiveSubjects,
    listeners: Listeners,
    attributes: Box<dyn AttributeHost + Send>,
    classes: ClassRegistry,
    skills: SkillRegistry,
    outbox: Outbox,
    editors: EditorStations,
    selector: Box<dyn RaritySelector + Send>,
    roller: Box<dyn StatRoller + Send>,
    rng: Box<dyn RngCore + Send>,
}

/// Disjoint borrows of the engine around one player
struct PlayerCtx<'a> {
    player: &'a mut PlayerState,
    mediator: MutationContext<'a>,
    config: &'a PipelineConfig,
    classes: &'a ClassRegistry,
    skills: &'a SkillRegistry,
    outbox: &'a mut Outbox,
    live: bool,
}

impl Engine {
    pub fn new(side: Side, config: PipelineConfig) -> Self {
        Engine {
            side,
            config,
            players: HashMap::new(),
            live: LiveSubjects::new(),
            listeners: Listeners::new(),
            attributes: Box::new(AttributeMap::new()),
            classes: ClassRegistry::new(),
            skills: SkillRegistry::new(),
            outbox: Outbox::new(),
            editors: EditorStations::default(),
            selector: Box::new(CatalogSelector),
            roller: Box::new(CatalogRoller),
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    pub fn with_attribute_host(mut self, host: Box<dyn AttributeHost + Send>) -> Self {
        self.attributes = host;
        self
    }

    pub fn with_classes(mut self, classes: ClassRegistry) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_skills(mut self, skills: SkillRegistry) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_selector(mut self, selector: Box<dyn RaritySelector + Send>) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_roller(mut self, roller: Box<dyn StatRoller + Send>) -> Self {
        self.roller = roller;
        self
    }

    pub fn with_rng(mut self, rng: Box<dyn RngCore + Send>) -> Self {
        self.rng = rng;
        self
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut ClassRegistry {
        &mut self.classes
    }

    pub fn skills(&self) -> &SkillRegistry {
        &self.skills
    }

    pub fn attributes(&self) -> &dyn AttributeHost {
        self.attributes.as_ref()
    }

    pub fn editors(&self) -> &EditorStations {
        &self.editors
    }

    pub fn editors_mut(&mut self) -> &mut EditorStations {
        &mut self.editors
    }

    pub fn register_listener(&mut self, listener: Box<dyn ChangeListener>) {
        self.listeners.register(listener);
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(&id)
    }

    /// Direct access for host-side setup; bypasses mediation
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(&id)
    }

    pub fn is_online(&self, id: PlayerId) -> bool {
        self.live.contains(id)
    }

    /// Pending server messages for a player, oldest first
    pub fn drain_messages(&mut self, id: PlayerId) -> Vec<ServerMessage> {
        self.outbox.drain(id)
    }

    /// Bring a player online, creating their state on first join
    ///
    /// Registers engine attributes on the entity and writes every stored stat
    /// and gear modifier through to the host.
    pub fn spawn_player(&mut self, id: PlayerId) {
        let config = &self.config;
        let player = self
            .players
            .entry(id)
            .or_insert_with(|| PlayerState::new(id, config));
        self.live.insert(id);

        let mut registered = 0;
        for stat in Stat::values() {
            if stat.should_register() && self.attributes.register(id, stat.attribute()) {
                registered += 1;
            }
        }
        for (stat, value) in player.base_stats.iter() {
            self.attributes
                .set_base(id, stat.attribute(), stat.transform(value));
        }
        player.recheck_requirements();
        equip::refresh_modifiers(player, self.attributes.as_mut());

        // Full snapshot on join
        self.outbox.push(id, ServerMessage::stats_snapshot(player));
        self.outbox.push(id, ServerMessage::class_snapshot(player));
        info!(player = %id, registered, "player online");
    }

    /// Take a player offline; their state is kept but no longer mediated
    pub fn despawn_player(&mut self, id: PlayerId) {
        if self.live.remove(id) {
            self.attributes.forget(id);
            self.outbox.discard(id);
            if let Some(player) = self.players.get_mut(&id) {
                player.open_editor = None;
            }
            info!(player = %id, "player offline");
        }
    }

    /// Forget a player entirely
    pub fn remove_player(&mut self, id: PlayerId) -> Option<PlayerState> {
        self.despawn_player(id);
        self.players.remove(&id)
    }

    fn player_ctx(&mut self, id: PlayerId) -> Result<PlayerCtx<'_>, EngineError> {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(EngineError::UnknownPlayer(id))?;
        let live = self.live.contains(id);
        Ok(PlayerCtx {
            player,
            mediator: MutationContext {
                live: &self.live,
                listeners: &mut self.listeners,
                attributes: self.attributes.as_mut(),
            },
            config: &self.config,
            classes: &self.classes,
            skills: &self.skills,
            outbox: &mut self.outbox,
            live,
        })
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("side", &self.side)
            .field("players", &self.players.len())
            .field("online", &self.live.len())
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl PlayerCtx<'_> {
    /// Re-evaluate requirements and push gear modifiers to the host
    fn refresh_gear(&mut self) {
        self.player.recheck_requirements();
        if self.live {
            equip::refresh_modifiers(self.player, &mut *self.mediator.attributes);
        } else {
            debug!(player = %self.player.id, "offline, skipping modifier refresh");
        }
    }
}
