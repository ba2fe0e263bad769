//! stat_engine - Stat model and mutation pipeline for RPG player progression
//!
//! This library provides:
//! - Stat: The stat catalog with attribute bindings and gear roll rules
//! - StatsCollection: Owned, mediated stat maps for players and items
//! - GearStats / TokenStats: Rolled gear and unopened loot tokens
//! - ClassRegistry / SkillRegistry: Class definitions and skill catalogs
//! - Engine: The authoritative pipeline reacting to host events
//! - ClientMessage / ServerMessage: The client sync protocol

pub mod aggregate;
pub mod attributes;
pub mod class;
pub mod config;
pub mod editor;
pub mod gear;
pub mod mediation;
pub mod pipeline;
pub mod player;
pub mod prelude;
pub mod skill;
pub mod stat;
pub mod sync;
pub mod types;

// Re-export core types for convenience
pub use aggregate::{BaseStatsSource, GearSource, StatSource, StatTotals};
pub use attributes::{AttributeHost, AttributeMap, AttributeValue};
pub use class::{ClassProgress, ClassRegistry, PlayerClass, RegistryError};
pub use config::{default_skills, ConfigError, PipelineConfig};
pub use editor::{EditorPayload, EditorStation, EditorStations};
pub use gear::{GearItem, GearStats, ItemKind, ItemStack, TokenStats, TokenType};
pub use mediation::{ChangeListener, Mediator, Outcome, SkillChange, StatChange};
pub use pipeline::{Engine, EngineError, PickupOutcome};
pub use player::{PlayerState, Vitals};
pub use skill::{Cooldowns, SkillDef, SkillRegistry};
pub use stat::{AttributeKey, Owner, Stat, StatKind, StatsCollection};
pub use sync::{ClientMessage, ClientState, ServerMessage};
pub use types::{
    Binding, BlockPos, ClassId, EquipmentSlot, GearType, PlayerId, Rarity, Side, SkillId,
    TickPhase,
};
