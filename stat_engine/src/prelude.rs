//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_engine::prelude::*;
//! ```

// Core types
pub use crate::stat::{Stat, StatKind, StatsCollection};
pub use crate::types::{
    ArmorType, Binding, BlockPos, ClassId, EquipmentSlot, GearType, OffhandType, PlayerId,
    Rarity, Side, SkillId, TickPhase, WeaponType,
};

// Gear and loot
pub use crate::gear::{GearItem, GearStats, ItemStack, TokenStats, TokenType};

// Pipeline
pub use crate::mediation::{ChangeListener, Outcome, SkillChange, StatChange};
pub use crate::pipeline::{Engine, EngineError, PickupOutcome};

// Sync
pub use crate::sync::{ClientMessage, ServerMessage};

// Config
pub use crate::config::{default_skills, PipelineConfig};
