//! Binary item tag holding the persisted gear fields

use super::GearStats;
use crate::stat::{Owner, Stat, StatsCollection};
use crate::types::{Binding, PlayerId, Rarity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

/// Gear tag error
#[derive(Error, Debug)]
pub enum TagError {
    #[error("Failed to encode gear tag: {0}")]
    Encode(#[source] bincode::Error),
    #[error("Failed to decode gear tag: {0}")]
    Decode(#[source] bincode::Error),
}

/// Persisted shape of [`GearStats`]; stats are keyed by stable stat key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearTag {
    pub rarity: Rarity,
    pub binding: Binding,
    pub bound: bool,
    pub bound_to: Option<PlayerId>,
    pub ilvl: i32,
    pub generated: bool,
    pub stats: BTreeMap<Stat, i32>,
}

impl From<GearStats> for GearTag {
    fn from(gear: GearStats) -> Self {
        GearTag {
            rarity: gear.rarity,
            binding: gear.binding,
            bound: gear.bound,
            bound_to: gear.bound_to,
            ilvl: gear.ilvl,
            generated: gear.generated,
            stats: gear.stats.to_map(),
        }
    }
}

impl From<GearTag> for GearStats {
    fn from(tag: GearTag) -> Self {
        GearStats {
            rarity: tag.rarity,
            binding: tag.binding,
            bound: tag.bound,
            bound_to: tag.bound_to,
            ilvl: tag.ilvl,
            generated: tag.generated,
            stats: StatsCollection::from_map(Owner::Item, tag.stats),
        }
    }
}

pub fn encode(gear: &GearStats) -> Result<Vec<u8>, TagError> {
    bincode::serialize(&GearTag::from(gear.clone())).map_err(TagError::Encode)
}

pub fn decode(bytes: &[u8]) -> Result<GearStats, TagError> {
    let tag: GearTag = bincode::deserialize(bytes).map_err(TagError::Decode)?;
    Ok(tag.into())
}

/// Decode a tag, falling back to empty gear when it is corrupt
pub fn read_or_reset(bytes: &[u8]) -> GearStats {
    decode(bytes).unwrap_or_else(|e| {
        warn!(error = %e, "corrupt gear tag, resetting to defaults");
        GearStats::default()
    })
}
