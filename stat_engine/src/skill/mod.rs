//! Skill definitions and the skill registry

pub mod cooldown;

pub use cooldown::Cooldowns;

use crate::types::SkillId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Effect applied periodically for a learned passive skill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PassiveEffect {
    /// Restore health, scaled by skill level
    Heal { per_level: f64 },
    /// Restore mana, scaled by skill level
    RestoreMana { per_level: f64 },
}

/// Static definition of a skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub mana_cost: f64,
    /// Cooldown in ticks
    #[serde(default)]
    pub cooldown: u32,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    #[serde(default)]
    pub passive: Option<PassiveEffect>,
}

fn default_max_level() -> u32 {
    5
}

impl SkillDef {
    pub fn new(id: impl Into<SkillId>, name: impl Into<String>) -> Self {
        SkillDef {
            id: id.into(),
            name: name.into(),
            mana_cost: 0.0,
            cooldown: 0,
            max_level: default_max_level(),
            passive: None,
        }
    }

    pub fn is_passive(&self) -> bool {
        self.passive.is_some()
    }
}

/// Registered skills with numeric wire ids
///
/// Ids are assigned from 1 in registration order; 0 is reserved for "none".
#[derive(Debug, Clone, Default)]
pub struct SkillRegistry {
    defs: Vec<SkillDef>,
    index: HashMap<SkillId, usize>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a definition, returning its wire id
    pub fn register(&mut self, def: SkillDef) -> u32 {
        if let Some(&idx) = self.index.get(&def.id) {
            self.defs[idx] = def;
            return idx as u32 + 1;
        }
        self.index.insert(def.id.clone(), self.defs.len());
        self.defs.push(def);
        self.defs.len() as u32
    }

    pub fn get(&self, id: &SkillId) -> Option<&SkillDef> {
        self.index.get(id).map(|&idx| &self.defs[idx])
    }

    pub fn contains(&self, id: &SkillId) -> bool {
        self.index.contains_key(id)
    }

    pub fn wire_id(&self, id: &SkillId) -> Option<u32> {
        self.index.get(id).map(|&idx| idx as u32 + 1)
    }

    pub fn by_wire_id(&self, wire_id: u32) -> Option<&SkillDef> {
        let idx = wire_id.checked_sub(1)? as usize;
        self.defs.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl FromIterator<SkillDef> for SkillRegistry {
    fn from_iter<I: IntoIterator<Item = SkillDef>>(iter: I) -> Self {
        let mut registry = SkillRegistry::new();
        for def in iter {
            registry.register(def);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_ids_start_at_one() {
        let registry: SkillRegistry = vec![SkillDef::new("a", "A"), SkillDef::new("b", "B")]
            .into_iter()
            .collect();
        assert_eq!(registry.wire_id(&SkillId::from("a")), Some(1));
        assert_eq!(registry.wire_id(&SkillId::from("b")), Some(2));
        assert!(registry.by_wire_id(0).is_none());
        assert_eq!(registry.by_wire_id(2).map(|d| d.name.as_str()), Some("B"));
        assert!(registry.by_wire_id(3).is_none());
    }

    #[test]
    fn test_reregister_keeps_id() {
        let mut registry = SkillRegistry::new();
        registry.register(SkillDef::new("a", "A"));
        let mut replacement = SkillDef::new("a", "A2");
        replacement.cooldown = 40;
        assert_eq!(registry.register(replacement), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&SkillId::from("a")).map(|d| d.cooldown), Some(40));
    }
}
