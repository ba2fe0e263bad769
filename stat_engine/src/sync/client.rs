//! Client-side mirror of the last pushed server state

use super::ServerMessage;
use crate::skill::{Cooldowns, SkillRegistry};
use crate::stat::Stat;
use crate::types::{ClassId, SkillId};
use std::collections::BTreeMap;
use tracing::warn;

/// What the client renders; never computed locally
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    pub attribute_points: u32,
    pub stats: BTreeMap<Stat, i32>,
    pub classes: Vec<Option<ClassId>>,
    pub skills: BTreeMap<SkillId, u32>,
    pub skill_points: u32,
    pub cooldowns: Cooldowns,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, message: ServerMessage, skills: &SkillRegistry) {
        match message {
            ServerMessage::Stats {
                attribute_points,
                stats,
            } => {
                self.attribute_points = attribute_points;
                self.stats = stats;
            }
            ServerMessage::Class {
                classes,
                skills,
                skill_points,
            } => {
                self.classes = classes;
                self.skills = skills;
                self.skill_points = skill_points;
            }
            ServerMessage::Cooldown { skill, ticks } => match skills.by_wire_id(skill) {
                Some(def) => self.cooldowns.start(def.id.clone(), ticks),
                None => warn!(wire_id = skill, "cooldown for unknown skill"),
            },
        }
    }

    /// Local countdown between server pushes
    pub fn tick(&mut self) {
        self.cooldowns.tick();
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        self.stats.get(&stat).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::SkillDef;

    fn registry() -> SkillRegistry {
        vec![SkillDef::new("skill_y", "Y")].into_iter().collect()
    }

    #[test]
    fn test_zero_ticks_clears_cooldown() {
        let skills = registry();
        let mut state = ClientState::new();
        state.apply(ServerMessage::Cooldown { skill: 1, ticks: 100 }, &skills);
        assert_eq!(state.cooldowns.remaining(&SkillId::from("skill_y")), Some(100));

        state.apply(ServerMessage::Cooldown { skill: 1, ticks: 0 }, &skills);
        assert!(!state.cooldowns.is_active(&SkillId::from("skill_y")));
        assert!(state.cooldowns.is_empty());
    }

    #[test]
    fn test_unknown_wire_id_ignored() {
        let mut state = ClientState::new();
        state.apply(ServerMessage::Cooldown { skill: 9, ticks: 3 }, &registry());
        assert!(state.cooldowns.is_empty());
    }

    #[test]
    fn test_snapshots_replace_state() {
        let skills = registry();
        let mut state = ClientState::new();
        let mut stats = BTreeMap::new();
        stats.insert(Stat::Wisdom, 4);
        state.apply(
            ServerMessage::Stats {
                attribute_points: 2,
                stats,
            },
            &skills,
        );
        assert_eq!(state.stat(Stat::Wisdom), 4);
        assert_eq!(state.attribute_points, 2);

        state.apply(
            ServerMessage::Stats {
                attribute_points: 0,
                stats: BTreeMap::new(),
            },
            &skills,
        );
        assert_eq!(state.stat(Stat::Wisdom), 0);
    }
}
