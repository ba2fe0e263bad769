//! Per-player skill cooldown countdown

use crate::types::SkillId;
use std::collections::BTreeMap;

/// Active cooldowns, remaining ticks per skill
///
/// A skill with no remaining ticks is absent, never stored as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cooldowns {
    active: BTreeMap<SkillId, u32>,
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a cooldown; zero ticks clears it
    pub fn start(&mut self, skill: SkillId, ticks: u32) {
        if ticks == 0 {
            self.active.remove(&skill);
        } else {
            self.active.insert(skill, ticks);
        }
    }

    pub fn clear(&mut self, skill: &SkillId) -> bool {
        self.active.remove(skill).is_some()
    }

    pub fn remaining(&self, skill: &SkillId) -> Option<u32> {
        self.active.get(skill).copied()
    }

    pub fn is_active(&self, skill: &SkillId) -> bool {
        self.active.contains_key(skill)
    }

    /// Advance every cooldown by one tick, returning the ones that expired
    pub fn tick(&mut self) -> Vec<SkillId> {
        let mut expired = Vec::new();
        self.active.retain(|skill, remaining| {
            *remaining -= 1;
            if *remaining == 0 {
                expired.push(skill.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SkillId, u32)> {
        self.active.iter().map(|(s, t)| (s, *t))
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_expires() {
        let mut cooldowns = Cooldowns::new();
        cooldowns.start(SkillId::from("dash"), 2);
        cooldowns.start(SkillId::from("slam"), 5);

        assert!(cooldowns.tick().is_empty());
        assert_eq!(cooldowns.tick(), vec![SkillId::from("dash")]);
        assert!(!cooldowns.is_active(&SkillId::from("dash")));
        assert_eq!(cooldowns.remaining(&SkillId::from("slam")), Some(3));
    }

    #[test]
    fn test_zero_clears() {
        let mut cooldowns = Cooldowns::new();
        cooldowns.start(SkillId::from("dash"), 100);
        cooldowns.start(SkillId::from("dash"), 0);
        assert!(cooldowns.is_empty());
        assert!(!cooldowns.clear(&SkillId::from("dash")));
    }
}
