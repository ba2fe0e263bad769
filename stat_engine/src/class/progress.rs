//! Per-player class selection and skill levels

use crate::mediation::{Mediator, Outcome, SkillChange};
use crate::stat::Owner;
use crate::types::{ClassId, SkillId};
use std::collections::BTreeMap;
use tracing::debug;

/// Number of class slots a player can fill; slot 0 is the primary class
pub const CLASS_SLOTS: usize = 3;

/// Class progression of one player
///
/// Skill levels of zero are never stored. Mutations follow the same
/// announce/commit/dirty protocol as stat collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassProgress {
    owner: Owner,
    skills: BTreeMap<SkillId, u32>,
    classes: [Option<ClassId>; CLASS_SLOTS],
    skill_points: u32,
    dirty: bool,
}

impl ClassProgress {
    pub fn new(owner: Owner) -> Self {
        ClassProgress {
            owner,
            skills: BTreeMap::new(),
            classes: Default::default(),
            skill_points: 0,
            dirty: false,
        }
    }

    pub fn skill_level(&self, skill: &SkillId) -> u32 {
        self.skills.get(skill).copied().unwrap_or(0)
    }

    /// Set a skill level, announcing the change first when the owner is live
    pub fn set_skill(&mut self, skill: &SkillId, level: u32, mediator: &mut dyn Mediator) -> bool {
        let old = self.skill_level(skill);
        let level = match self.owner {
            Owner::Player(subject) if mediator.is_live(subject) => {
                let change = SkillChange {
                    subject,
                    skill: skill.clone(),
                    old,
                    new: level,
                };
                match mediator.before_skill_change(&change) {
                    Outcome::Allow(level) => level,
                    Outcome::Deny => {
                        debug!(%subject, %skill, old, requested = level, "skill change denied");
                        return false;
                    }
                }
            }
            _ => level,
        };

        if level == 0 {
            self.skills.remove(skill);
        } else {
            self.skills.insert(skill.clone(), level);
        }
        self.mark_dirty();
        true
    }

    /// Learned skills in id order
    pub fn skills(&self) -> impl Iterator<Item = (&SkillId, u32)> {
        self.skills.iter().map(|(s, l)| (s, *l))
    }

    pub fn skill_map(&self) -> BTreeMap<SkillId, u32> {
        self.skills.clone()
    }

    pub fn class(&self, slot: usize) -> Option<&ClassId> {
        self.classes.get(slot)?.as_ref()
    }

    pub fn classes(&self) -> &[Option<ClassId>] {
        &self.classes
    }

    pub fn primary_class(&self) -> Option<&ClassId> {
        self.class(0)
    }

    /// Put a class into a slot, returning false for an out-of-range slot
    pub fn set_class(&mut self, slot: usize, class: Option<ClassId>) -> bool {
        match self.classes.get_mut(slot) {
            Some(entry) => {
                *entry = class;
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    pub fn has_class(&self, class: &ClassId) -> bool {
        self.classes.iter().flatten().any(|c| c == class)
    }

    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    pub fn grant_skill_points(&mut self, points: u32) {
        if points > 0 {
            self.skill_points = self.skill_points.saturating_add(points);
            self.mark_dirty();
        }
    }

    /// Spend one point, false when none are left
    pub fn spend_skill_point(&mut self) -> bool {
        if self.skill_points == 0 {
            return false;
        }
        self.skill_points -= 1;
        self.mark_dirty();
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        if self.owner != Owner::Detached {
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediation::{StatChange, Unmediated};
    use crate::stat::Stat;
    use crate::types::PlayerId;

    struct CapSkills(u32);

    impl Mediator for CapSkills {
        fn is_live(&self, _player: PlayerId) -> bool {
            true
        }

        fn before_stat_change(&mut self, change: &StatChange) -> Outcome<i32> {
            Outcome::Allow(change.new)
        }

        fn before_skill_change(&mut self, change: &SkillChange) -> Outcome<u32> {
            if change.new > self.0 {
                Outcome::Deny
            } else {
                Outcome::Allow(change.new)
            }
        }

        fn write_attribute(&mut self, _player: PlayerId, _stat: Stat, _value: i32) {}
    }

    #[test]
    fn test_skill_levels() {
        let mut progress = ClassProgress::new(Owner::Player(PlayerId::new_random()));
        let dash = SkillId::from("dash");
        assert!(progress.set_skill(&dash, 2, &mut Unmediated));
        assert_eq!(progress.skill_level(&dash), 2);
        assert!(progress.is_dirty());

        progress.set_skill(&dash, 0, &mut Unmediated);
        assert_eq!(progress.skills().count(), 0);
    }

    #[test]
    fn test_denied_skill_change() {
        let mut progress = ClassProgress::new(Owner::Player(PlayerId::new_random()));
        let dash = SkillId::from("dash");
        let mut mediator = CapSkills(1);
        assert!(progress.set_skill(&dash, 1, &mut mediator));
        progress.clean();
        assert!(!progress.set_skill(&dash, 2, &mut mediator));
        assert_eq!(progress.skill_level(&dash), 1);
        assert!(!progress.is_dirty());
    }

    #[test]
    fn test_class_slots() {
        let mut progress = ClassProgress::new(Owner::Detached);
        assert!(progress.set_class(0, Some(ClassId::from("rogue"))));
        assert!(!progress.set_class(CLASS_SLOTS, Some(ClassId::from("mage"))));
        assert_eq!(progress.primary_class(), Some(&ClassId::from("rogue")));
        assert!(progress.has_class(&ClassId::from("rogue")));
        assert!(progress.class(1).is_none());
        assert!(progress.class(7).is_none());
    }

    #[test]
    fn test_skill_points() {
        let mut progress = ClassProgress::new(Owner::Detached);
        assert!(!progress.spend_skill_point());
        progress.grant_skill_points(2);
        assert!(progress.spend_skill_point());
        assert_eq!(progress.skill_points(), 1);
        assert!(!progress.is_dirty());
    }
}
