//! Mediation of stat and skill mutations
//!
//! A mutation on a collection owned by a live player is announced before it is
//! applied. Listeners may rewrite the new value or deny the change outright.
//! After an allowed change the stat value is written through to the host
//! attribute system.

use crate::attributes::AttributeHost;
use crate::stat::Stat;
use crate::types::{PlayerId, SkillId};
use std::collections::HashSet;
use tracing::debug;

/// Pending change of one stat on a live player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatChange {
    pub subject: PlayerId,
    pub stat: Stat,
    pub old: i32,
    pub new: i32,
}

/// Pending change of one skill level on a live player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillChange {
    pub subject: PlayerId,
    pub skill: SkillId,
    pub old: u32,
    pub new: u32,
}

/// Listener verdict on a pending change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Apply the change with this (possibly rewritten) value
    Allow(T),
    Deny,
}

impl<T> Outcome<T> {
    pub fn is_denied(&self) -> bool {
        matches!(self, Outcome::Deny)
    }
}

/// Everything a collection needs from its surroundings while mutating
pub trait Mediator {
    /// Whether the player handle currently resolves to an online entity
    fn is_live(&self, player: PlayerId) -> bool;

    fn before_stat_change(&mut self, change: &StatChange) -> Outcome<i32>;

    fn before_skill_change(&mut self, change: &SkillChange) -> Outcome<u32>;

    /// Push the stored value of `stat` into the host attribute system
    fn write_attribute(&mut self, player: PlayerId, stat: Stat, value: i32);
}

/// Mediator for collections that are never mediated (items, editor copies)
#[derive(Debug, Clone, Copy, Default)]
pub struct Unmediated;

impl Mediator for Unmediated {
    fn is_live(&self, _player: PlayerId) -> bool {
        false
    }

    fn before_stat_change(&mut self, change: &StatChange) -> Outcome<i32> {
        Outcome::Allow(change.new)
    }

    fn before_skill_change(&mut self, change: &SkillChange) -> Outcome<u32> {
        Outcome::Allow(change.new)
    }

    fn write_attribute(&mut self, _player: PlayerId, _stat: Stat, _value: i32) {}
}

/// Hook notified before every mediated mutation
///
/// Both callbacks allow the change unchanged by default.
pub trait ChangeListener: Send {
    /// Name used in logs
    fn id(&self) -> &str;

    fn before_stat_change(&mut self, change: &StatChange) -> Outcome<i32> {
        Outcome::Allow(change.new)
    }

    fn before_skill_change(&mut self, change: &SkillChange) -> Outcome<u32> {
        Outcome::Allow(change.new)
    }
}

/// Ordered set of change listeners
///
/// Listeners run in registration order and each one sees the value produced
/// by the previous one. The first denial stops the chain.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Box<dyn ChangeListener>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Box<dyn ChangeListener>) {
        self.entries.push(listener);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stat_change(&mut self, change: &StatChange) -> Outcome<i32> {
        let mut current = *change;
        for listener in self.entries.iter_mut() {
            match listener.before_stat_change(&current) {
                Outcome::Allow(value) => current.new = value,
                Outcome::Deny => {
                    debug!(listener = listener.id(), stat = %change.stat, subject = %change.subject, "stat change denied");
                    return Outcome::Deny;
                }
            }
        }
        Outcome::Allow(current.new)
    }

    pub fn skill_change(&mut self, change: &SkillChange) -> Outcome<u32> {
        let mut current = change.clone();
        for listener in self.entries.iter_mut() {
            match listener.before_skill_change(&current) {
                Outcome::Allow(level) => current.new = level,
                Outcome::Deny => {
                    debug!(listener = listener.id(), skill = %change.skill, subject = %change.subject, "skill change denied");
                    return Outcome::Deny;
                }
            }
        }
        Outcome::Allow(current.new)
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|l| l.id()))
            .finish()
    }
}

/// Player handles that currently resolve to online entities
#[derive(Debug, Clone, Default)]
pub struct LiveSubjects {
    online: HashSet<PlayerId>,
}

impl LiveSubjects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, player: PlayerId) -> bool {
        self.online.insert(player)
    }

    pub fn remove(&mut self, player: PlayerId) -> bool {
        self.online.remove(&player)
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.online.contains(&player)
    }

    pub fn len(&self) -> usize {
        self.online.len()
    }

    pub fn is_empty(&self) -> bool {
        self.online.is_empty()
    }
}

/// Live mediator assembled from disjoint parts of the engine
pub struct MutationContext<'a> {
    pub live: &'a LiveSubjects,
    pub listeners: &'a mut Listeners,
    pub attributes: &'a mut dyn AttributeHost,
}

impl Mediator for MutationContext<'_> {
    fn is_live(&self, player: PlayerId) -> bool {
        self.live.contains(player)
    }

    fn before_stat_change(&mut self, change: &StatChange) -> Outcome<i32> {
        self.listeners.stat_change(change)
    }

    fn before_skill_change(&mut self, change: &SkillChange) -> Outcome<u32> {
        self.listeners.skill_change(change)
    }

    fn write_attribute(&mut self, player: PlayerId, stat: Stat, value: i32) {
        self.attributes
            .set_base(player, stat.attribute(), stat.transform(value));
    }
}
