//! StatsCollection - sparse stat values with an owner and a dirty flag

use super::Stat;
use crate::mediation::{Mediator, Outcome, StatChange};
use crate::types::PlayerId;
use std::collections::BTreeMap;
use tracing::debug;

/// Who a collection belongs to
///
/// A player owner is only a handle; it is resolved through the mediator's
/// live-subject table at mutation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Player(PlayerId),
    Item,
    Detached,
}

/// Sparse map from stat to integer value
///
/// A value of zero is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsCollection {
    owner: Owner,
    values: BTreeMap<Stat, i32>,
    dirty: bool,
}

impl StatsCollection {
    pub fn new(owner: Owner) -> Self {
        StatsCollection {
            owner,
            values: BTreeMap::new(),
            dirty: false,
        }
    }

    pub fn for_player(player: PlayerId) -> Self {
        Self::new(Owner::Player(player))
    }

    pub fn for_item() -> Self {
        Self::new(Owner::Item)
    }

    /// Build an item collection from stored values, dropping zeros
    pub fn from_map(owner: Owner, values: BTreeMap<Stat, i32>) -> Self {
        StatsCollection {
            owner,
            values: values.into_iter().filter(|(_, v)| *v != 0).collect(),
            dirty: false,
        }
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Value of a stat, zero when absent
    pub fn get(&self, stat: Stat) -> i32 {
        self.values.get(&stat).copied().unwrap_or(0)
    }

    /// Set a stat, announcing the change first when the owner is live
    ///
    /// Returns false if a listener denied the change.
    pub fn set(&mut self, stat: Stat, value: i32, mediator: &mut dyn Mediator) -> bool {
        let old = self.get(stat);
        let live = match self.owner {
            Owner::Player(id) if mediator.is_live(id) => Some(id),
            _ => None,
        };

        let value = match live {
            Some(subject) => {
                let change = StatChange {
                    subject,
                    stat,
                    old,
                    new: value,
                };
                match mediator.before_stat_change(&change) {
                    Outcome::Allow(v) => v,
                    Outcome::Deny => {
                        debug!(%subject, %stat, old, requested = value, "mutation denied");
                        return false;
                    }
                }
            }
            None => value,
        };

        if value == 0 {
            self.values.remove(&stat);
        } else {
            self.values.insert(stat, value);
        }
        self.mark_dirty();

        if let Some(subject) = live {
            mediator.write_attribute(subject, stat, value);
        }
        true
    }

    /// `set(stat, get(stat) + delta)`
    pub fn add(&mut self, stat: Stat, delta: i32, mediator: &mut dyn Mediator) -> bool {
        let current = self.get(stat);
        self.set(stat, current.saturating_add(delta), mediator)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clean(&mut self) {
        self.dirty = false;
    }

    // Detached working copies are never synced
    fn mark_dirty(&mut self) {
        if self.owner != Owner::Detached {
            self.dirty = true;
        }
    }

    /// Copy with no owner and a clean flag
    pub fn detached_copy(&self) -> Self {
        StatsCollection {
            owner: Owner::Detached,
            values: self.values.clone(),
            dirty: false,
        }
    }

    /// Replace every value with those of `other`, keeping this owner
    pub fn load_from(&mut self, other: &StatsCollection) {
        self.values = other.values.clone();
        self.mark_dirty();
    }

    pub fn clear(&mut self) {
        if !self.values.is_empty() {
            self.values.clear();
            self.mark_dirty();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Non-zero entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        self.values.iter().map(|(s, v)| (*s, *v))
    }

    pub fn to_map(&self) -> BTreeMap<Stat, i32> {
        self.values.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediation::{SkillChange, Unmediated};
    use proptest::prelude::*;

    /// Mediator that treats one player as live and records everything
    struct Recorder {
        live: PlayerId,
        deny: bool,
        seen: Vec<StatChange>,
        written: Vec<(Stat, i32)>,
    }

    impl Recorder {
        fn new(live: PlayerId) -> Self {
            Recorder {
                live,
                deny: false,
                seen: Vec::new(),
                written: Vec::new(),
            }
        }
    }

    impl Mediator for Recorder {
        fn is_live(&self, player: PlayerId) -> bool {
            player == self.live
        }

        fn before_stat_change(&mut self, change: &StatChange) -> Outcome<i32> {
            self.seen.push(*change);
            if self.deny {
                Outcome::Deny
            } else {
                Outcome::Allow(change.new)
            }
        }

        fn before_skill_change(&mut self, change: &SkillChange) -> Outcome<u32> {
            Outcome::Allow(change.new)
        }

        fn write_attribute(&mut self, _player: PlayerId, stat: Stat, value: i32) {
            self.written.push((stat, value));
        }
    }

    #[test]
    fn test_zero_removes_entry() {
        let mut stats = StatsCollection::for_item();
        assert!(stats.set(Stat::Strength, 4, &mut Unmediated));
        assert_eq!(stats.len(), 1);
        assert!(stats.set(Stat::Strength, 0, &mut Unmediated));
        assert!(stats.is_empty());
        assert_eq!(stats.get(Stat::Strength), 0);
    }

    #[test]
    fn test_add_accumulates() {
        let mut stats = StatsCollection::for_item();
        stats.add(Stat::Armor, 3, &mut Unmediated);
        stats.add(Stat::Armor, 4, &mut Unmediated);
        assert_eq!(stats.get(Stat::Armor), 7);
        stats.add(Stat::Armor, -7, &mut Unmediated);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_live_owner_is_mediated_and_written_through() {
        let player = PlayerId::new_random();
        let mut mediator = Recorder::new(player);
        let mut stats = StatsCollection::for_player(player);

        assert!(stats.set(Stat::Wisdom, 6, &mut mediator));
        assert_eq!(
            mediator.seen,
            vec![StatChange {
                subject: player,
                stat: Stat::Wisdom,
                old: 0,
                new: 6
            }]
        );
        assert_eq!(mediator.written, vec![(Stat::Wisdom, 6)]);
    }

    #[test]
    fn test_denied_change_leaves_value() {
        let player = PlayerId::new_random();
        let mut mediator = Recorder::new(player);
        let mut stats = StatsCollection::for_player(player);
        stats.set(Stat::Charisma, 2, &mut mediator);
        stats.clean();

        mediator.deny = true;
        assert!(!stats.set(Stat::Charisma, 9, &mut mediator));
        assert_eq!(stats.get(Stat::Charisma), 2);
        assert!(!stats.is_dirty());
        assert_eq!(mediator.written.len(), 1);
    }

    #[test]
    fn test_offline_owner_skips_mediation() {
        let player = PlayerId::new_random();
        let mut mediator = Recorder::new(PlayerId::new_random());
        mediator.deny = true;
        let mut stats = StatsCollection::for_player(player);

        assert!(stats.set(Stat::Dodge, 3, &mut mediator));
        assert!(mediator.seen.is_empty());
        assert!(mediator.written.is_empty());
        assert_eq!(stats.get(Stat::Dodge), 3);
    }

    #[test]
    fn test_detached_copy_and_load() {
        let mut stats = StatsCollection::for_item();
        stats.set(Stat::CritChance, 5, &mut Unmediated);

        let copy = stats.detached_copy();
        assert_eq!(copy.owner(), Owner::Detached);
        assert!(!copy.is_dirty());
        assert_eq!(copy.get(Stat::CritChance), 5);

        let mut target = StatsCollection::for_item();
        target.set(Stat::Block, 1, &mut Unmediated);
        target.clean();
        target.load_from(&copy);
        assert_eq!(target.owner(), Owner::Item);
        assert_eq!(target.get(Stat::Block), 0);
        assert_eq!(target.get(Stat::CritChance), 5);
        assert!(target.is_dirty());
    }

    #[test]
    fn test_detached_never_dirty() {
        let mut copy = StatsCollection::for_item().detached_copy();
        assert!(copy.set(Stat::Armor, 4, &mut Unmediated));
        assert!(copy.add(Stat::Armor, 2, &mut Unmediated));
        assert_eq!(copy.get(Stat::Armor), 6);
        assert!(!copy.is_dirty());

        copy.load_from(&StatsCollection::for_item());
        assert!(copy.is_empty());
        assert!(!copy.is_dirty());
    }

    #[test]
    fn test_from_map_drops_zeros() {
        let mut map = BTreeMap::new();
        map.insert(Stat::Root, 0);
        map.insert(Stat::Slow, 2);
        let stats = StatsCollection::from_map(Owner::Item, map);
        assert_eq!(stats.len(), 1);
        assert!(!stats.is_dirty());
    }

    proptest! {
        #[test]
        fn prop_set_then_get(idx in 0usize..29, value in -10_000i32..10_000) {
            prop_assume!(value != 0);
            let stat = Stat::values()[idx];
            let mut stats = StatsCollection::for_item();
            prop_assert!(stats.set(stat, value, &mut Unmediated));
            prop_assert_eq!(stats.get(stat), value);
            prop_assert!(stats.is_dirty());
            stats.clean();
            prop_assert!(!stats.is_dirty());
        }

        #[test]
        fn prop_all_zero_is_empty(values in proptest::collection::vec((0usize..29, -50i32..50), 0..40)) {
            let mut stats = StatsCollection::for_item();
            for (idx, value) in &values {
                stats.set(Stat::values()[*idx], *value, &mut Unmediated);
            }
            for stat in Stat::values() {
                stats.set(*stat, 0, &mut Unmediated);
            }
            prop_assert!(stats.is_empty());
        }
    }
}
