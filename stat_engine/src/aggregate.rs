//! StatTotals - sums stat contributions from every source a player has
//!
//! Totals are what gameplay formulas read (regen, max health, skill cost
//! reductions). Disabled gear never reaches the accumulator.

use crate::gear::ItemStack;
use crate::stat::{Stat, StatsCollection};
use std::collections::BTreeMap;

/// Trait for anything that contributes stats to a player's totals
///
/// Contributions are plain sums, so sources may be applied in any order.
pub trait StatSource {
    /// Add this source's stats to the totals
    fn apply(&self, totals: &mut StatTotals);
}

/// Summed stat values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatTotals {
    values: BTreeMap<Stat, i32>,
}

impl StatTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sources(sources: &[&dyn StatSource]) -> Self {
        let mut totals = StatTotals::new();
        for source in sources {
            source.apply(&mut totals);
        }
        totals
    }

    pub fn add(&mut self, stat: Stat, value: i32) {
        let entry = self.values.entry(stat).or_insert(0);
        *entry = entry.saturating_add(value);
        if *entry == 0 {
            self.values.remove(&stat);
        }
    }

    pub fn add_collection(&mut self, stats: &StatsCollection) {
        for (stat, value) in stats.iter() {
            self.add(stat, value);
        }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        self.values.get(&stat).copied().unwrap_or(0)
    }

    /// Value as a percentage in `0..=100`
    pub fn percent(&self, stat: Stat) -> f64 {
        f64::from(self.get(stat).clamp(0, 100)) / 100.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        self.values.iter().map(|(s, v)| (*s, *v))
    }
}

/// The player's own base stats
pub struct BaseStatsSource<'a> {
    pub stats: &'a StatsCollection,
}

impl StatSource for BaseStatsSource<'_> {
    fn apply(&self, totals: &mut StatTotals) {
        totals.add_collection(self.stats);
    }
}

/// One equipped stack
pub struct GearSource<'a> {
    pub stack: &'a ItemStack,
}

impl StatSource for GearSource<'_> {
    fn apply(&self, totals: &mut StatTotals) {
        if !self.stack.is_enabled() {
            return;
        }
        if let Some(gear) = self.stack.as_gear() {
            totals.add_collection(&gear.stats.stats);
        }
    }
}
