//! Host attribute system boundary
//!
//! The engine never reads authoritative values back from the host; it only
//! registers attributes, writes base values and maintains per-slot gear
//! modifiers. [`AttributeMap`] is an in-memory host used by tests and tooling.

use crate::stat::AttributeKey;
use crate::types::PlayerId;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;
use uuid::Uuid;

/// Derived-attribute system supplied by the host engine
pub trait AttributeHost {
    /// Register an engine-owned attribute on a player entity
    ///
    /// Returns false if it was already registered for that entity.
    fn register(&mut self, player: PlayerId, key: AttributeKey) -> bool;

    /// Overwrite the base value of an attribute
    fn set_base(&mut self, player: PlayerId, key: AttributeKey, value: f64);

    /// Add or replace a modifier identified by `id`
    fn apply_modifier(&mut self, player: PlayerId, key: AttributeKey, id: Uuid, amount: f64);

    /// Remove a modifier, returns whether it existed
    fn remove_modifier(&mut self, player: PlayerId, key: AttributeKey, id: Uuid) -> bool;

    /// Base value last written by the engine
    fn base(&self, player: PlayerId, key: AttributeKey) -> Option<f64>;

    /// Current value (base + modifiers), for presentation only
    fn value(&self, player: PlayerId, key: AttributeKey) -> Option<f64>;

    /// Drop every attribute of an entity that left the world
    fn forget(&mut self, player: PlayerId);
}

/// Base value plus a set of flat modifiers keyed by UUID
///
/// Final value is `base + Σ modifiers`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeValue {
    pub base: f64,
    modifiers: BTreeMap<Uuid, f64>,
}

impl AttributeValue {
    /// Create a new AttributeValue with the given base
    pub fn with_base(base: f64) -> Self {
        AttributeValue {
            base,
            modifiers: BTreeMap::new(),
        }
    }

    pub fn compute(&self) -> f64 {
        self.base + self.total_modifiers()
    }

    /// Add a modifier, replacing one with the same id
    pub fn add_modifier(&mut self, id: Uuid, amount: f64) {
        self.modifiers.insert(id, amount);
    }

    pub fn remove_modifier(&mut self, id: Uuid) -> bool {
        self.modifiers.remove(&id).is_some()
    }

    pub fn modifier(&self, id: Uuid) -> Option<f64> {
        self.modifiers.get(&id).copied()
    }

    pub fn total_modifiers(&self) -> f64 {
        self.modifiers.values().sum()
    }

    /// Reset to just the base value
    pub fn reset_to_base(&mut self) {
        self.modifiers.clear();
    }
}

/// In-memory attribute host
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    entities: HashMap<PlayerId, HashMap<AttributeKey, AttributeValue>>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of engine-owned attributes registered on an entity
    pub fn registered_count(&self, player: PlayerId) -> usize {
        self.entities
            .get(&player)
            .map(|attrs| {
                attrs
                    .keys()
                    .filter(|k| matches!(k, AttributeKey::Custom(_)))
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn get(&self, player: PlayerId, key: AttributeKey) -> Option<&AttributeValue> {
        self.entities.get(&player)?.get(&key)
    }

    /// Host attributes always exist; engine attributes only once registered
    fn slot(&mut self, player: PlayerId, key: AttributeKey) -> Option<&mut AttributeValue> {
        let attrs = self.entities.entry(player).or_default();
        match key {
            AttributeKey::Host(_) => Some(attrs.entry(key).or_default()),
            AttributeKey::Custom(_) => attrs.get_mut(&key),
        }
    }
}

impl AttributeHost for AttributeMap {
    fn register(&mut self, player: PlayerId, key: AttributeKey) -> bool {
        let attrs = self.entities.entry(player).or_default();
        if attrs.contains_key(&key) {
            return false;
        }
        attrs.insert(key, AttributeValue::default());
        true
    }

    fn set_base(&mut self, player: PlayerId, key: AttributeKey, value: f64) {
        match self.slot(player, key) {
            Some(attr) => attr.base = value,
            None => warn!(%player, attribute = %key, "write to unregistered attribute"),
        }
    }

    fn apply_modifier(&mut self, player: PlayerId, key: AttributeKey, id: Uuid, amount: f64) {
        match self.slot(player, key) {
            Some(attr) => attr.add_modifier(id, amount),
            None => warn!(%player, attribute = %key, "modifier on unregistered attribute"),
        }
    }

    fn remove_modifier(&mut self, player: PlayerId, key: AttributeKey, id: Uuid) -> bool {
        self.slot(player, key)
            .map(|attr| attr.remove_modifier(id))
            .unwrap_or(false)
    }

    fn base(&self, player: PlayerId, key: AttributeKey) -> Option<f64> {
        self.get(player, key).map(|attr| attr.base)
    }

    fn value(&self, player: PlayerId, key: AttributeKey) -> Option<f64> {
        self.get(player, key).map(AttributeValue::compute)
    }

    fn forget(&mut self, player: PlayerId) {
        self.entities.remove(&player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat::HostAttribute;

    const STRENGTH: AttributeKey = AttributeKey::Custom("rpg.strength");

    #[test]
    fn test_compute_basic() {
        let attr = AttributeValue::with_base(100.0);
        assert!((attr.compute() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_modifiers_replace_by_id() {
        let mut attr = AttributeValue::with_base(10.0);
        let id = Uuid::new_v4();
        attr.add_modifier(id, 5.0);
        attr.add_modifier(id, 7.0);
        attr.add_modifier(Uuid::new_v4(), 3.0);
        assert!((attr.compute() - 20.0).abs() < f64::EPSILON);

        assert!(attr.remove_modifier(id));
        assert!(!attr.remove_modifier(id));
        assert!((attr.compute() - 13.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_to_base() {
        let mut attr = AttributeValue::with_base(4.0);
        attr.add_modifier(Uuid::new_v4(), 50.0);
        attr.reset_to_base();
        assert!((attr.compute() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_register_once() {
        let mut map = AttributeMap::new();
        let player = PlayerId::new_random();
        assert!(map.register(player, STRENGTH));
        assert!(!map.register(player, STRENGTH));
        assert_eq!(map.registered_count(player), 1);
    }

    #[test]
    fn test_unregistered_custom_writes_are_dropped() {
        let mut map = AttributeMap::new();
        let player = PlayerId::new_random();
        map.set_base(player, STRENGTH, 5.0);
        assert_eq!(map.value(player, STRENGTH), None);

        let speed = AttributeKey::Host(HostAttribute::MovementSpeed);
        map.set_base(player, speed, 0.1);
        assert_eq!(map.value(player, speed), Some(0.1));
    }

    #[test]
    fn test_forget() {
        let mut map = AttributeMap::new();
        let player = PlayerId::new_random();
        map.register(player, STRENGTH);
        map.set_base(player, STRENGTH, 3.0);
        map.forget(player);
        assert_eq!(map.value(player, STRENGTH), None);
        assert_eq!(map.registered_count(player), 0);
    }
}
