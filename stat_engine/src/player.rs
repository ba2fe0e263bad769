//! Per-player state held by the engine

use crate::aggregate::{BaseStatsSource, GearSource, StatSource, StatTotals};
use crate::class::ClassProgress;
use crate::config::{PipelineConfig, VitalsConfig};
use crate::gear::{ItemKind, ItemStack, PlayerView};
use crate::skill::Cooldowns;
use crate::stat::{Owner, Stat, StatsCollection};
use crate::types::{BlockPos, EquipmentSlot, PlayerId};
use std::collections::BTreeMap;

/// Current health and mana
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vitals {
    pub health: f64,
    pub mana: f64,
}

/// Everything the engine tracks for one player
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub id: PlayerId,
    pub level: u32,
    /// Stats bought with attribute points plus class bonuses
    pub base_stats: StatsCollection,
    pub class: ClassProgress,
    attribute_points: u32,
    points_dirty: bool,
    pub vitals: Vitals,
    pub cooldowns: Cooldowns,
    equipment: BTreeMap<EquipmentSlot, ItemStack>,
    pub ticks_existed: u64,
    /// Remaining ticks of the in-combat flag
    pub combat_ticks: u32,
    pub regen_countdown: u32,
    /// Editor station whose UI this player has open
    pub open_editor: Option<BlockPos>,
}

impl PlayerState {
    pub fn new(id: PlayerId, config: &PipelineConfig) -> Self {
        let mut class = ClassProgress::new(Owner::Player(id));
        class.grant_skill_points(config.progression.starting_skill_points);
        PlayerState {
            id,
            level: 1,
            base_stats: StatsCollection::for_player(id),
            class,
            attribute_points: config.progression.starting_attribute_points,
            points_dirty: false,
            vitals: Vitals {
                health: config.vitals.base_health,
                mana: config.vitals.base_mana,
            },
            cooldowns: Cooldowns::new(),
            equipment: BTreeMap::new(),
            ticks_existed: 0,
            combat_ticks: 0,
            regen_countdown: config.ticks.regen_interval,
            open_editor: None,
        }
    }

    pub fn attribute_points(&self) -> u32 {
        self.attribute_points
    }

    pub fn grant_attribute_points(&mut self, points: u32) {
        if points > 0 {
            self.attribute_points = self.attribute_points.saturating_add(points);
            self.points_dirty = true;
        }
    }

    /// Spend points, false (and nothing spent) when there are not enough
    pub fn spend_attribute_points(&mut self, points: u32) -> bool {
        if self.attribute_points < points {
            return false;
        }
        self.attribute_points -= points;
        self.points_dirty = true;
        true
    }

    /// Whether the stats snapshot needs to be pushed
    pub fn stats_dirty(&self) -> bool {
        self.base_stats.is_dirty() || self.points_dirty
    }

    pub fn clean_stats(&mut self) {
        self.base_stats.clean();
        self.points_dirty = false;
    }

    pub fn equipment(&self, slot: EquipmentSlot) -> Option<&ItemStack> {
        self.equipment.get(&slot)
    }

    pub fn equipment_mut(&mut self, slot: EquipmentSlot) -> Option<&mut ItemStack> {
        self.equipment.get_mut(&slot)
    }

    /// Occupied slots in slot order
    pub fn equipped(&self) -> impl Iterator<Item = (EquipmentSlot, &ItemStack)> {
        self.equipment.iter().map(|(slot, stack)| (*slot, stack))
    }

    pub(crate) fn take_equipment(&mut self, slot: EquipmentSlot) -> Option<ItemStack> {
        self.equipment.remove(&slot)
    }

    pub(crate) fn put_equipment(&mut self, slot: EquipmentSlot, stack: Option<ItemStack>) {
        match stack {
            Some(stack) => {
                self.equipment.insert(slot, stack);
            }
            None => {
                self.equipment.remove(&slot);
            }
        }
    }

    pub fn view(&self) -> PlayerView<'_> {
        PlayerView {
            level: self.level,
            classes: self.class.classes(),
            stats: &self.base_stats,
        }
    }

    /// Flag every equipped gear stack whose requirements are not met
    pub(crate) fn recheck_requirements(&mut self) {
        let view = PlayerView {
            level: self.level,
            classes: self.class.classes(),
            stats: &self.base_stats,
        };
        for stack in self.equipment.values_mut() {
            let met = match &stack.kind {
                ItemKind::Gear(gear) => gear.requirements.met(&view),
                _ => continue,
            };
            stack.requirement_disabled = !met;
        }
    }

    /// Base stats plus every enabled equipped gear piece
    pub fn totals(&self) -> StatTotals {
        let base = BaseStatsSource {
            stats: &self.base_stats,
        };
        let gear: Vec<GearSource<'_>> = self
            .equipment
            .values()
            .map(|stack| GearSource { stack })
            .collect();
        let mut sources: Vec<&dyn StatSource> = vec![&base];
        sources.extend(gear.iter().map(|g| g as &dyn StatSource));
        StatTotals::from_sources(&sources)
    }

    pub fn max_health(&self, vitals: &VitalsConfig, totals: &StatTotals) -> f64 {
        (vitals.base_health + f64::from(totals.get(Stat::Health))).max(1.0)
    }

    pub fn max_mana(&self, vitals: &VitalsConfig, totals: &StatTotals) -> f64 {
        (vitals.base_mana + f64::from(totals.get(Stat::Psyche))).max(0.0)
    }

    pub fn in_combat(&self) -> bool {
        self.combat_ticks > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::{GearItem, GearStats, Requirements};
    use crate::mediation::Unmediated;
    use crate::types::{ArmorType, GearType};

    fn boots(health: i32, level_req: u32) -> ItemStack {
        let mut stats = GearStats::default();
        stats.stats.set(Stat::Health, health, &mut Unmediated);
        ItemStack::gear(
            GearItem::new(GearType::Armor(ArmorType::Leather), EquipmentSlot::Feet, stats)
                .with_requirements(Requirements {
                    level: level_req,
                    ..Default::default()
                }),
        )
    }

    #[test]
    fn test_new_player() {
        let config = PipelineConfig::default();
        let player = PlayerState::new(PlayerId::new_random(), &config);
        assert_eq!(player.level, 1);
        assert!((player.vitals.health - config.vitals.base_health).abs() < f64::EPSILON);
        assert_eq!(player.regen_countdown, 100);
        assert!(!player.stats_dirty());
    }

    #[test]
    fn test_attribute_points() {
        let mut player = PlayerState::new(PlayerId::new_random(), &PipelineConfig::default());
        player.grant_attribute_points(3);
        assert!(player.stats_dirty());
        assert!(!player.spend_attribute_points(5));
        assert_eq!(player.attribute_points(), 3);
        assert!(player.spend_attribute_points(3));
        player.clean_stats();
        assert!(!player.stats_dirty());
    }

    #[test]
    fn test_requirements_disable_gear_in_totals() {
        let config = PipelineConfig::default();
        let mut player = PlayerState::new(PlayerId::new_random(), &config);
        player.put_equipment(EquipmentSlot::Feet, Some(boots(6, 5)));

        let totals = player.totals();
        assert_eq!(totals.get(Stat::Health), 6);
        assert!((player.max_health(&config.vitals, &totals) - 26.0).abs() < f64::EPSILON);

        player.recheck_requirements();
        assert!(player.equipment(EquipmentSlot::Feet).unwrap().requirement_disabled);
        assert_eq!(player.totals().get(Stat::Health), 0);

        player.level = 5;
        player.recheck_requirements();
        assert!(!player.equipment(EquipmentSlot::Feet).unwrap().requirement_disabled);
    }
}
