//! Pipeline configuration
//!
//! Every toggle the mutation pipeline consults lives here and is handed to the
//! engine at construction. All fields have defaults so a partial file works.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable pipeline settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub ticks: TickConfig,
    #[serde(default)]
    pub vitals: VitalsConfig,
    #[serde(default)]
    pub progression: ProgressionConfig,
    #[serde(default)]
    pub loot: LootConfig,
    #[serde(default)]
    pub protection: ProtectionConfig,
}

impl PipelineConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: PipelineConfig = super::load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a config string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = super::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ticks = &self.ticks;
        if ticks.passive_interval == 0 {
            return Err(ConfigError::ValidationError(
                "ticks.passive_interval must be greater than 0".to_string(),
            ));
        }
        if ticks.regen_interval == 0 {
            return Err(ConfigError::ValidationError(
                "ticks.regen_interval must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&ticks.combat_regen_factor) {
            return Err(ConfigError::ValidationError(format!(
                "ticks.combat_regen_factor must be within 0..=1, got {}",
                ticks.combat_regen_factor
            )));
        }
        if self.vitals.base_health <= 0.0 {
            return Err(ConfigError::ValidationError(
                "vitals.base_health must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickConfig {
    /// Ticks of existence before health/mana are clamped to max
    #[serde(default = "default_grace_ticks")]
    pub grace_ticks: u64,
    /// Passive skills fire on multiples of this
    #[serde(default = "default_passive_interval")]
    pub passive_interval: u64,
    /// Countdown between two regeneration pulses
    #[serde(default = "default_regen_interval")]
    pub regen_interval: u32,
    /// Ticks a player stays in combat after dealing or taking damage
    #[serde(default = "default_combat_timeout")]
    pub combat_timeout: u32,
    /// Regeneration multiplier while in combat
    #[serde(default = "default_combat_regen_factor")]
    pub combat_regen_factor: f64,
}

impl Default for TickConfig {
    fn default() -> Self {
        TickConfig {
            grace_ticks: default_grace_ticks(),
            passive_interval: default_passive_interval(),
            regen_interval: default_regen_interval(),
            combat_timeout: default_combat_timeout(),
            combat_regen_factor: default_combat_regen_factor(),
        }
    }
}

fn default_grace_ticks() -> u64 {
    10
}
fn default_passive_interval() -> u64 {
    10
}
fn default_regen_interval() -> u32 {
    100
}
fn default_combat_timeout() -> u32 {
    100
}
fn default_combat_regen_factor() -> f64 {
    0.2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsConfig {
    /// Max health before the Health stat is added
    #[serde(default = "default_base_health")]
    pub base_health: f64,
    /// Max mana before the Psyche stat is added
    #[serde(default = "default_base_mana")]
    pub base_mana: f64,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        VitalsConfig {
            base_health: default_base_health(),
            base_mana: default_base_mana(),
        }
    }
}

fn default_base_health() -> f64 {
    20.0
}
fn default_base_mana() -> f64 {
    20.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    #[serde(default)]
    pub starting_attribute_points: u32,
    #[serde(default)]
    pub starting_skill_points: u32,
    #[serde(default = "default_points_per_level")]
    pub attribute_points_per_level: u32,
    #[serde(default = "default_points_per_level")]
    pub skill_points_per_level: u32,
    /// Allow replacing or clearing an already chosen class slot
    #[serde(default)]
    pub remove_class_whenever: bool,
    /// Allow lowering a learned skill (refunds the point)
    #[serde(default)]
    pub remove_skills_whenever: bool,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        ProgressionConfig {
            starting_attribute_points: 0,
            starting_skill_points: 0,
            attribute_points_per_level: default_points_per_level(),
            skill_points_per_level: default_points_per_level(),
            remove_class_whenever: false,
            remove_skills_whenever: false,
        }
    }
}

fn default_points_per_level() -> u32 {
    1
}

/// Loot transforms, all off unless configured
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootConfig {
    /// Expand loot tokens into gear before dropping
    #[serde(default)]
    pub auto_open: bool,
    #[serde(default)]
    pub auto_identify_on_pickup: bool,
    #[serde(default)]
    pub auto_identify_on_drop: bool,
}

/// World protection toggles consumed at event-check time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectionConfig {
    #[serde(default = "default_true")]
    pub prevent_trample: bool,
    #[serde(default = "default_true")]
    pub protect_paintings: bool,
    /// Block ids players may interact with; empty allows everything not blocked
    #[serde(default)]
    pub interaction_allow: Vec<String>,
    #[serde(default)]
    pub interaction_block: Vec<String>,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        ProtectionConfig {
            prevent_trample: true,
            protect_paintings: true,
            interaction_allow: Vec::new(),
            interaction_block: Vec::new(),
        }
    }
}

impl ProtectionConfig {
    /// Block list wins over allow list
    pub fn allows_interaction(&self, block_id: &str) -> bool {
        if self.interaction_block.iter().any(|b| b == block_id) {
            return false;
        }
        self.interaction_allow.is_empty() || self.interaction_allow.iter().any(|b| b == block_id)
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.ticks.grace_ticks, 10);
        assert_eq!(config.ticks.passive_interval, 10);
        assert_eq!(config.ticks.regen_interval, 100);
        assert!((config.ticks.combat_regen_factor - 0.2).abs() < f64::EPSILON);
        assert!(!config.loot.auto_open);
        assert!(config.protection.prevent_trample);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = PipelineConfig::parse(
            r#"
[loot]
auto_open = true

[progression]
remove_skills_whenever = true
"#,
        )
        .unwrap();
        assert!(config.loot.auto_open);
        assert!(!config.loot.auto_identify_on_drop);
        assert!(config.progression.remove_skills_whenever);
        assert_eq!(config.progression.skill_points_per_level, 1);
        assert_eq!(config.ticks.regen_interval, 100);
    }

    #[test]
    fn test_bundled_file_parses() {
        let toml = include_str!("../../config/pipeline.toml");
        let config = PipelineConfig::parse(toml).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_interval() {
        let result = PipelineConfig::parse("[ticks]\nregen_interval = 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let result = PipelineConfig::parse("[ticks]\ncombat_regen_factor = 1.5\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_interaction_lists() {
        let mut protection = ProtectionConfig::default();
        assert!(protection.allows_interaction("minecraft:chest"));

        protection.interaction_block.push("minecraft:anvil".to_string());
        assert!(!protection.allows_interaction("minecraft:anvil"));

        protection.interaction_allow.push("minecraft:door".to_string());
        assert!(protection.allows_interaction("minecraft:door"));
        assert!(!protection.allows_interaction("minecraft:chest"));
    }
}
