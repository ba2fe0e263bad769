//! Skill configuration loading

use super::ConfigError;
use crate::skill::{SkillDef, SkillRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Container for skill configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    #[serde(rename = "skills")]
    pub skills: Vec<SkillDef>,
}

impl SkillsConfig {
    fn into_registry(self) -> Result<SkillRegistry, ConfigError> {
        let mut seen = HashSet::new();
        for skill in &self.skills {
            if !seen.insert(skill.id.clone()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate skill id `{}`",
                    skill.id
                )));
            }
            if skill.max_level == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "skill `{}` has max_level 0",
                    skill.id
                )));
            }
        }
        Ok(self.skills.into_iter().collect())
    }
}

/// Load skill configurations from a TOML file
pub fn load_skill_configs(path: &Path) -> Result<SkillRegistry, ConfigError> {
    let config: SkillsConfig = super::load_toml(path)?;
    config.into_registry()
}

/// Load skill configurations from a TOML string
pub fn parse_skill_configs(content: &str) -> Result<SkillRegistry, ConfigError> {
    let config: SkillsConfig = super::parse_toml(content)?;
    config.into_registry()
}

/// Get default skill configurations
pub fn default_skills() -> SkillRegistry {
    let toml = include_str!("../../config/skills.toml");
    parse_skill_configs(toml).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::PassiveEffect;
    use crate::types::SkillId;

    #[test]
    fn test_parse_skills() {
        let toml = r#"
[[skills]]
id = "fireball"
name = "Fireball"
mana_cost = 12.0
cooldown = 40

[[skills]]
id = "second_wind"
name = "Second Wind"
max_level = 3

[skills.passive]
kind = "heal"
per_level = 0.5
"#;

        let skills = parse_skill_configs(toml).unwrap();
        let fireball = skills.get(&SkillId::from("fireball")).unwrap();
        assert_eq!(fireball.cooldown, 40);
        assert_eq!(fireball.max_level, 5);
        assert!(!fireball.is_passive());

        let second_wind = skills.get(&SkillId::from("second_wind")).unwrap();
        assert_eq!(second_wind.max_level, 3);
        assert_eq!(
            second_wind.passive,
            Some(PassiveEffect::Heal { per_level: 0.5 })
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml = r#"
[[skills]]
id = "dash"
name = "Dash"

[[skills]]
id = "dash"
name = "Dash again"
"#;
        assert!(matches!(
            parse_skill_configs(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_default_skills_loads_all() {
        let skills = default_skills();
        assert_eq!(skills.len(), 6, "Expected 6 skills from config");

        let expected = [
            "fireball",
            "heavy_strike",
            "dash",
            "frost_nova",
            "second_wind",
            "meditation",
        ];
        for id in expected {
            assert!(skills.contains(&SkillId::from(id)), "Missing skill: {}", id);
        }
        assert_eq!(skills.iter().filter(|s| s.is_passive()).count(), 2);
    }
}
