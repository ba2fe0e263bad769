//! Player class definitions and their persisted registry

pub mod progress;

pub use progress::{ClassProgress, CLASS_SLOTS};

use crate::stat::Stat;
use crate::types::{ClassId, SkillId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};

/// File name of the class registry inside the data directory
pub const REGISTRY_FILE: &str = "playerclassregistry.json";

/// Class registry persistence error
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to access class registry: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed class registry: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Class `{0}` is defined twice")]
    DuplicateClass(ClassId),
}

/// A selectable class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerClass {
    pub key: ClassId,
    /// Skill -> player level required to learn it
    #[serde(default)]
    pub skills: BTreeMap<SkillId, u32>,
    /// Added to the player's base stats while the class is selected
    #[serde(default, rename = "baseStats")]
    pub base_stats: BTreeMap<Stat, i32>,
}

impl PlayerClass {
    pub fn new(key: impl Into<ClassId>) -> Self {
        PlayerClass {
            key: key.into(),
            skills: BTreeMap::new(),
            base_stats: BTreeMap::new(),
        }
    }

    pub fn with_skill(mut self, skill: impl Into<SkillId>, required_level: u32) -> Self {
        self.skills.insert(skill.into(), required_level);
        self
    }

    pub fn with_base_stat(mut self, stat: Stat, value: i32) -> Self {
        self.base_stats.insert(stat, value);
        self
    }

    /// Level needed to learn `skill` through this class
    pub fn skill_requirement(&self, skill: &SkillId) -> Option<u32> {
        self.skills.get(skill).copied()
    }
}

/// All known classes, keyed by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassRegistry {
    classes: BTreeMap<ClassId, PlayerClass>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a class
    pub fn register(&mut self, class: PlayerClass) {
        self.classes.insert(class.key.clone(), class);
    }

    pub fn get(&self, key: &ClassId) -> Option<&PlayerClass> {
        self.classes.get(key)
    }

    pub fn contains(&self, key: &ClassId) -> bool {
        self.classes.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerClass> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn from_json(content: &str) -> Result<Self, RegistryError> {
        let list: Vec<PlayerClass> = serde_json::from_str(content)?;
        let mut registry = ClassRegistry::new();
        for class in list {
            if registry.contains(&class.key) {
                return Err(RegistryError::DuplicateClass(class.key));
            }
            registry.register(class);
        }
        Ok(registry)
    }

    pub fn to_json(&self) -> Result<String, RegistryError> {
        let list: Vec<&PlayerClass> = self.classes.values().collect();
        Ok(serde_json::to_string_pretty(&list)?)
    }

    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Replace the registry with the file in `data_dir`
    ///
    /// A missing file is created from the current contents. A file that cannot
    /// be read or parsed is logged and the current contents are kept.
    pub fn load_or_init(&mut self, data_dir: &Path) {
        let path = data_dir.join(REGISTRY_FILE);
        if !path.exists() {
            match self.save(&path) {
                Ok(()) => info!(path = %path.display(), classes = self.len(), "wrote default class registry"),
                Err(e) => error!(path = %path.display(), error = %e, "could not write class registry"),
            }
            return;
        }
        match Self::load(&path) {
            Ok(loaded) => {
                info!(path = %path.display(), classes = loaded.len(), "loaded class registry");
                *self = loaded;
            }
            Err(e) => error!(path = %path.display(), error = %e, "could not load class registry"),
        }
    }
}

impl FromIterator<PlayerClass> for ClassRegistry {
    fn from_iter<I: IntoIterator<Item = PlayerClass>>(iter: I) -> Self {
        let mut registry = ClassRegistry::new();
        for class in iter {
            registry.register(class);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warrior() -> PlayerClass {
        PlayerClass::new("warrior")
            .with_skill("heavy_strike", 1)
            .with_skill("dash", 5)
            .with_base_stat(Stat::Strength, 3)
    }

    #[test]
    fn test_json_shape() {
        let registry: ClassRegistry = vec![warrior()].into_iter().collect();
        let json: serde_json::Value = serde_json::from_str(&registry.to_json().unwrap()).unwrap();
        assert_eq!(json[0]["key"], "warrior");
        assert_eq!(json[0]["skills"]["dash"], 5);
        assert_eq!(json[0]["baseStats"]["primary:strength"], 3);
    }

    #[test]
    fn test_parse_original_layout() {
        let json = r#"[
            {"key": "mage", "skills": {"fireball": 1}, "baseStats": {"primary:intelligence": 4}},
            {"key": "rogue"}
        ]"#;
        let registry = ClassRegistry::from_json(json).unwrap();
        assert_eq!(registry.len(), 2);
        let mage = registry.get(&ClassId::from("mage")).unwrap();
        assert_eq!(mage.skill_requirement(&SkillId::from("fireball")), Some(1));
        assert_eq!(mage.base_stats.get(&Stat::Intelligence), Some(&4));
        assert!(registry.get(&ClassId::from("rogue")).unwrap().skills.is_empty());
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let json = r#"[{"key": "mage"}, {"key": "mage"}]"#;
        assert!(matches!(
            ClassRegistry::from_json(json),
            Err(RegistryError::DuplicateClass(_))
        ));
    }

    #[test]
    fn test_unknown_stat_rejected() {
        let json = r#"[{"key": "mage", "baseStats": {"primary:luck": 1}}]"#;
        assert!(matches!(
            ClassRegistry::from_json(json),
            Err(RegistryError::Json(_))
        ));
    }
}
