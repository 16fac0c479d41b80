use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub experience: i32,
    pub experience_to_next: i32,

    /// Attribute name -> value (strength, agility, ...)
    pub stats: BTreeMap<String, i32>,
}

/// Partial player update. Every `Some` field overwrites the current value;
/// `stats` replaces the whole map, it is not merged key by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_health: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mana: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_to_next: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<BTreeMap<String, i32>>,
}

impl PlayerPatch {
    pub fn health(value: i32) -> Self {
        Self {
            health: Some(value),
            ..Self::default()
        }
    }

    pub fn mana(value: i32) -> Self {
        Self {
            mana: Some(value),
            ..Self::default()
        }
    }
}

impl Player {
    /// Shallow merge, no validation.
    pub fn merged(&self, patch: PlayerPatch) -> Player {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(level) = patch.level {
            next.level = level;
        }
        if let Some(health) = patch.health {
            next.health = health;
        }
        if let Some(max_health) = patch.max_health {
            next.max_health = max_health;
        }
        if let Some(mana) = patch.mana {
            next.mana = mana;
        }
        if let Some(max_mana) = patch.max_mana {
            next.max_mana = max_mana;
        }
        if let Some(experience) = patch.experience {
            next.experience = experience;
        }
        if let Some(experience_to_next) = patch.experience_to_next {
            next.experience_to_next = experience_to_next;
        }
        if let Some(stats) = patch.stats {
            next.stats = stats;
        }
        next
    }

    /// Pulls every bounded field back into its legal range.
    pub fn clamped(mut self) -> Player {
        self.level = self.level.max(1);
        self.max_health = self.max_health.max(0);
        self.max_mana = self.max_mana.max(0);
        self.health = self.health.clamp(0, self.max_health);
        self.mana = self.mana.clamp(0, self.max_mana);
        self.experience = self.experience.max(0);
        self.experience_to_next = self.experience_to_next.max(1);
        self
    }
}

impl Default for Player {
    fn default() -> Self {
        let mut stats = BTreeMap::new();
        stats.insert("strength".into(), 10);
        stats.insert("agility".into(), 8);
        stats.insert("intelligence".into(), 12);
        stats.insert("defense".into(), 7);

        Self {
            name: "Hero".to_string(),
            level: 1,
            health: 100,
            max_health: 100,
            mana: 50,
            max_mana: 50,
            experience: 0,
            experience_to_next: 100,
            stats,
        }
    }
}
