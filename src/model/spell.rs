use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellId(pub u32);

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellType {
    Attack,
    Support,
    Buff,
    Debuff,
}

/// Spells never change once seeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    pub mana_cost: u32,

    #[serde(rename = "type")]
    pub spell_type: SpellType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healing: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Spell {
    pub fn new(id: u32, name: impl Into<String>, mana_cost: u32, spell_type: SpellType) -> Self {
        Self {
            id: SpellId(id),
            name: name.into(),
            mana_cost,
            spell_type,
            damage: None,
            healing: None,
            defense: None,
            cooldown: None,
            level: None,
            range: None,
            description: None,
            icon: None,
        }
    }
}

pub fn seed_spells() -> Vec<Spell> {
    vec![
        Spell {
            damage: Some(25),
            ..Spell::new(1, "Fireball", 15, SpellType::Attack)
        },
        Spell {
            healing: Some(20),
            ..Spell::new(2, "Heal", 10, SpellType::Support)
        },
        Spell {
            defense: Some(15),
            ..Spell::new(3, "Shield", 8, SpellType::Buff)
        },
    ]
}
