use serde::{Deserialize, Serialize};

use crate::model::inventory::{seed_inventory, InventoryItem, ItemId};
use crate::model::player::Player;
use crate::model::quest::{seed_quests, Quest, QuestId};
use crate::model::settings::GameSettings;
use crate::model::spell::{seed_spells, Spell, SpellId};

/// A full snapshot of the game state.
/// Published by the store behind an `Arc` and READ-ONLY everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub inventory: Vec<InventoryItem>,
    pub quests: Vec<Quest>,
    pub spells: Vec<Spell>,

    #[serde(rename = "gameSettings")]
    pub settings: GameSettings,
}

impl GameState {
    pub fn item(&self, id: ItemId) -> Option<&InventoryItem> {
        self.inventory.iter().find(|item| item.id == id)
    }

    pub fn quest(&self, id: QuestId) -> Option<&Quest> {
        self.quests.iter().find(|quest| quest.id == id)
    }

    pub fn spell(&self, id: SpellId) -> Option<&Spell> {
        self.spells.iter().find(|spell| spell.id == id)
    }
}

impl Default for GameState {
    /// The seeded character: three items, two active quests, three spells.
    fn default() -> Self {
        Self {
            player: Player::default(),
            inventory: seed_inventory(),
            quests: seed_quests(),
            spells: seed_spells(),
            settings: GameSettings::default(),
        }
    }
}
