use serde::{Deserialize, Serialize};

use crate::model::inventory::{InventoryItem, ItemId};
use crate::model::player::PlayerPatch;
use crate::model::quest::{QuestId, QuestPatch};
use crate::model::settings::SettingsPatch;
use crate::model::spell::SpellId;

/// The closed set of state transitions the store accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    UpdatePlayer {
        patch: PlayerPatch,
    },

    AddInventoryItem {
        item: InventoryItem,
    },

    RemoveInventoryItem {
        id: ItemId,
    },

    UpdateQuest {
        id: QuestId,
        patch: QuestPatch,
    },

    CastSpell {
        spell_id: SpellId,
    },

    UpdateSettings {
        patch: SettingsPatch,
    },
}

impl Operation {
    pub fn short_name(&self) -> &'static str {
        match self {
            Operation::UpdatePlayer { .. } => "UpdatePlayer",
            Operation::AddInventoryItem { .. } => "AddInventoryItem",
            Operation::RemoveInventoryItem { .. } => "RemoveInventoryItem",
            Operation::UpdateQuest { .. } => "UpdateQuest",
            Operation::CastSpell { .. } => "CastSpell",
            Operation::UpdateSettings { .. } => "UpdateSettings",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_tagged_json() {
        let op: Operation =
            serde_json::from_str(r#"{"type": "cast_spell", "spell_id": 2}"#).unwrap();
        assert_eq!(
            op,
            Operation::CastSpell {
                spell_id: SpellId(2)
            }
        );
        assert_eq!(op.short_name(), "CastSpell");

        let op: Operation = serde_json::from_str(
            r#"{"type": "update_quest", "id": 1, "patch": {"status": "completed"}}"#,
        )
        .unwrap();
        let Operation::UpdateQuest { id, patch } = op else {
            panic!("expected UpdateQuest");
        };
        assert_eq!(id, QuestId(1));
        assert_eq!(patch.status, Some(crate::model::quest::QuestStatus::Completed));
    }
}
