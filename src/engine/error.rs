use serde::Serialize;

use crate::model::inventory::ItemId;
use crate::model::quest::{QuestId, QuestStatus};
use crate::model::spell::SpellId;

/// Why an operation could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("not enough {resource}: need {required}, have {available}")]
    InsufficientResource {
        resource: &'static str,
        required: u32,
        available: i32,
    },

    #[error("quest '{quest_id}' cannot move from {from} to {to}")]
    InvalidTransition {
        quest_id: QuestId,
        from: QuestStatus,
        to: QuestStatus,
    },

    #[error("inventory already holds an item with id '{0}'")]
    DuplicateItem(ItemId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Item,
    Quest,
    Spell,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EntityKind::Item => "Item",
            EntityKind::Quest => "Quest",
            EntityKind::Spell => "Spell",
        })
    }
}

impl StoreError {
    pub fn item_not_found(id: ItemId) -> Self {
        StoreError::NotFound {
            kind: EntityKind::Item,
            id: id.to_string(),
        }
    }

    pub fn quest_not_found(id: QuestId) -> Self {
        StoreError::NotFound {
            kind: EntityKind::Quest,
            id: id.to_string(),
        }
    }

    pub fn spell_not_found(id: SpellId) -> Self {
        StoreError::NotFound {
            kind: EntityKind::Spell,
            id: id.to_string(),
        }
    }
}
