use crate::engine::error::StoreError;
use crate::model::game_state::GameState;
use crate::model::operation::Operation;

/// How strictly operations are checked before they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Raw merges, any quest status jump, failures leave state untouched.
    #[default]
    Lenient,
    /// Clamped player values, lifecycle-checked quest status, duplicate ids
    /// rejected.
    Strict,
}

/// Apply an Operation to a GameState, returning the next state.
///
/// Pure: `state` is never modified. An `Err` means the operation has no
/// effect; whether that is reported or swallowed is up to the caller.
pub fn apply_operation(
    state: &GameState,
    operation: Operation,
    policy: TransitionPolicy,
) -> Result<GameState, StoreError> {
    match operation {
        Operation::UpdatePlayer { patch } => {
            let mut player = state.player.merged(patch);
            if policy == TransitionPolicy::Strict {
                player = player.clamped();
            }

            Ok(GameState {
                player,
                ..state.clone()
            })
        }

        Operation::AddInventoryItem { item } => {
            if policy == TransitionPolicy::Strict && state.item(item.id).is_some() {
                return Err(StoreError::DuplicateItem(item.id));
            }

            let mut inventory = state.inventory.clone();
            inventory.push(item);

            Ok(GameState {
                inventory,
                ..state.clone()
            })
        }

        Operation::RemoveInventoryItem { id } => {
            if state.item(id).is_none() {
                return Err(StoreError::item_not_found(id));
            }

            let inventory = state
                .inventory
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect();

            Ok(GameState {
                inventory,
                ..state.clone()
            })
        }

        Operation::UpdateQuest { id, patch } => {
            let Some(quest) = state.quest(id) else {
                return Err(StoreError::quest_not_found(id));
            };

            if policy == TransitionPolicy::Strict {
                if let Some(next) = patch.status {
                    if !quest.status.can_transition_to(next) {
                        return Err(StoreError::InvalidTransition {
                            quest_id: id,
                            from: quest.status,
                            to: next,
                        });
                    }
                }
            }

            let quests = state
                .quests
                .iter()
                .map(|quest| {
                    if quest.id == id {
                        quest.merged(patch.clone())
                    } else {
                        quest.clone()
                    }
                })
                .collect();

            Ok(GameState {
                quests,
                ..state.clone()
            })
        }

        Operation::CastSpell { spell_id } => {
            let Some(spell) = state.spell(spell_id) else {
                return Err(StoreError::spell_not_found(spell_id));
            };

            let remaining = i32::try_from(spell.mana_cost)
                .ok()
                .and_then(|cost| state.player.mana.checked_sub(cost))
                .filter(|mana| *mana >= 0);
            let Some(remaining) = remaining else {
                return Err(StoreError::InsufficientResource {
                    resource: "mana",
                    required: spell.mana_cost,
                    available: state.player.mana,
                });
            };

            let mut player = state.player.clone();
            player.mana = remaining;
            if policy == TransitionPolicy::Strict {
                player = player.clamped();
            }

            Ok(GameState {
                player,
                ..state.clone()
            })
        }

        Operation::UpdateSettings { patch } => Ok(GameState {
            settings: state.settings.merged(patch),
            ..state.clone()
        }),
    }
}
