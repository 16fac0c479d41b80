use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::engine::apply_operation::{apply_operation, TransitionPolicy};
use crate::engine::error::StoreError;
use crate::model::game_state::GameState;
use crate::model::inventory::{InventoryItem, ItemId};
use crate::model::operation::Operation;
use crate::model::outcome::DispatchOutcome;
use crate::model::player::PlayerPatch;
use crate::model::quest::{QuestId, QuestPatch};
use crate::model::settings::SettingsPatch;
use crate::model::spell::SpellId;

pub type Listener = Box<dyn FnMut(&Arc<GameState>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Single owner and sole writer of the game state.
///
/// Every successful operation publishes a fresh `Arc<GameState>`; consumers
/// can compare snapshots with `Arc::ptr_eq` to see whether anything changed.
pub struct GameStore {
    state: Arc<GameState>,
    policy: TransitionPolicy,
    listeners: Vec<(SubscriptionId, Listener)>,
    channels: Vec<Sender<Arc<GameState>>>,
    next_subscription: u64,
}

impl GameStore {
    pub fn new(state: GameState) -> Self {
        Self::with_policy(state, TransitionPolicy::default())
    }

    pub fn with_policy(state: GameState, policy: TransitionPolicy) -> Self {
        Self {
            state: Arc::new(state),
            policy,
            listeners: Vec::new(),
            channels: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Store holding the seeded character.
    pub fn seeded() -> Self {
        Self::new(GameState::default())
    }

    pub fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Register a callback run after every published snapshot, in
    /// registration order.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<GameState>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Receive every published snapshot over a channel. Dropping the
    /// receiver ends the subscription.
    pub fn subscribe_channel(&mut self) -> Receiver<Arc<GameState>> {
        let (tx, rx) = mpsc::channel();
        self.channels.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len() + self.channels.len()
    }

    /// Apply one operation and notify subscribers if the state changed.
    ///
    /// Under `Lenient` a failed operation is not an error: the snapshot is
    /// kept and the reason comes back as `DispatchOutcome::Unchanged`.
    pub fn dispatch(&mut self, operation: Operation) -> Result<DispatchOutcome, StoreError> {
        let name = operation.short_name();

        match apply_operation(&self.state, operation, self.policy) {
            Ok(next) => {
                tracing::debug!(operation = name, "operation applied");
                self.state = Arc::new(next);
                self.notify();
                Ok(DispatchOutcome::Applied)
            }
            Err(reason) => match self.policy {
                TransitionPolicy::Lenient => {
                    tracing::debug!(operation = name, %reason, "operation left state unchanged");
                    Ok(DispatchOutcome::Unchanged { reason })
                }
                TransitionPolicy::Strict => {
                    tracing::warn!(operation = name, %reason, "operation rejected");
                    Err(reason)
                }
            },
        }
    }

    pub fn update_player(&mut self, patch: PlayerPatch) -> Result<DispatchOutcome, StoreError> {
        self.dispatch(Operation::UpdatePlayer { patch })
    }

    pub fn add_inventory_item(
        &mut self,
        item: InventoryItem,
    ) -> Result<DispatchOutcome, StoreError> {
        self.dispatch(Operation::AddInventoryItem { item })
    }

    pub fn remove_inventory_item(&mut self, id: ItemId) -> Result<DispatchOutcome, StoreError> {
        self.dispatch(Operation::RemoveInventoryItem { id })
    }

    pub fn update_quest(
        &mut self,
        id: QuestId,
        patch: QuestPatch,
    ) -> Result<DispatchOutcome, StoreError> {
        self.dispatch(Operation::UpdateQuest { id, patch })
    }

    pub fn cast_spell(&mut self, spell_id: SpellId) -> Result<DispatchOutcome, StoreError> {
        self.dispatch(Operation::CastSpell { spell_id })
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<DispatchOutcome, StoreError> {
        self.dispatch(Operation::UpdateSettings { patch })
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }

        let snapshot = &self.state;
        self.channels
            .retain(|tx| tx.send(Arc::clone(snapshot)).is_ok());
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::seeded()
    }
}
