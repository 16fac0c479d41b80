//! Game state core for the RPG dashboard: the state store and its
//! operations, derived display values, the persisted theme flag and the
//! demo REST client.

pub mod api;
pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod storage;

pub use engine::{GameStore, StoreError, TransitionPolicy};
pub use model::game_state::GameState;
pub use model::operation::Operation;
pub use model::outcome::DispatchOutcome;
