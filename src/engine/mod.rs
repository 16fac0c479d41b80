pub mod apply_operation;
pub mod derived;
pub mod error;
pub mod store;

pub use apply_operation::{apply_operation, TransitionPolicy};
pub use error::StoreError;
pub use store::{GameStore, SubscriptionId};
