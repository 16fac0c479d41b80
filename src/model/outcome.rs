use serde::Serialize;

use crate::engine::error::StoreError;

/// What a dispatch did to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DispatchOutcome {
    /// A new snapshot was published.
    Applied,
    /// The snapshot is untouched. Only produced under the lenient policy,
    /// where failures are swallowed instead of returned.
    Unchanged { reason: StoreError },
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DispatchOutcome::Applied)
    }
}
