//! Engine error taxonomy
//!
//! Four recoverable kinds plus a catch-all for the persistence layer.
//! Nothing here is retried automatically; the one automatic retry in
//! the system (capacity truncation) lives inside the store adapter.

use thiserror::Error;

use crate::store::StoreError;

/// Engine error
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed input at a boundary; the operation is rejected with no
    /// partial mutation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Operation attempted without its precondition; no state change
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Update/delete referencing an id absent from its collection
    #[error("Not found: {0}")]
    NotFound(String),

    /// The order history does not fit the storage budget even after
    /// truncation; the user must delete history or products
    #[error("Storage capacity exceeded ({needed} bytes needed, budget {budget})")]
    CapacityExceeded { needed: usize, budget: usize },

    /// Any other persistence failure
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CapacityExceeded { needed, budget } => {
                Self::CapacityExceeded { needed, budget }
            }
            other => Self::Store(other),
        }
    }
}

/// Result type for engine operations
pub type CoreResult<T> = Result<T, CoreError>;
