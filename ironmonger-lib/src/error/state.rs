//! Application-state persistence error types

/// Errors that can occur while persisting or restoring application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The persisted snapshot could not be serialized or deserialized.
    #[error("State serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing store failed to load or save.
    #[error("State storage error: {0}")]
    Storage(String),
}

impl StateError {
    /// Creates a new storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}
