//! Error types

mod api;
mod auth;
mod field;
mod state;

pub use api::*;
pub use auth::*;
pub use field::*;
pub use state::*;

/// Top-level error type for all client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Authentication or authorization failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A record field access failed.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Application-state persistence failed.
    #[error(transparent)]
    State(#[from] StateError),

    /// A response was superseded by a newer request and discarded.
    #[error("Stale response discarded (request {ticket}, latest {latest})")]
    Stale {
        /// Sequence number of the request that produced the response.
        ticket: u64,
        /// Sequence number of the most recently issued request.
        latest: u64,
    },
}
