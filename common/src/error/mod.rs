//! Error types for the matching engine
//!
//! A single error enum shared across the workspace. Validation failures are
//! surfaced to the caller before any book state is touched; there are no
//! transient or retryable failure modes because the engine performs no I/O.

use thiserror::Error;
use uuid::Uuid;

/// Matching engine error type
#[derive(Debug, Error)]
pub enum Error {
    /// The order failed validation (non-positive price or quantity)
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// The order id collides with an order already resting in a book
    #[error("Duplicate order id: {0}")]
    DuplicateOrder(Uuid),

    /// Book and order-arena state disagree; indicates an engine bug
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
