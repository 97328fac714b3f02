//! Common types and utilities for the matching engine
//!
//! This library contains the shared value types used by the engine and its
//! consumers: precise decimal aliases, the unified error type, and the
//! order/execution domain models.

pub mod decimal;
pub mod error;
pub mod model;

/// Re-export important types
pub use decimal::*;
pub use error::{Error, Result};
