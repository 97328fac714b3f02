//! Execution models and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Price, Quantity};

/// Execution model representing one trade between exactly two orders
///
/// Executions are immutable once created. The engine returns them to the
/// caller and does not retain them; it is not a trade ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    /// Sequential execution ID, assigned by the engine starting at 1
    pub id: u64,
    /// Price at which the trade printed (always the resting order's price)
    pub price: Price,
    /// Quantity traded
    pub quantity: Quantity,
    /// Buy-side order ID
    pub buy_order_id: Uuid,
    /// Sell-side order ID
    pub sell_order_id: Uuid,
    /// Timestamp of the match
    pub executed_at: DateTime<Utc>,
}

impl Execution {
    /// Create a new execution from a match
    pub fn new(
        id: u64,
        price: Price,
        quantity: Quantity,
        buy_order_id: Uuid,
        sell_order_id: Uuid,
    ) -> Self {
        Self {
            id,
            price,
            quantity,
            buy_order_id,
            sell_order_id,
            executed_at: Utc::now(),
        }
    }
}
