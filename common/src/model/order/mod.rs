//! Order models and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Price, Quantity};

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an order matches against
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Order has been received but has no fills yet
    New,
    /// Order has been partially filled and rests in a book
    PartiallyFilled,
    /// Order has been filled completely (terminal, no longer tracked)
    Filled,
}

/// Order model
///
/// `remaining_quantity` is the only field the engine mutates after
/// submission; it decreases monotonically as fills occur and never goes
/// negative. An order whose remaining quantity reaches zero is evicted
/// from its book and discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID
    pub id: Uuid,
    /// Order side (buy or sell)
    pub side: Side,
    /// Limit price
    pub price: Price,
    /// Original quantity
    pub quantity: Quantity,
    /// Remaining quantity
    pub remaining_quantity: Quantity,
    /// Cumulative matched quantity
    pub filled_quantity: Quantity,
    /// Current status
    pub status: Status,
    /// Creation timestamp, used only as a priority tie-break
    pub create_time: DateTime<Utc>,
    /// Submission sequence number, assigned by the engine at accept time.
    /// Breaks `create_time` ties so book ordering is a strict total order.
    pub seq: u64,
}

impl Order {
    /// Create a new limit order with a fresh id
    pub fn new(side: Side, price: Price, quantity: Quantity) -> Self {
        Self::with_id(Uuid::new_v4(), side, price, quantity)
    }

    /// Create a new limit order with a caller-chosen id
    pub fn with_id(id: Uuid, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
            remaining_quantity: quantity,
            filled_quantity: Quantity::ZERO,
            status: Status::New,
            create_time: Utc::now(),
            seq: 0,
        }
    }

    /// Apply a fill of `quantity` against this order
    pub fn fill(&mut self, quantity: Quantity) {
        debug_assert!(quantity <= self.remaining_quantity);
        self.remaining_quantity -= quantity;
        self.filled_quantity += quantity;
        self.status = if self.remaining_quantity.is_zero() {
            Status::Filled
        } else {
            Status::PartiallyFilled
        };
    }

    /// Check if the order is fully filled
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity.is_zero()
    }
}
