use common::decimal::{Price, Quantity};
use common::error::{Error, Result};
use common::model::execution::Execution;
use common::model::order::{Order, Side};
use tracing::{debug, info};
use uuid::Uuid;

use crate::order_book::OrderBook;

/// The matching engine for a single instrument
///
/// Owns both sides of the book and processes one incoming order at a time.
/// `submit` runs to completion before any other operation can observe
/// engine state; callers needing concurrent access must serialize around
/// the instance.
pub struct MatchingEngine {
    /// The single-instrument order book
    book: OrderBook,
    /// Submission sequence counter, stamps `Order::seq`
    next_seq: u64,
    /// Sequential execution id counter
    next_execution_id: u64,
}

impl MatchingEngine {
    /// Create a new matching engine with both books empty
    pub fn new() -> Self {
        info!("Initializing matching engine with empty books");
        Self {
            book: OrderBook::new(),
            next_seq: 1,
            next_execution_id: 1,
        }
    }

    /// Generate the next submission sequence number
    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Generate the next sequential execution ID
    fn next_execution_id(&mut self) -> u64 {
        let id = self.next_execution_id;
        self.next_execution_id += 1;
        id
    }

    /// Validate an order before any book state is touched
    fn validate(&self, order: &Order) -> Result<()> {
        if order.price <= Price::ZERO {
            return Err(Error::InvalidOrder(format!(
                "price must be positive, got {}",
                order.price
            )));
        }
        if order.quantity <= Quantity::ZERO {
            return Err(Error::InvalidOrder(format!(
                "quantity must be positive, got {}",
                order.quantity
            )));
        }
        if self.book.contains(order.id) {
            return Err(Error::DuplicateOrder(order.id));
        }
        Ok(())
    }

    /// Process an incoming order
    ///
    /// Matches the order against the opposite side until no cross remains,
    /// then rests any unfilled remainder on its own side. Returns the
    /// executions in the order the matches occurred. An empty list is a
    /// successful outcome, distinct from a validation error.
    pub fn submit(&mut self, order: Order) -> Result<Vec<Execution>> {
        self.validate(&order)?;

        let mut incoming = order;
        incoming.seq = self.next_seq();
        debug!(
            "Processing order {}: {:?} {} @ {}",
            incoming.id, incoming.side, incoming.quantity, incoming.price
        );

        let mut executions = Vec::new();
        let opposite = incoming.side.opposite();

        while !incoming.remaining_quantity.is_zero() {
            let (best_price, best_remaining) = match self.book.peek_best(opposite) {
                Some(best) => (best.price, best.remaining_quantity),
                None => break,
            };
            let crosses = match incoming.side {
                Side::Buy => incoming.price >= best_price,
                Side::Sell => incoming.price <= best_price,
            };
            if !crosses {
                break;
            }

            let match_quantity = incoming.remaining_quantity.min(best_remaining);
            let resting = self.book.fill_best(opposite, match_quantity)?;
            incoming.fill(match_quantity);

            // The resting order arrived first and sets the print price.
            let (buy_order_id, sell_order_id) = match incoming.side {
                Side::Buy => (incoming.id, resting.id),
                Side::Sell => (resting.id, incoming.id),
            };
            let execution = Execution::new(
                self.next_execution_id(),
                resting.price,
                match_quantity,
                buy_order_id,
                sell_order_id,
            );
            debug!(
                "Execution {}: {} @ {} (buy {}, sell {})",
                execution.id, execution.quantity, execution.price, buy_order_id, sell_order_id
            );
            executions.push(execution);
        }

        if !incoming.remaining_quantity.is_zero() {
            debug!(
                "Resting order {} with remaining {}",
                incoming.id, incoming.remaining_quantity
            );
            self.book.add_order(incoming);
        }

        Ok(executions)
    }

    /// Get the best bid without mutating book state
    pub fn best_bid(&self) -> Option<&Order> {
        self.book.best_bid()
    }

    /// Get the best ask without mutating book state
    pub fn best_ask(&self) -> Option<&Order> {
        self.book.best_ask()
    }

    /// Look up a resting order by id
    pub fn get_order(&self, order_id: Uuid) -> Option<&Order> {
        self.book.get_order(order_id)
    }

    /// Get the last traded price
    pub fn last_price(&self) -> Option<Price> {
        self.book.last_price()
    }

    /// Get aggregated (bids, asks) depth, best levels first
    pub fn depth(&self, limit: usize) -> (Vec<(Price, Quantity)>, Vec<(Price, Quantity)>) {
        (self.book.bid_levels(limit), self.book.ask_levels(limit))
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}
