//! Order book implementation for price-time priority matching

use std::collections::{BTreeMap, HashMap, VecDeque};

use common::decimal::{Price, Quantity};
use common::error::{Error, Result};
use common::model::order::{Order, Side};
use uuid::Uuid;

/// Resting orders for one side of the book
///
/// Price levels live in a `BTreeMap`; each level is a FIFO queue of order
/// ids. The side decides which end of the map is best: highest price for
/// bids, lowest for asks. Queue order within a level is submission order,
/// so time priority (with the engine's sequence number as tie-break) falls
/// out of plain `push_back`/`front`.
///
/// The side holds ids only. Order state lives in the [`OrderBook`] arena,
/// so in-place quantity mutation never has to touch the priority
/// structure. A fill changes neither price nor arrival order, hence no
/// re-sort.
pub struct BookSide {
    side: Side,
    limits: BTreeMap<Price, VecDeque<Uuid>>,
}

impl BookSide {
    /// Create a new empty side
    pub fn new(side: Side) -> Self {
        Self {
            side,
            limits: BTreeMap::new(),
        }
    }

    /// Check if the side holds no resting orders
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    /// Add a resting order at its price level
    pub fn insert(&mut self, order: &Order) {
        debug_assert_eq!(order.side, self.side);
        self.limits.entry(order.price).or_default().push_back(order.id);
    }

    fn best_level(&self) -> Option<(&Price, &VecDeque<Uuid>)> {
        match self.side {
            Side::Buy => self.limits.iter().next_back(),
            Side::Sell => self.limits.iter().next(),
        }
    }

    /// Get the best price (highest bid / lowest ask)
    pub fn best_price(&self) -> Option<Price> {
        self.best_level().map(|(price, _)| *price)
    }

    /// Id of the highest-priority order without removing it
    ///
    /// An empty side is a normal state, signalled by `None`, not an error.
    pub fn peek_best(&self) -> Option<Uuid> {
        self.best_level().and_then(|(_, queue)| queue.front().copied())
    }

    /// Remove and return the id of the highest-priority order
    pub fn pop_best(&mut self) -> Option<Uuid> {
        let price = self.best_price()?;
        let queue = self.limits.get_mut(&price)?;
        let id = queue.pop_front();
        if queue.is_empty() {
            self.limits.remove(&price);
        }
        id
    }

    /// Evict an order whose remaining quantity reached zero after a fill
    ///
    /// Orders with quantity still remaining keep their slot untouched.
    /// Returns whether the order was removed.
    pub fn remove_if_filled(&mut self, order: &Order) -> bool {
        if !order.is_filled() {
            return false;
        }
        if let Some(queue) = self.limits.get_mut(&order.price) {
            if let Some(position) = queue.iter().position(|id| *id == order.id) {
                queue.remove(position);
                if queue.is_empty() {
                    self.limits.remove(&order.price);
                }
                return true;
            }
        }
        false
    }

    /// Aggregated (price, quantity) levels in best-first order
    pub fn price_levels(
        &self,
        orders: &HashMap<Uuid, Order>,
        limit: usize,
    ) -> Vec<(Price, Quantity)> {
        let level_quantity = |(price, queue): (&Price, &VecDeque<Uuid>)| {
            let total: Quantity = queue
                .iter()
                .filter_map(|id| orders.get(id))
                .map(|order| order.remaining_quantity)
                .sum();
            (*price, total)
        };
        match self.side {
            Side::Buy => self.limits.iter().rev().take(limit).map(level_quantity).collect(),
            Side::Sell => self.limits.iter().take(limit).map(level_quantity).collect(),
        }
    }
}

/// Order book for a single instrument
///
/// Both sides plus the order arena. Sides hold only ids; every order the
/// book is tracking lives exactly once in `orders`, keyed by id.
pub struct OrderBook {
    /// Buy side (bids)
    bids: BookSide,
    /// Sell side (asks)
    asks: BookSide,
    /// Arena of resting orders, the single owner of order state
    orders: HashMap<Uuid, Order>,
    /// Last traded price
    last_price: Option<Price>,
}

impl OrderBook {
    /// Create a new empty order book
    pub fn new() -> Self {
        Self {
            bids: BookSide::new(Side::Buy),
            asks: BookSide::new(Side::Sell),
            orders: HashMap::new(),
            last_price: None,
        }
    }

    fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// Check whether an order id is currently resting in either book
    pub fn contains(&self, order_id: Uuid) -> bool {
        self.orders.contains_key(&order_id)
    }

    /// Look up a resting order by id
    pub fn get_order(&self, order_id: Uuid) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    /// Number of resting orders across both sides
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if both sides are empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Rest an order on its own side
    pub fn add_order(&mut self, order: Order) {
        match order.side {
            Side::Buy => self.bids.insert(&order),
            Side::Sell => self.asks.insert(&order),
        }
        self.orders.insert(order.id, order);
    }

    /// The highest-priority resting order on `side`, if any
    pub fn peek_best(&self, side: Side) -> Option<&Order> {
        let id = self.side(side).peek_best()?;
        self.orders.get(&id)
    }

    /// Get the best bid order (highest price, earliest arrival)
    pub fn best_bid(&self) -> Option<&Order> {
        self.peek_best(Side::Buy)
    }

    /// Get the best ask order (lowest price, earliest arrival)
    pub fn best_ask(&self) -> Option<&Order> {
        self.peek_best(Side::Sell)
    }

    /// Get the current spread
    pub fn spread(&self) -> Option<Price> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => Some(ask.price - bid.price),
            _ => None,
        }
    }

    /// Apply a fill to the best resting order on `side`
    ///
    /// Quantity is decremented in place through the arena; a fully filled
    /// order is evicted from its side and from the arena. Returns a
    /// snapshot of the resting order after the fill.
    pub fn fill_best(&mut self, side: Side, quantity: Quantity) -> Result<Order> {
        let book = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        let id = book
            .peek_best()
            .ok_or_else(|| Error::Internal("fill_best called on an empty side".to_string()))?;
        let order = self
            .orders
            .get_mut(&id)
            .ok_or_else(|| Error::Internal(format!("resting order {} missing from arena", id)))?;
        order.fill(quantity);
        let snapshot = order.clone();
        if snapshot.is_filled() {
            book.remove_if_filled(&snapshot);
            self.orders.remove(&id);
        }
        self.last_price = Some(snapshot.price);
        Ok(snapshot)
    }

    /// Get the last traded price
    pub fn last_price(&self) -> Option<Price> {
        self.last_price
    }

    /// Bid price levels with aggregated quantities (for display)
    pub fn bid_levels(&self, limit: usize) -> Vec<(Price, Quantity)> {
        self.bids.price_levels(&self.orders, limit)
    }

    /// Ask price levels with aggregated quantities (for display)
    pub fn ask_levels(&self, limit: usize) -> Vec<(Price, Quantity)> {
        self.asks.price_levels(&self.orders, limit)
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
