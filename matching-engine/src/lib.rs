//! Price-time priority matching for a single instrument

pub mod engine;
pub mod order_book;

pub use engine::MatchingEngine;
pub use order_book::{BookSide, OrderBook};
