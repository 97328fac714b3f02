//! Domain models for the matching engine

pub mod execution;
pub mod order;
