//! Matching Engine
//!
//! Single-instrument limit order book implementing price-time priority
//! matching.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - No residual cross once an operation returns (best bid < best ask)
//! - Empty price levels never remain in the book
//! - An order id is registered iff the order rests on exactly one side
//! - Conservation of quantity

pub mod book;
pub mod matching;
pub mod engine;

pub use engine::{Orderbook, OrderbookConfig};
