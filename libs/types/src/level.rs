//! Aggregated depth snapshot types
//!
//! A snapshot is a read-only projection of the book: per price, the sum of
//! the remaining quantity of every order resting there, best price first.

use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Aggregate quantity resting at one price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelInfo {
    pub price: Price,
    pub quantity: Quantity,
}

impl LevelInfo {
    pub fn new(price: Price, quantity: Quantity) -> Self {
        Self { price, quantity }
    }
}

impl From<(i32, u32)> for LevelInfo {
    fn from((price, quantity): (i32, u32)) -> Self {
        Self::new(Price::new(price), Quantity::new(quantity))
    }
}

/// Depth snapshot for both sides of the book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderbookLevelInfos {
    bids: Vec<LevelInfo>,
    asks: Vec<LevelInfo>,
}

impl OrderbookLevelInfos {
    /// Build a snapshot from best-first level sequences
    pub fn new(bids: Vec<LevelInfo>, asks: Vec<LevelInfo>) -> Self {
        Self { bids, asks }
    }

    /// Bid levels, highest price first
    pub fn bids(&self) -> &[LevelInfo] {
        &self.bids
    }

    /// Ask levels, lowest price first
    pub fn asks(&self) -> &[LevelInfo] {
        &self.asks
    }

    pub fn best_bid(&self) -> Option<&LevelInfo> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&LevelInfo> {
        self.asks.first()
    }

    /// Best ask minus best bid
    ///
    /// `None` when either side is empty or the difference overflows a `Price`.
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => ask.price.checked_sub(bid.price),
            _ => None,
        }
    }
}
