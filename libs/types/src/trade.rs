//! Trade execution types
//!
//! A trade records both legs of one match event. Each leg carries the price
//! of its own order rather than a single clearing price.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// One side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeInfo {
    pub order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}

/// A match between a buy order and a sell order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trade {
    bid: TradeInfo,
    ask: TradeInfo,
}

impl Trade {
    pub fn new(bid: TradeInfo, ask: TradeInfo) -> Self {
        Self { bid, ask }
    }

    /// Buy-side fill
    pub fn bid(&self) -> &TradeInfo {
        &self.bid
    }

    /// Sell-side fill
    pub fn ask(&self) -> &TradeInfo {
        &self.ask
    }

    /// Matched quantity (identical on both legs)
    pub fn quantity(&self) -> Quantity {
        self.bid.quantity
    }
}
