//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;

use slab::Slab;
use types::level::LevelInfo;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::{OrderHandle, OrderNode, PriceLevel};

/// Bid (buy) side order book
///
/// Orders are sorted by price descending, so the highest bid is first.
/// At each price level, orders are maintained in FIFO order. The book owns
/// every resting buy order through its arena.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    /// Price levels; BTreeMap iterates ascending, so the best bid is last
    levels: BTreeMap<Price, PriceLevel>,
    /// Resting orders addressed by stable handle
    orders: Slab<OrderNode>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bid book with room for `capacity` resting orders
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            levels: BTreeMap::new(),
            orders: Slab::with_capacity(capacity),
        }
    }

    /// Insert an order at the back of its price level
    pub fn insert(&mut self, order: Order) -> OrderHandle {
        let level = self.levels.entry(order.price()).or_default();
        level.push_back(&mut self.orders, order)
    }

    /// Remove a resting order by handle
    ///
    /// Empty price levels are dropped eagerly. Returns None if the handle
    /// does not refer to a resting order.
    pub fn remove(&mut self, handle: OrderHandle) -> Option<Order> {
        let price = self.orders.get(handle)?.order.price();
        let level = self.levels.get_mut(&price)?;
        let order = level.unlink(&mut self.orders, handle);

        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(order)
    }

    /// Fill a resting order, returning true if it is now completely filled
    pub fn fill(&mut self, handle: OrderHandle, quantity: Quantity) -> bool {
        let Some(price) = self.orders.get(handle).map(|node| node.order.price()) else {
            return false;
        };
        match self.levels.get_mut(&price) {
            Some(level) => level.fill(&mut self.orders, handle, quantity),
            None => false,
        }
    }

    /// Get a resting order by handle
    pub fn order(&self, handle: OrderHandle) -> Option<&Order> {
        self.orders.get(handle).map(|node| &node.order)
    }

    /// Get the best bid price
    pub fn best_bid_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Best bid price and the handle of the order first in line there
    pub fn best_front(&self) -> Option<(Price, OrderHandle)> {
        self.levels
            .iter()
            .next_back()
            .and_then(|(price, level)| level.front().map(|handle| (*price, handle)))
    }

    /// Aggregate every level from its orders, highest price first
    pub fn level_infos(&self) -> Vec<LevelInfo> {
        self.levels
            .iter()
            .rev()
            .map(|(price, level)| LevelInfo::new(*price, level.remaining_quantity(&self.orders)))
            .collect()
    }

    /// Get depth snapshot (top N price levels) from the cached aggregates
    pub fn depth_snapshot(&self, depth: usize) -> Vec<LevelInfo> {
        self.levels
            .iter()
            .rev() // Reverse to get highest prices first
            .take(depth)
            .map(|(price, level)| LevelInfo::new(*price, level.total_quantity()))
            .collect()
    }

    /// Check if the bid book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Get the total number of resting orders
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}
