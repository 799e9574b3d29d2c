//! Order book core
//!
//! Coordinates the two sides of the book, the order registry and the
//! matching loop. Every operation runs to completion synchronously; callers
//! that share a book between threads must provide their own locking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use types::ids::OrderId;
use types::level::{LevelInfo, OrderbookLevelInfos};
use types::numeric::Price;
use types::order::{Order, OrderModify, OrderType, Side};
use types::trade::Trade;

use crate::book::{AskBook, BidBook, OrderHandle};
use crate::matching::{crossing, executor};

/// Configuration for an order book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderbookConfig {
    /// Expected number of resting orders; used to pre-size the arenas and
    /// the registry. Zero means no pre-allocation.
    pub expected_orders: usize,
}

/// Registry entry: where a resting order lives
#[derive(Debug, Clone, Copy)]
struct OrderEntry {
    side: Side,
    handle: OrderHandle,
}

/// Single-instrument limit order book with price-time priority matching
#[derive(Debug)]
pub struct Orderbook {
    bids: BidBook,
    asks: AskBook,
    /// Every resting order, by id
    orders: HashMap<OrderId, OrderEntry>,
}

impl Orderbook {
    /// Create an empty book with default configuration
    pub fn new() -> Self {
        Self::with_config(OrderbookConfig::default())
    }

    /// Create an empty book with the given configuration
    pub fn with_config(config: OrderbookConfig) -> Self {
        debug!(expected_orders = config.expected_orders, "Orderbook initialized");

        Self {
            bids: BidBook::with_capacity(config.expected_orders),
            asks: AskBook::with_capacity(config.expected_orders),
            orders: HashMap::with_capacity(config.expected_orders),
        }
    }

    /// Submit an order to the book
    ///
    /// The order rests at the back of its price level and the book is then
    /// matched until no cross remains. Returns the trades generated.
    ///
    /// Duplicate ids, zero-quantity orders and fill-and-kill orders with
    /// nothing to match against are ignored and produce no trades.
    pub fn add_order(&mut self, order: Order) -> Vec<Trade> {
        let order_id = order.order_id();

        if self.orders.contains_key(&order_id) {
            debug!(%order_id, "Ignoring order with duplicate id");
            return Vec::new();
        }

        if let Err(err) = order.validate() {
            warn!(%order_id, error = %err, "Rejecting order");
            return Vec::new();
        }

        if order.order_type() == OrderType::FillAndKill
            && !self.can_match(order.side(), order.price())
        {
            debug!(
                %order_id,
                price = %order.price(),
                "Discarding fill-and-kill order that cannot match"
            );
            return Vec::new();
        }

        let side = order.side();
        debug!(
            %order_id,
            %side,
            price = %order.price(),
            quantity = %order.remaining_quantity(),
            order_type = ?order.order_type(),
            "Adding order"
        );

        let handle = match side {
            Side::Buy => self.bids.insert(order),
            Side::Sell => self.asks.insert(order),
        };
        self.orders.insert(order_id, OrderEntry { side, handle });

        self.match_orders()
    }

    /// Cancel a resting order
    ///
    /// Unknown, filled and already cancelled ids are a no-op. Returns the
    /// cancelled order with its remaining quantity.
    pub fn cancel_order(&mut self, order_id: OrderId) -> Option<Order> {
        let entry = self.orders.remove(&order_id)?;

        let order = match entry.side {
            Side::Buy => self.bids.remove(entry.handle),
            Side::Sell => self.asks.remove(entry.handle),
        }?;

        debug!(
            %order_id,
            side = %entry.side,
            remaining = %order.remaining_quantity(),
            "Order cancelled"
        );
        Some(order)
    }

    /// Cancel a batch of orders, each exactly as `cancel_order` would
    pub fn cancel_orders<I>(&mut self, order_ids: I)
    where
        I: IntoIterator<Item = OrderId>,
    {
        for order_id in order_ids {
            self.cancel_order(order_id);
        }
    }

    /// Replace a resting order with new side, price and quantity
    ///
    /// The original order type is kept but time priority is not: the
    /// replacement joins the back of its level and may match immediately.
    /// Unknown ids are a no-op.
    pub fn modify_order(&mut self, modify: OrderModify) -> Vec<Trade> {
        let order_id = modify.order_id();
        let Some(order_type) = self.order(order_id).map(Order::order_type) else {
            debug!(%order_id, "Ignoring modify for unknown order");
            return Vec::new();
        };

        debug!(
            %order_id,
            side = %modify.side(),
            price = %modify.price(),
            quantity = %modify.quantity(),
            "Modifying order"
        );

        self.cancel_order(order_id);
        self.add_order(modify.to_order(order_type))
    }

    /// Check whether an order on `side` at `price` would cross the best
    /// opposing price
    pub fn can_match(&self, side: Side, price: Price) -> bool {
        let best_opposite = match side {
            Side::Buy => self.asks.best_ask_price(),
            Side::Sell => self.bids.best_bid_price(),
        };
        crossing::incoming_can_match(side, price, best_opposite)
    }

    /// Cross best bid against best ask until the book no longer crosses
    fn match_orders(&mut self) -> Vec<Trade> {
        let mut trades = Vec::new();

        while let (Some((bid_price, bid_handle)), Some((ask_price, ask_handle))) =
            (self.bids.best_front(), self.asks.best_front())
        {
            if !crossing::can_match(bid_price, ask_price) {
                break;
            }

            let trade = match (self.bids.order(bid_handle), self.asks.order(ask_handle)) {
                (Some(bid), Some(ask)) => executor::cross(bid, ask),
                _ => break,
            };
            let quantity = trade.quantity();

            if self.bids.fill(bid_handle, quantity) {
                self.bids.remove(bid_handle);
                self.orders.remove(&trade.bid().order_id);
            }
            if self.asks.fill(ask_handle, quantity) {
                self.asks.remove(ask_handle);
                self.orders.remove(&trade.ask().order_id);
            }

            trace!(
                bid_order_id = %trade.bid().order_id,
                bid_price = %trade.bid().price,
                ask_order_id = %trade.ask().order_id,
                ask_price = %trade.ask().price,
                %quantity,
                "Trade executed"
            );
            trades.push(trade);
        }

        self.kill_resting_fill_and_kill();
        trades
    }

    /// Cancel a fill-and-kill order left first in line at either best level
    ///
    /// Only the front order of each best level is inspected.
    fn kill_resting_fill_and_kill(&mut self) {
        let bid_front = self
            .bids
            .best_front()
            .and_then(|(_, handle)| self.bids.order(handle))
            .filter(|order| order.order_type() == OrderType::FillAndKill)
            .map(Order::order_id);
        let ask_front = self
            .asks
            .best_front()
            .and_then(|(_, handle)| self.asks.order(handle))
            .filter(|order| order.order_type() == OrderType::FillAndKill)
            .map(Order::order_id);

        for order_id in bid_front.into_iter().chain(ask_front) {
            debug!(%order_id, "Killing unfilled remainder of fill-and-kill order");
            self.cancel_order(order_id);
        }
    }

    /// Number of resting orders
    pub fn size(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.orders.contains_key(&order_id)
    }

    /// Look up a resting order
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        let entry = self.orders.get(&order_id)?;
        match entry.side {
            Side::Buy => self.bids.order(entry.handle),
            Side::Sell => self.asks.order(entry.handle),
        }
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_bid_price()
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_ask_price()
    }

    /// Number of distinct price levels on one side
    pub fn level_count(&self, side: Side) -> usize {
        match side {
            Side::Buy => self.bids.level_count(),
            Side::Sell => self.asks.level_count(),
        }
    }

    /// Aggregated depth of every level, recomputed from the resting orders
    pub fn order_infos(&self) -> OrderbookLevelInfos {
        OrderbookLevelInfos::new(self.bids.level_infos(), self.asks.level_infos())
    }

    /// Top `levels` price levels per side from the cached level aggregates
    pub fn depth(&self, levels: usize) -> OrderbookLevelInfos {
        OrderbookLevelInfos::new(
            self.bids.depth_snapshot(levels),
            self.asks.depth_snapshot(levels),
        )
    }

    /// Best-first levels of one side, recomputed from the resting orders
    pub fn side_levels(&self, side: Side) -> Vec<LevelInfo> {
        match side {
            Side::Buy => self.bids.level_infos(),
            Side::Sell => self.asks.level_infos(),
        }
    }
}

impl Default for Orderbook {
    fn default() -> Self {
        Self::new()
    }
}
