//! Binary-outcome quote translation
//!
//! A binary venue quotes the two complementary outcomes of one contract.
//! Buying `yes` at `p` is economically selling `no` at `complement - p`, so
//! a single-instrument book can hold both sides:
//! - `yes` levels rest as Buy orders at the quoted price
//! - `no` levels rest as Sell orders at `complement - price`
//!
//! Every level is validated before anything touches the book.

use std::collections::BTreeMap;
use std::fmt;

use matching_engine::Orderbook;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use types::ids::OrderId;
use types::level::{LevelInfo, OrderbookLevelInfos};
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderType, Side};
use types::trade::Trade;

/// Which outcome list a quote level came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSide {
    Yes,
    No,
}

impl QuoteSide {
    /// Book side the outcome rests on
    pub fn book_side(&self) -> Side {
        match self {
            QuoteSide::Yes => Side::Buy,
            QuoteSide::No => Side::Sell,
        }
    }
}

impl fmt::Display for QuoteSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteSide::Yes => write!(f, "yes"),
            QuoteSide::No => write!(f, "no"),
        }
    }
}

/// Errors raised while translating a quote.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error("quote response has no orderbook")]
    MissingOrderbook,

    #[error("{side} level price {price} outside 0..={max}")]
    PriceOutOfRange { side: QuoteSide, price: Price, max: Price },

    #[error("{side} level at price {price} has zero quantity")]
    ZeroQuantity { side: QuoteSide, price: Price },
}

/// One `[price, quantity]` entry of a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Price, Quantity)", into = "(Price, Quantity)")]
pub struct QuoteLevel {
    pub price: Price,
    pub quantity: Quantity,
}

impl QuoteLevel {
    pub fn new(price: Price, quantity: Quantity) -> Self {
        Self { price, quantity }
    }
}

impl From<(Price, Quantity)> for QuoteLevel {
    fn from((price, quantity): (Price, Quantity)) -> Self {
        Self::new(price, quantity)
    }
}

impl From<QuoteLevel> for (Price, Quantity) {
    fn from(level: QuoteLevel) -> Self {
        (level.price, level.quantity)
    }
}

impl From<(i32, u32)> for QuoteLevel {
    fn from((price, quantity): (i32, u32)) -> Self {
        Self::new(Price::new(price), Quantity::new(quantity))
    }
}

/// Both outcome lists of a binary contract, in venue order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryQuote {
    #[serde(default)]
    pub yes: Vec<QuoteLevel>,
    #[serde(default)]
    pub no: Vec<QuoteLevel>,
}

impl BinaryQuote {
    pub fn new(yes: Vec<QuoteLevel>, no: Vec<QuoteLevel>) -> Self {
        Self { yes, no }
    }

    /// Total number of levels across both outcomes
    pub fn level_count(&self) -> usize {
        self.yes.len() + self.no.len()
    }

    pub fn is_empty(&self) -> bool {
        self.yes.is_empty() && self.no.is_empty()
    }

    fn levels(&self) -> impl Iterator<Item = (QuoteSide, &QuoteLevel)> {
        self.yes
            .iter()
            .map(|level| (QuoteSide::Yes, level))
            .chain(self.no.iter().map(|level| (QuoteSide::No, level)))
    }
}

/// Top-level venue response envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub orderbook: Option<BinaryQuote>,
}

impl QuoteResponse {
    pub fn into_quote(self) -> Result<BinaryQuote, QuoteError> {
        self.orderbook.ok_or(QuoteError::MissingOrderbook)
    }
}

/// Configuration for quote translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Price of a full contract; `no` prices are mirrored against it.
    pub complement: Price,
    /// Id given to the first generated order.
    pub first_order_id: OrderId,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            complement: Price::new(100),
            first_order_id: OrderId::new(1),
        }
    }
}

/// Outcome of loading a quote into a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateSummary {
    pub orders_submitted: usize,
    pub trades: Vec<Trade>,
    pub book_size: usize,
}

impl PopulateSummary {
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }
}

/// Turns binary quotes into orders or depth snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteTranslator {
    config: QuoteConfig,
}

impl QuoteTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: QuoteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Price and side a level rests at once translated
    fn book_level(&self, side: QuoteSide, level: &QuoteLevel) -> Result<(Side, Price), QuoteError> {
        let max = self.config.complement;
        if level.price < Price::new(0) || level.price > max {
            return Err(QuoteError::PriceOutOfRange {
                side,
                price: level.price,
                max,
            });
        }
        if level.quantity.is_zero() {
            return Err(QuoteError::ZeroQuantity {
                side,
                price: level.price,
            });
        }

        let price = match side {
            QuoteSide::Yes => level.price,
            QuoteSide::No => max - level.price,
        };
        Ok((side.book_side(), price))
    }

    /// GoodTillCancel orders for every level, yes levels first.
    ///
    /// Ids increase by one from `first_order_id` in input order.
    pub fn to_orders(&self, quote: &BinaryQuote) -> Result<Vec<Order>, QuoteError> {
        let mut order_id = self.config.first_order_id;
        let mut orders = Vec::with_capacity(quote.level_count());

        for (side, level) in quote.levels() {
            let (book_side, price) = self.book_level(side, level)?;
            orders.push(Order::new(
                OrderType::GoodTillCancel,
                order_id,
                book_side,
                price,
                level.quantity,
            ));
            order_id = order_id.next();
        }

        Ok(orders)
    }

    /// Add every level of `quote` to `book`.
    ///
    /// The quote is validated in full first; on error the book is untouched.
    pub fn populate(
        &self,
        book: &mut Orderbook,
        quote: &BinaryQuote,
    ) -> Result<PopulateSummary, QuoteError> {
        let orders = self.to_orders(quote)?;
        let orders_submitted = orders.len();

        let mut trades = Vec::new();
        for order in orders {
            trades.extend(book.add_order(order));
        }

        info!(
            orders = orders_submitted,
            trades = trades.len(),
            book_size = book.size(),
            "Quote loaded into book"
        );

        Ok(PopulateSummary {
            orders_submitted,
            trades,
            book_size: book.size(),
        })
    }

    /// Depth snapshot straight from the quote, without matching.
    ///
    /// Levels landing on the same book price are merged. A quote whose yes
    /// and no sides overlap yields a crossed snapshot.
    pub fn to_level_infos(&self, quote: &BinaryQuote) -> Result<OrderbookLevelInfos, QuoteError> {
        let mut bids: BTreeMap<Price, Quantity> = BTreeMap::new();
        let mut asks: BTreeMap<Price, Quantity> = BTreeMap::new();

        for (side, level) in quote.levels() {
            let (book_side, price) = self.book_level(side, level)?;
            let levels = match book_side {
                Side::Buy => &mut bids,
                Side::Sell => &mut asks,
            };
            let total = levels.entry(price).or_insert_with(Quantity::zero);
            *total = total.saturating_add(level.quantity);
        }

        debug!(bids = bids.len(), asks = asks.len(), "Quote snapshot built");

        let to_infos = |(price, quantity): (Price, Quantity)| LevelInfo::new(price, quantity);
        Ok(OrderbookLevelInfos::new(
            bids.into_iter().rev().map(to_infos).collect(),
            asks.into_iter().map(to_infos).collect(),
        ))
    }
}
