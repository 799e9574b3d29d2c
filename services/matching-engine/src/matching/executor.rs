//! Trade execution logic
//!
//! Sizes a match between the two orders first in line and records both
//! legs of the resulting trade.

use types::order::Order;
use types::trade::{Trade, TradeInfo};

/// Build the trade for crossing `bid` against `ask`
///
/// The matched quantity is the smaller of the two remaining quantities.
/// Each leg is recorded at its own order's price; no clearing price is
/// imposed. The orders themselves are not mutated here.
pub fn cross(bid: &Order, ask: &Order) -> Trade {
    let quantity = bid.remaining_quantity().min(ask.remaining_quantity());

    Trade::new(
        TradeInfo {
            order_id: bid.order_id(),
            price: bid.price(),
            quantity,
        },
        TradeInfo {
            order_id: ask.order_id(),
            price: ask.price(),
            quantity,
        },
    )
}
