//! Crossing detection logic
//!
//! Determines when a bid and ask can match based on price compatibility

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and ask can match at given prices
///
/// For a buy order to match with a sell order the buy price must be at
/// or above the sell price.
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming order can match against the best opposing price
///
/// Returns false when the opposing side is empty.
pub fn incoming_can_match(
    incoming_side: Side,
    incoming_price: Price,
    best_opposite: Option<Price>,
) -> bool {
    match (incoming_side, best_opposite) {
        (_, None) => false,
        (Side::Buy, Some(best_ask)) => can_match(incoming_price, best_ask),
        (Side::Sell, Some(best_bid)) => can_match(best_bid, incoming_price),
    }
}
