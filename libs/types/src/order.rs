//! Order types
//!
//! An `Order` owns its own fill state: the remaining quantity only ever
//! decreases, and only through `fill`.

use crate::errors::OrderError;
use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// How long an order may stay on the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Rests until filled or explicitly cancelled
    GoodTillCancel,
    /// Matches immediately against the book, any remainder is discarded
    FillAndKill,
}

/// A limit order
///
/// Decoding rejects a remaining quantity above the initial quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderRecord")]
pub struct Order {
    order_id: OrderId,
    order_type: OrderType,
    side: Side,
    price: Price,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

impl Order {
    /// Create a new unfilled order
    pub fn new(
        order_type: OrderType,
        order_id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            order_id,
            order_type,
            side,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity.saturating_sub(self.remaining_quantity)
    }

    /// Check if order is completely filled
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity.is_zero()
    }

    /// Reject orders that could never rest on a book
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.remaining_quantity > self.initial_quantity {
            return Err(OrderError::RemainingExceedsInitial {
                order_id: self.order_id,
                remaining: self.remaining_quantity,
                initial: self.initial_quantity,
            });
        }
        if self.remaining_quantity.is_zero() {
            return Err(OrderError::ZeroQuantity { order_id: self.order_id });
        }
        Ok(())
    }

    /// Apply a fill of `quantity` to this order
    ///
    /// # Panics
    /// Panics if the fill would exceed the remaining quantity
    pub fn fill(&mut self, quantity: Quantity) {
        self.remaining_quantity = self
            .remaining_quantity
            .checked_sub(quantity)
            .unwrap_or_else(|| {
                panic!(
                    "Order ({}) cannot be filled for more than its remaining quantity",
                    self.order_id
                )
            });
    }
}

/// Wire shape of an `Order`, checked before it becomes one
#[derive(Deserialize)]
struct OrderRecord {
    order_id: OrderId,
    order_type: OrderType,
    side: Side,
    price: Price,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

impl TryFrom<OrderRecord> for Order {
    type Error = OrderError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        if record.remaining_quantity > record.initial_quantity {
            return Err(OrderError::RemainingExceedsInitial {
                order_id: record.order_id,
                remaining: record.remaining_quantity,
                initial: record.initial_quantity,
            });
        }
        Ok(Self {
            order_id: record.order_id,
            order_type: record.order_type,
            side: record.side,
            price: record.price,
            initial_quantity: record.initial_quantity,
            remaining_quantity: record.remaining_quantity,
        })
    }
}

/// Cancel-and-replace request for a resting order
///
/// The replacement keeps the original order type, which is only known to
/// the book, so it is supplied when converting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderModify {
    order_id: OrderId,
    side: Side,
    price: Price,
    quantity: Quantity,
}

impl OrderModify {
    pub fn new(order_id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Build the replacement order
    pub fn to_order(&self, order_type: OrderType) -> Order {
        Order::new(order_type, self.order_id, self.side, self.price, self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gtc_buy(qty: u32) -> Order {
        Order::new(
            OrderType::GoodTillCancel,
            OrderId::new(1),
            Side::Buy,
            Price::new(100),
            Quantity::new(qty),
        )
    }

    fn record(initial: u32, remaining: u32) -> serde_json::Value {
        serde_json::json!({
            "order_id": 1,
            "order_type": "GOOD_TILL_CANCEL",
            "side": "buy",
            "price": 100,
            "initial_quantity": initial,
            "remaining_quantity": remaining,
        })
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_order_creation() {
        let order = gtc_buy(10);

        assert_eq!(order.initial_quantity(), Quantity::new(10));
        assert_eq!(order.remaining_quantity(), Quantity::new(10));
        assert_eq!(order.filled_quantity(), Quantity::zero());
        assert!(!order.is_filled());
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_order_fill() {
        let mut order = gtc_buy(10);

        // Partial fill
        order.fill(Quantity::new(3));
        assert_eq!(order.remaining_quantity(), Quantity::new(7));
        assert_eq!(order.filled_quantity(), Quantity::new(3));
        assert!(!order.is_filled());

        // Complete fill
        order.fill(Quantity::new(7));
        assert!(order.is_filled());
    }

    #[test]
    #[should_panic(expected = "cannot be filled for more than its remaining quantity")]
    fn test_order_overfill_panics() {
        let mut order = gtc_buy(10);
        order.fill(Quantity::new(11));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let order = gtc_buy(0);
        assert_eq!(
            order.validate(),
            Err(OrderError::ZeroQuantity { order_id: OrderId::new(1) })
        );
    }

    #[test]
    fn test_filled_order_rejected() {
        let mut order = gtc_buy(10);
        order.fill(Quantity::new(10));
        assert_eq!(
            order.validate(),
            Err(OrderError::ZeroQuantity { order_id: OrderId::new(1) })
        );
    }

    #[test]
    fn test_decode_rejects_remaining_above_initial() {
        let json = record(10, 11);
        let err = serde_json::from_value::<Order>(json).unwrap_err();
        assert!(err.to_string().contains("remaining quantity 11 above initial quantity 10"));
    }

    #[test]
    fn test_decoded_filled_order_fails_validation() {
        let json = record(10, 0);
        let order: Order = serde_json::from_value(json).unwrap();
        assert!(order.is_filled());
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_modify_preserves_supplied_type() {
        let modify =
            OrderModify::new(OrderId::new(5), Side::Sell, Price::new(42), Quantity::new(3));
        let order = modify.to_order(OrderType::FillAndKill);

        assert_eq!(order.order_id(), OrderId::new(5));
        assert_eq!(order.order_type(), OrderType::FillAndKill);
        assert_eq!(order.side(), Side::Sell);
        assert_eq!(order.price(), Price::new(42));
        assert_eq!(order.remaining_quantity(), Quantity::new(3));
    }

    #[test]
    fn test_order_serialization() {
        let order = gtc_buy(4);
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"GOOD_TILL_CANCEL\""));
        assert!(json.contains("\"buy\""));

        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }

    proptest! {
        #[test]
        fn prop_fills_never_exceed_initial(
            qty in 1u32..10_000,
            fills in prop::collection::vec(1u32..500, 0..40),
        ) {
            let mut order = gtc_buy(qty);
            for fill in fills {
                let quantity = Quantity::new(fill).min(order.remaining_quantity());
                order.fill(quantity);
                prop_assert!(order.remaining_quantity() <= order.initial_quantity());
                prop_assert_eq!(
                    order.filled_quantity() + order.remaining_quantity(),
                    order.initial_quantity()
                );
            }
        }
    }
}
