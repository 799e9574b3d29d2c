//! Error types for order values
//!
//! Error taxonomy using thiserror

use thiserror::Error;

use crate::ids::OrderId;
use crate::numeric::Quantity;

/// Order-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Order {order_id} has zero quantity")]
    ZeroQuantity { order_id: OrderId },

    #[error("Order {order_id} has remaining quantity {remaining} above initial quantity {initial}")]
    RemainingExceedsInitial {
        order_id: OrderId,
        remaining: Quantity,
        initial: Quantity,
    },
}
