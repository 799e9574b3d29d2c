//! Types library for the order book
//!
//! This library provides the value types shared by the matching engine,
//! the quote translation layer and the book driver.
//!
//! # Modules
//! - `ids`: Order identifier
//! - `numeric`: Integer tick types (Price, Quantity)
//! - `order`: Order, order modification and side/type enums
//! - `trade`: Trade fill records
//! - `level`: Aggregated depth snapshot types
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;
pub mod level;
pub mod errors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::trade::*;
    pub use crate::level::*;
    pub use crate::errors::*;
}
