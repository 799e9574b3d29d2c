//! Market Data
//!
//! Translates binary-outcome venue quotes into order book input:
//! - `yes` levels become resting bids at the quoted price
//! - `no` levels become resting asks at the complement of the quoted price
//! - Direct depth snapshots without building a book
//!
//! Decoding the venue payload is left to the caller; every type here derives
//! `serde` so any format crate can produce a [`QuoteResponse`].

pub mod binary_quote;

pub use binary_quote::{
    BinaryQuote, PopulateSummary, QuoteConfig, QuoteError, QuoteLevel, QuoteResponse,
    QuoteTranslator,
};
