//! QuoteHub Core - price aggregation services and traits.
//!
//! This crate contains the aggregation and caching logic for the price
//! service. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod clock;
pub mod errors;
pub mod prices;

pub use clock::{Clock, ManualClock, SystemClock};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
