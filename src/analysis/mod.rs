//! Analysis modules.
//!
//! Pure computations over the portal's records.

pub mod aggregator;

pub use aggregator::*;
