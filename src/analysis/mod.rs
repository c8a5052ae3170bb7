//! Option and strategy analysis
//!
//! Summaries of current value plus full sweep reports.

mod analyzer;
mod summary;

pub use analyzer::*;
pub use summary::*;
