//! Core data types for BSM Options
//!
//! Defines fundamental types:
//! - OptionSpec: one option's contract and market inputs
//! - Greeks / PricingResult: evaluator output
//! - BsmError: crate-wide error taxonomy

pub mod error;
pub mod greeks;
pub mod option;

pub use error::*;
pub use greeks::*;
pub use option::*;
