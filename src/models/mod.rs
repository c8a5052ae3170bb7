//! Pricing Models
//!
//! Implements:
//! - Black-Scholes-Merton (closed-form price and Greeks, normal distribution helpers)

pub mod black_scholes;

pub use black_scholes::*;
