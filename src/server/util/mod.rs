//! Utility functions and helpers for server operations.
//!
//! Great-circle distance and travel estimates used when the map provider is unavailable, and
//! monetary rounding shared by pricing and settlement.

pub mod geo;
pub mod money;

