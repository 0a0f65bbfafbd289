//! Pricing module
//!
//! Provides the dynamic pricing engine:
//! - Tiered base rates per hour, day, and month
//! - Time-of-day demand multiplier
//! - Continuous occupancy surge
//! - Subscriber and loyalty discounts

pub mod engine;

pub use engine::{compute_cost, PricingConfig, PricingEngine};
