//! Core data types for Parkwise pricing

pub mod occupancy;
pub mod plate;
pub mod pricing;
