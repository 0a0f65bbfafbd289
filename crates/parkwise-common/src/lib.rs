//! # Parkwise Common
//!
//! Shared types, the rate table, and errors for Parkwise parking pricing.
//!
//! ## Core Types
//!
//! - [`BookingDuration`]: requested stay split into hours, days, and months
//! - [`OccupancySnapshot`]: sanitized `{occupied, total}` reading for a lot
//! - [`Plate`]: normalized licence plate
//! - [`PricingRequest`]/[`PricingResult`]: pricing engine input and output
//!
//! ## Pricing Formula
//!
//! ```text
//! cost = round(loyalty(subscriber(base × demand × surge)))
//! ```

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ParkwiseError, QuoteError, Result};
pub use types::{
    occupancy::OccupancySnapshot,
    plate::Plate,
    pricing::{BookingDuration, PricingBreakdown, PricingRequest, PricingResult},
};

/// Parkwise version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Price of one hour, in currency units
pub const HOURLY_RATE: f64 = 20.0;

/// Price of one day, in currency units
pub const DAILY_RATE: f64 = 100.0;

/// Price of one month, in currency units
pub const MONTHLY_RATE: f64 = 2000.0;

/// Occupancy ratio at which the surge multiplier is exactly 1.5
pub const DEFAULT_SURGE_THRESHOLD: f64 = 0.4;

/// Steepness of the occupancy surge curve
pub const DEFAULT_SURGE_SLOPE: f64 = 10.0;

/// Demand multiplier inside a peak window
pub const PEAK_MULTIPLIER: f64 = 1.5;

/// Morning and evening commute peaks, inclusive local hours
pub const PEAK_WINDOWS: [(u32, u32); 2] = [(8, 10), (17, 19)];

/// Flat subscriber discount rate (20%)
pub const SUBSCRIBER_DISCOUNT: f64 = 0.20;

/// Maximum share of the cost that loyalty points may cover (30%)
pub const MAX_LOYALTY_DISCOUNT: f64 = 0.30;

/// Longest bookable stay in days
pub const MAX_BOOKING_DAYS: i64 = 2000;
