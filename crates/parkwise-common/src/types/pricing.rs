//! Pricing Types
//!
//! The Parkwise pricing pipeline, in evaluation order:
//! - Base: months × 2000 + days × 100 + hours × 20
//! - Demand: 1.5 inside a commute peak, 1.0 otherwise
//! - Surge: 1 + sigmoid(slope × (occupancy − threshold)), to 2 decimals
//! - Subscriber: flat 20% off the compounded cost
//! - Loyalty: points redeemed 1:1, capped at 30% of the discounted cost
//!
//! Final cost is rounded to whole currency units.

use super::occupancy::OccupancySnapshot;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Requested stay. Units are billed independently, never converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDuration {
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub months: u32,
}

impl BookingDuration {
    pub fn new(hours: u32, days: u32, months: u32) -> Self {
        Self {
            hours,
            days,
            months,
        }
    }

    pub fn hours(hours: u32) -> Self {
        Self::new(hours, 0, 0)
    }

    pub fn days(days: u32) -> Self {
        Self::new(0, days, 0)
    }

    pub fn months(months: u32) -> Self {
        Self::new(0, 0, months)
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.days == 0 && self.months == 0
    }
}

/// Request for price calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    /// Requested stay
    pub duration: BookingDuration,

    /// Start instant; its offset defines the local hour used for demand
    pub start: DateTime<FixedOffset>,

    /// Lot occupancy at `start`
    pub occupancy: OccupancySnapshot,

    /// Whether the plate holds a subscription
    pub is_subscriber: bool,

    /// Redeemable loyalty balance, 1 point = 1 currency unit
    pub loyalty_points: f64,
}

impl PricingRequest {
    /// Create a new pricing request with no subscription and no points
    pub fn new(
        duration: BookingDuration,
        start: DateTime<FixedOffset>,
        occupancy: OccupancySnapshot,
    ) -> Self {
        Self {
            duration,
            start,
            occupancy,
            is_subscriber: false,
            loyalty_points: 0.0,
        }
    }

    /// Set subscriber status
    pub fn with_subscriber(mut self, is_subscriber: bool) -> Self {
        self.is_subscriber = is_subscriber;
        self
    }

    /// Set loyalty point balance
    pub fn with_loyalty_points(mut self, points: f64) -> Self {
        self.loyalty_points = points;
        self
    }
}

/// Intermediate values of one pricing evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    /// Sum of the duration components at the rate table
    pub base_cost: f64,

    /// Time-of-day factor (1.0 or the peak multiplier)
    pub demand_multiplier: f64,

    /// Occupancy surge factor, already rounded to 2 decimals
    pub occupancy_multiplier: f64,

    /// base × demand × surge
    pub subtotal: f64,

    /// Amount taken off by the subscriber discount
    pub subscriber_discount: f64,

    /// Amount covered by loyalty points
    pub loyalty_discount: f64,

    /// Amount due before the final rounding
    pub final_amount: f64,
}

/// Price calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Amount due in whole currency units
    pub cost: u64,

    /// How the cost was reached
    pub breakdown: PricingBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_is_zero() {
        assert!(BookingDuration::default().is_zero());
        assert!(!BookingDuration::hours(1).is_zero());
        assert!(!BookingDuration::new(0, 0, 1).is_zero());
    }

    #[test]
    fn test_duration_missing_units_default_to_zero() {
        let duration: BookingDuration = serde_json::from_str(r#"{"days":2}"#).unwrap();
        assert_eq!(duration, BookingDuration::days(2));
    }

    #[test]
    fn test_request_builder() {
        let start = DateTime::parse_from_rfc3339("2025-06-25T09:15:00+02:00").unwrap();
        let request = PricingRequest::new(BookingDuration::hours(3), start, OccupancySnapshot::empty())
            .with_subscriber(true)
            .with_loyalty_points(12.5);

        assert!(request.is_subscriber);
        assert_eq!(request.loyalty_points, 12.5);
        assert_eq!(request.occupancy.ratio(), 0.0);
    }
}
