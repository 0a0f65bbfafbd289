//! Dynamic pricing engine
//!
//! Pure, synchronous, and stateless between calls. Evaluation order:
//! 1. base cost from the rate table
//! 2. demand multiplier from the local hour of `start`
//! 3. occupancy surge multiplier, rounded to 2 decimals
//! 4. base × demand × surge
//! 5. subscriber discount
//! 6. loyalty discount, capped on the already discounted cost
//! 7. round to whole currency units
//!
//! Reordering steps 5 and 6 or dropping either rounding point changes
//! billed amounts.

use chrono::{DateTime, FixedOffset, Timelike};
use parkwise_common::{
    BookingDuration, ParkwiseError, PricingBreakdown, PricingRequest, PricingResult, Result,
    DAILY_RATE, DEFAULT_SURGE_SLOPE, DEFAULT_SURGE_THRESHOLD, HOURLY_RATE, MAX_LOYALTY_DISCOUNT,
    MONTHLY_RATE, PEAK_MULTIPLIER, PEAK_WINDOWS, SUBSCRIBER_DISCOUNT,
};
use serde::{Deserialize, Serialize};

/// Tunables of the pricing pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Price of one hour
    pub hourly_rate: f64,
    /// Price of one day
    pub daily_rate: f64,
    /// Price of one month
    pub monthly_rate: f64,
    /// Occupancy ratio at the centre of the surge curve
    pub surge_threshold: f64,
    /// Steepness of the surge curve
    pub surge_slope: f64,
    /// Demand multiplier inside a peak window
    pub peak_multiplier: f64,
    /// Inclusive local-hour ranges that count as peak
    pub peak_windows: Vec<(u32, u32)>,
    /// Subscriber discount rate (0.0 - 1.0)
    pub subscriber_discount: f64,
    /// Loyalty redemption cap as a share of the cost (0.0 - 1.0)
    pub max_loyalty_discount: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            hourly_rate: HOURLY_RATE,
            daily_rate: DAILY_RATE,
            monthly_rate: MONTHLY_RATE,
            surge_threshold: DEFAULT_SURGE_THRESHOLD,
            surge_slope: DEFAULT_SURGE_SLOPE,
            peak_multiplier: PEAK_MULTIPLIER,
            peak_windows: PEAK_WINDOWS.to_vec(),
            subscriber_discount: SUBSCRIBER_DISCOUNT,
            max_loyalty_discount: MAX_LOYALTY_DISCOUNT,
        }
    }
}

impl PricingConfig {
    /// Reject tunables that would break `cost >= 0` or the surge range
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("hourly_rate", self.hourly_rate),
            ("daily_rate", self.daily_rate),
            ("monthly_rate", self.monthly_rate),
        ];
        for (name, rate) in rates {
            if !rate.is_finite() || rate < 0.0 {
                return Err(ParkwiseError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, rate
                )));
            }
        }

        let shares = [
            ("surge_threshold", self.surge_threshold),
            ("subscriber_discount", self.subscriber_discount),
            ("max_loyalty_discount", self.max_loyalty_discount),
        ];
        for (name, share) in shares {
            if !(0.0..=1.0).contains(&share) {
                return Err(ParkwiseError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, share
                )));
            }
        }

        if !self.surge_slope.is_finite() || self.surge_slope <= 0.0 {
            return Err(ParkwiseError::Config(format!(
                "surge_slope must be positive, got {}",
                self.surge_slope
            )));
        }
        if !self.peak_multiplier.is_finite() || self.peak_multiplier < 1.0 {
            return Err(ParkwiseError::Config(format!(
                "peak_multiplier must be >= 1, got {}",
                self.peak_multiplier
            )));
        }
        if let Some((from, to)) = self
            .peak_windows
            .iter()
            .find(|(from, to)| from > to || *to > 23)
        {
            return Err(ParkwiseError::Config(format!(
                "invalid peak window {}-{}",
                from, to
            )));
        }

        Ok(())
    }
}

/// Parking pricing engine
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Base cost: every duration unit billed at its own rate
    pub fn base_cost(&self, duration: &BookingDuration) -> f64 {
        duration.months as f64 * self.config.monthly_rate
            + duration.days as f64 * self.config.daily_rate
            + duration.hours as f64 * self.config.hourly_rate
    }

    /// Demand multiplier from the hour of `start` in its own offset
    pub fn demand_multiplier(&self, start: &DateTime<FixedOffset>) -> f64 {
        let hour = start.hour();
        let in_peak = self
            .config
            .peak_windows
            .iter()
            .any(|&(from, to)| (from..=to).contains(&hour));

        if in_peak {
            self.config.peak_multiplier
        } else {
            1.0
        }
    }

    /// Surge multiplier in (1, 2), rounded to 2 decimals
    pub fn occupancy_multiplier(&self, ratio: f64) -> f64 {
        let x = self.config.surge_slope * (ratio - self.config.surge_threshold);
        round_to_cents(1.0 + sigmoid(x))
    }

    /// Loyalty redemption: points 1:1, at most `max_loyalty_discount` of `cost`
    pub fn loyalty_discount(&self, cost: f64, points: f64) -> f64 {
        (cost * self.config.max_loyalty_discount).min(points)
    }

    /// Run the full pipeline for one request
    pub fn calculate(&self, request: &PricingRequest) -> PricingResult {
        let base_cost = self.base_cost(&request.duration);
        let demand_multiplier = self.demand_multiplier(&request.start);
        let occupancy_multiplier = self.occupancy_multiplier(request.occupancy.ratio());

        let subtotal = base_cost * demand_multiplier * occupancy_multiplier;
        let mut cost = subtotal;

        let mut subscriber_discount = 0.0;
        if request.is_subscriber {
            let discounted = cost * (1.0 - self.config.subscriber_discount);
            subscriber_discount = cost - discounted;
            cost = discounted;
        }

        let loyalty_discount = self.loyalty_discount(cost, request.loyalty_points);
        cost -= loyalty_discount;

        PricingResult {
            cost: round_half_up(cost),
            breakdown: PricingBreakdown {
                base_cost,
                demand_multiplier,
                occupancy_multiplier,
                subtotal,
                subscriber_discount,
                loyalty_discount,
                final_amount: cost,
            },
        }
    }
}

/// Price a request with the default rate table and surge curve
pub fn compute_cost(request: &PricingRequest) -> PricingResult {
    PricingEngine::default().calculate(request)
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

// Matches rounding the exact binary value to 2 decimals, half up, then
// reading the decimal back; the surge term never lands on a tie.
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// Halves round towards +inf; `as` saturates negatives and NaN to 0.
fn round_half_up(value: f64) -> u64 {
    (value + 0.5).floor() as u64
}
