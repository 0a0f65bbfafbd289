//! Quote assembly
//!
//! Validates raw input, resolves subscriber status, runs the pricing
//! engine, and wraps the result with a charge amount and an expiry.

use super::charge::ChargeAmount;
use super::input::{QuoteInput, QuoteValidator, ValidatedInput};
use super::roster::SubscriberRoster;
use super::window::BookingWindow;
use crate::pricing::PricingEngine;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use parkwise_common::{ParkwiseError, Plate, PricingBreakdown, PricingRequest, QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Priced quote returned to the booking and estimation flows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub quote_id: Uuid,
    /// Amount due in whole currency units
    pub cost: u64,
    pub charge: ChargeAmount,
    pub breakdown: PricingBreakdown,
    pub subscriber: bool,
    pub plate: Option<Plate>,
    /// Present on booking quotes only
    pub window: Option<BookingWindow>,
    pub computed_at: DateTime<Utc>,
    pub valid_for_ms: u64,
    pub expires_at: DateTime<Utc>,
}

impl Quote {
    /// Default quote validity period (5 minutes)
    pub const DEFAULT_VALIDITY_MS: u64 = 5 * 60 * 1000;

    /// Longest accepted validity period (24 hours)
    pub const MAX_VALIDITY_MS: u64 = 24 * 60 * 60 * 1000;

    /// Occupancy moves, so a quote is only honoured until `expires_at`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Builds quotes on top of a [`PricingEngine`]
#[derive(Debug, Clone)]
pub struct Quoter {
    engine: PricingEngine,
    roster: Arc<SubscriberRoster>,
    validator: QuoteValidator,
    valid_for_ms: u64,
}

impl Quoter {
    pub fn new(engine: PricingEngine, roster: Arc<SubscriberRoster>, lot_offset: FixedOffset) -> Self {
        Self {
            engine,
            roster,
            validator: QuoteValidator::new(lot_offset),
            valid_for_ms: Quote::DEFAULT_VALIDITY_MS,
        }
    }

    /// Set quote validity period, clamped to `1..=Quote::MAX_VALIDITY_MS`
    pub fn with_validity_ms(mut self, valid_for_ms: u64) -> Self {
        self.valid_for_ms = valid_for_ms.clamp(1, Quote::MAX_VALIDITY_MS);
        self
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    pub fn roster(&self) -> &SubscriberRoster {
        &self.roster
    }

    /// Cost estimate: any start, zero durations allowed
    #[instrument(skip(self, input), fields(start = %input.start))]
    pub fn estimate(&self, input: &QuoteInput, now: DateTime<Utc>) -> Result<Quote> {
        let validated = self.validator.validate(input)?;
        let quote = self.price(validated, None, now)?;
        info!(quote_id = %quote.quote_id, cost = quote.cost, "Estimated parking cost");
        Ok(quote)
    }

    /// Booking quote: needs a plate, a future start, and a payable amount
    #[instrument(skip(self, input), fields(start = %input.start))]
    pub fn booking_quote(&self, input: &QuoteInput, now: DateTime<Utc>) -> Result<Quote> {
        let validated = self.validator.validate(input)?;
        if validated.plate.is_none() {
            return Err(QuoteError::MissingPlate.into());
        }

        let window = BookingWindow::new(validated.start, &validated.duration)?;
        window.ensure_starts_after(now)?;

        let quote = self.price(validated, Some(window), now)?;
        quote.charge.payable()?;

        info!(
            quote_id = %quote.quote_id,
            cost = quote.cost,
            ends_at = %window.end,
            "Quoted booking"
        );
        Ok(quote)
    }

    fn price(&self, validated: ValidatedInput, window: Option<BookingWindow>, now: DateTime<Utc>) -> Result<Quote> {
        let expires_at = i64::try_from(self.valid_for_ms)
            .ok()
            .and_then(Duration::try_milliseconds)
            .and_then(|validity| now.checked_add_signed(validity))
            .ok_or_else(|| {
                ParkwiseError::Config(format!("quote validity out of range: {} ms", self.valid_for_ms))
            })?;
        let subscriber = self.is_subscriber(&validated);

        let request = PricingRequest::new(validated.duration, validated.start, validated.occupancy)
            .with_subscriber(subscriber)
            .with_loyalty_points(validated.loyalty_points);
        let result = self.engine.calculate(&request);
        debug!(breakdown = ?result.breakdown, "Pricing breakdown");

        Ok(Quote {
            quote_id: Uuid::now_v7(),
            cost: result.cost,
            charge: ChargeAmount::from_cost(result.cost),
            breakdown: result.breakdown,
            subscriber,
            plate: validated.plate,
            window,
            computed_at: now,
            valid_for_ms: self.valid_for_ms,
            expires_at,
        })
    }

    // An explicit flag from the profile service wins over the roster
    fn is_subscriber(&self, validated: &ValidatedInput) -> bool {
        validated.subscriber.unwrap_or_else(|| {
            validated
                .plate
                .as_ref()
                .is_some_and(|plate| self.roster.contains(plate))
        })
    }
}

impl Default for Quoter {
    fn default() -> Self {
        Self {
            engine: PricingEngine::default(),
            roster: Arc::new(SubscriberRoster::new()),
            validator: QuoteValidator::default(),
            valid_for_ms: Quote::DEFAULT_VALIDITY_MS,
        }
    }
}
