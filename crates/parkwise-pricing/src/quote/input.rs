//! Raw quote input and its validation
//!
//! The engine is only defined on non-negative durations, a positive lot
//! size, and a finite non-negative loyalty balance. Everything arriving
//! from a form or a lookup service is checked here first.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use parkwise_common::{BookingDuration, OccupancySnapshot, Plate, QuoteError};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Quote request as received from a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInput {
    /// Requested start, RFC 3339
    pub start: DateTime<FixedOffset>,
    #[serde(default)]
    pub hours: i64,
    #[serde(default)]
    pub days: i64,
    #[serde(default)]
    pub months: i64,
    /// Plate used for the roster lookup
    #[serde(default)]
    pub plate: Option<String>,
    /// Subscriber flag from the profile service, overrides the roster
    #[serde(default)]
    pub subscriber: Option<bool>,
    /// Occupied slots at `start`
    #[serde(default)]
    pub occupied: Option<i64>,
    /// Lot size
    #[serde(default)]
    pub total: Option<i64>,
    /// Redeemable loyalty balance
    #[serde(default)]
    pub loyalty_points: Option<f64>,
}

impl QuoteInput {
    pub fn new(start: DateTime<FixedOffset>) -> Self {
        Self {
            start,
            hours: 0,
            days: 0,
            months: 0,
            plate: None,
            subscriber: None,
            occupied: None,
            total: None,
            loyalty_points: None,
        }
    }

    pub fn with_duration(mut self, hours: i64, days: i64, months: i64) -> Self {
        self.hours = hours;
        self.days = days;
        self.months = months;
        self
    }

    pub fn with_plate(mut self, plate: impl Into<String>) -> Self {
        self.plate = Some(plate.into());
        self
    }

    pub fn with_subscriber(mut self, subscriber: bool) -> Self {
        self.subscriber = Some(subscriber);
        self
    }

    pub fn with_occupancy(mut self, occupied: i64, total: i64) -> Self {
        self.occupied = Some(occupied);
        self.total = Some(total);
        self
    }

    pub fn with_loyalty_points(mut self, points: f64) -> Self {
        self.loyalty_points = Some(points);
        self
    }
}

/// Input that passed validation, ready to be priced
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub duration: BookingDuration,
    /// Start re-expressed at the lot's UTC offset
    pub start: DateTime<FixedOffset>,
    pub occupancy: OccupancySnapshot,
    pub loyalty_points: f64,
    pub plate: Option<Plate>,
    pub subscriber: Option<bool>,
}

/// Checks raw input against the engine's input domain
#[derive(Debug, Clone, Copy)]
pub struct QuoteValidator {
    lot_offset: FixedOffset,
}

impl QuoteValidator {
    pub fn new(lot_offset: FixedOffset) -> Self {
        Self { lot_offset }
    }

    pub fn lot_offset(&self) -> FixedOffset {
        self.lot_offset
    }

    pub fn validate(&self, input: &QuoteInput) -> Result<ValidatedInput, QuoteError> {
        Ok(ValidatedInput {
            duration: Self::duration(input)?,
            start: input.start.with_timezone(&self.lot_offset),
            occupancy: Self::occupancy(input)?,
            loyalty_points: Self::loyalty_points(input)?,
            plate: Self::plate(input),
            subscriber: input.subscriber,
        })
    }

    fn duration(input: &QuoteInput) -> Result<BookingDuration, QuoteError> {
        Ok(BookingDuration {
            hours: duration_unit("hours", input.hours)?,
            days: duration_unit("days", input.days)?,
            months: duration_unit("months", input.months)?,
        })
    }

    fn occupancy(input: &QuoteInput) -> Result<OccupancySnapshot, QuoteError> {
        let occupied = count("occupied", input.occupied)?;
        let total = count("total", input.total)?;

        let snapshot = OccupancySnapshot::resolve(occupied, total);
        if total.unwrap_or(0) == 0 {
            warn!(?total, "No usable lot size, pricing as an empty lot");
        } else if occupied.unwrap_or(0) > snapshot.occupied() {
            warn!(?occupied, ?total, "Occupancy above lot size, clamping to full");
        }
        Ok(snapshot)
    }

    fn loyalty_points(input: &QuoteInput) -> Result<f64, QuoteError> {
        match input.loyalty_points {
            None => Ok(0.0),
            Some(points) if points.is_finite() && points >= 0.0 => Ok(points),
            Some(_) => Err(QuoteError::InvalidLoyaltyPoints),
        }
    }

    // A blank plate field means "no plate given"
    fn plate(input: &QuoteInput) -> Option<Plate> {
        input.plate.as_deref().and_then(|raw| Plate::parse(raw).ok())
    }
}

impl Default for QuoteValidator {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

fn duration_unit(unit: &'static str, value: i64) -> Result<u32, QuoteError> {
    if value < 0 {
        return Err(QuoteError::NegativeDuration { unit, value });
    }
    u32::try_from(value).map_err(|_| QuoteError::DurationOutOfRange { unit, value })
}

fn count(field: &'static str, value: Option<i64>) -> Result<Option<u64>, QuoteError> {
    match value {
        Some(v) if v < 0 => Err(QuoteError::NegativeOccupancy { field, value: v }),
        Some(v) => Ok(Some(v as u64)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-06-25T07:30:00+00:00").unwrap()
    }

    #[test]
    fn test_valid_input() {
        let input = QuoteInput::new(start())
            .with_duration(3, 1, 0)
            .with_occupancy(40, 100)
            .with_loyalty_points(15.0)
            .with_plate(" ab-12 ");

        let validated = QuoteValidator::default().validate(&input).unwrap();
        assert_eq!(validated.duration, BookingDuration::new(3, 1, 0));
        assert_eq!(validated.occupancy.ratio(), 0.4);
        assert_eq!(validated.loyalty_points, 15.0);
        assert_eq!(validated.plate, Some(Plate::parse("AB-12").unwrap()));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let input = QuoteInput::new(start()).with_duration(1, -2, 0);
        assert_eq!(
            QuoteValidator::default().validate(&input),
            Err(QuoteError::NegativeDuration {
                unit: "days",
                value: -2
            })
        );
    }

    #[test]
    fn test_oversized_duration_rejected() {
        let input = QuoteInput::new(start()).with_duration(i64::from(u32::MAX) + 1, 0, 0);
        assert!(matches!(
            QuoteValidator::default().validate(&input),
            Err(QuoteError::DurationOutOfRange { unit: "hours", .. })
        ));
    }

    #[test]
    fn test_zero_total_prices_as_empty_lot() {
        let input = QuoteInput::new(start()).with_duration(1, 0, 0).with_occupancy(5, 0);
        let validated = QuoteValidator::default().validate(&input).unwrap();
        assert_eq!(validated.occupancy.ratio(), 0.0);
    }

    #[test]
    fn test_negative_occupancy_rejected() {
        let input = QuoteInput::new(start()).with_occupancy(-1, 100);
        assert_eq!(
            QuoteValidator::default().validate(&input),
            Err(QuoteError::NegativeOccupancy {
                field: "occupied",
                value: -1
            })
        );
    }

    #[test]
    fn test_loyalty_points_must_be_finite() {
        for points in [-1.0, f64::NAN, f64::INFINITY] {
            let input = QuoteInput::new(start()).with_loyalty_points(points);
            assert_eq!(
                QuoteValidator::default().validate(&input),
                Err(QuoteError::InvalidLoyaltyPoints)
            );
        }
    }

    #[test]
    fn test_start_moves_to_lot_offset() {
        let lot = FixedOffset::east_opt(2 * 3600).unwrap();
        let validated = QuoteValidator::new(lot).validate(&QuoteInput::new(start())).unwrap();
        assert_eq!(validated.start.to_rfc3339(), "2025-06-25T09:30:00+02:00");
        assert_eq!(validated.start, start());
    }

    #[test]
    fn test_blank_plate_is_no_plate() {
        let input = QuoteInput::new(start()).with_plate("   ");
        assert_eq!(QuoteValidator::default().validate(&input).unwrap().plate, None);
    }

    #[test]
    fn test_deserialize_defaults() {
        let input: QuoteInput =
            serde_json::from_str(r#"{"start":"2025-06-25T07:30:00Z","hours":2}"#).unwrap();
        assert_eq!(input.hours, 2);
        assert_eq!(input.days, 0);
        assert!(input.total.is_none());
    }
}
