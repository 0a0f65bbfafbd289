//! Booking window: the `[start, end)` interval a booking occupies

use chrono::{DateTime, Duration, FixedOffset, Months, Utc};
use parkwise_common::{BookingDuration, QuoteError, MAX_BOOKING_DAYS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl BookingWindow {
    /// Months are calendar months; the day is clamped to the target
    /// month's length (Jan 31 + 1 month = Feb 28/29). Days and hours are
    /// added afterwards.
    pub fn new(start: DateTime<FixedOffset>, duration: &BookingDuration) -> Result<Self, QuoteError> {
        if duration.is_zero() {
            return Err(QuoteError::ZeroDuration);
        }

        let too_long = QuoteError::DurationExceedsMaximum {
            max_days: MAX_BOOKING_DAYS,
        };

        let end = start
            .checked_add_months(Months::new(duration.months))
            .and_then(|mid| mid.checked_add_signed(Duration::days(i64::from(duration.days))))
            .and_then(|mid| mid.checked_add_signed(Duration::hours(i64::from(duration.hours))))
            .ok_or_else(|| too_long.clone())?;

        if end - start > Duration::days(MAX_BOOKING_DAYS) {
            return Err(too_long);
        }

        Ok(Self { start, end })
    }

    /// Bookings must start strictly after `now`
    pub fn ensure_starts_after(&self, now: DateTime<Utc>) -> Result<(), QuoteError> {
        if self.start <= now {
            return Err(QuoteError::StartNotInFuture);
        }
        Ok(())
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// Whether `at` falls inside `[start, end)`
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_hours_and_days() {
        let window = BookingWindow::new(ts("2025-06-25T09:00:00+00:00"), &BookingDuration::new(3, 2, 0)).unwrap();
        assert_eq!(window.end, ts("2025-06-27T12:00:00+00:00"));
        assert_eq!(window.length(), Duration::hours(51));
    }

    #[test]
    fn test_month_end_clamps() {
        let window = BookingWindow::new(ts("2025-01-31T10:00:00+00:00"), &BookingDuration::months(1)).unwrap();
        assert_eq!(window.end, ts("2025-02-28T10:00:00+00:00"));

        let leap = BookingWindow::new(ts("2024-01-31T10:00:00+00:00"), &BookingDuration::new(1, 1, 1)).unwrap();
        assert_eq!(leap.end, ts("2024-03-01T11:00:00+00:00"));
    }

    #[test]
    fn test_zero_duration_rejected() {
        assert_eq!(
            BookingWindow::new(ts("2025-06-25T09:00:00+00:00"), &BookingDuration::default()),
            Err(QuoteError::ZeroDuration)
        );
    }

    #[test]
    fn test_maximum_length() {
        let start = ts("2025-06-25T09:00:00+00:00");
        assert!(BookingWindow::new(start, &BookingDuration::days(2000)).is_ok());
        assert_eq!(
            BookingWindow::new(start, &BookingDuration::new(1, 2000, 0)),
            Err(QuoteError::DurationExceedsMaximum { max_days: 2000 })
        );
        assert!(BookingWindow::new(start, &BookingDuration::months(120)).is_err());
    }

    #[test]
    fn test_starts_after() {
        let window = BookingWindow::new(ts("2025-06-25T09:00:00+00:00"), &BookingDuration::hours(1)).unwrap();
        let before = ts("2025-06-25T08:59:59+00:00").with_timezone(&Utc);
        let at = ts("2025-06-25T09:00:00+00:00").with_timezone(&Utc);

        assert!(window.ensure_starts_after(before).is_ok());
        assert_eq!(window.ensure_starts_after(at), Err(QuoteError::StartNotInFuture));
        assert!(window.contains(at));
        assert!(!window.contains(ts("2025-06-25T10:00:00+00:00").with_timezone(&Utc)));
    }
}
