//! Lot occupancy readings
//!
//! A snapshot is only constructible in a state where `total > 0` and
//! `occupied <= total`, so the occupancy ratio is always defined in `[0, 1]`.

use crate::error::QuoteError;
use serde::{Deserialize, Serialize};

/// Occupied and total slot counts of a lot at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupancySnapshot {
    occupied: u64,
    total: u64,
}

impl OccupancySnapshot {
    /// Strict constructor: rejects an empty lot and over-capacity readings
    pub fn new(occupied: u64, total: u64) -> Result<Self, QuoteError> {
        if total == 0 || occupied > total {
            return Err(QuoteError::InvalidOccupancy { occupied, total });
        }
        Ok(Self { occupied, total })
    }

    /// Lenient policy for live lookups that may be missing or inconsistent.
    ///
    /// - missing or zero `total`: treated as a one-slot empty lot (ratio 0)
    /// - missing `occupied`: 0
    /// - `occupied > total`: clamped to `total`
    pub fn resolve(occupied: Option<u64>, total: Option<u64>) -> Self {
        match total {
            Some(total) if total > 0 => Self {
                occupied: occupied.unwrap_or(0).min(total),
                total,
            },
            _ => Self::empty(),
        }
    }

    /// One-slot lot with nothing parked
    pub fn empty() -> Self {
        Self {
            occupied: 0,
            total: 1,
        }
    }

    pub fn occupied(&self) -> u64 {
        self.occupied
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn free(&self) -> u64 {
        self.total - self.occupied
    }

    /// Occupancy ratio in `[0, 1]`
    pub fn ratio(&self) -> f64 {
        self.occupied as f64 / self.total as f64
    }
}

impl Default for OccupancySnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Deserialize)]
struct RawSnapshot {
    occupied: u64,
    total: u64,
}

impl<'de> Deserialize<'de> for OccupancySnapshot {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawSnapshot::deserialize(deserializer)?;
        OccupancySnapshot::new(raw.occupied, raw.total).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_rejects_empty_lot() {
        assert_eq!(
            OccupancySnapshot::new(0, 0),
            Err(QuoteError::InvalidOccupancy {
                occupied: 0,
                total: 0
            })
        );
        assert!(OccupancySnapshot::new(5, 4).is_err());
        assert!(OccupancySnapshot::new(4, 4).is_ok());
    }

    #[test]
    fn test_resolve_zero_total_is_ratio_zero() {
        let snapshot = OccupancySnapshot::resolve(Some(7), Some(0));
        assert_eq!(snapshot.ratio(), 0.0);
        assert_eq!(OccupancySnapshot::resolve(None, None), OccupancySnapshot::empty());
    }

    #[test]
    fn test_resolve_clamps_over_capacity() {
        let snapshot = OccupancySnapshot::resolve(Some(450), Some(400));
        assert_eq!(snapshot.occupied(), 400);
        assert_eq!(snapshot.free(), 0);
        assert_eq!(snapshot.ratio(), 1.0);
    }

    #[test]
    fn test_ratio() {
        let snapshot = OccupancySnapshot::new(40, 100).unwrap();
        assert_eq!(snapshot.ratio(), 0.4);
        assert_eq!(snapshot.free(), 60);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: OccupancySnapshot = serde_json::from_str(r#"{"occupied":3,"total":10}"#).unwrap();
        assert_eq!(ok.occupied(), 3);

        let err = serde_json::from_str::<OccupancySnapshot>(r#"{"occupied":3,"total":0}"#);
        assert!(err.is_err());
    }
}
