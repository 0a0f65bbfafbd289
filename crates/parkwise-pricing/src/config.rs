//! Parkwise service configuration

use crate::pricing::{PricingConfig, PricingEngine};
use crate::quote::{Quote, Quoter, SubscriberRoster};
use chrono::FixedOffset;
use parkwise_common::{ParkwiseError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Quote service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service host
    pub host: String,
    /// Service port
    pub port: u16,
    /// Subscriber roster file, one plate per line
    pub roster_path: Option<String>,
    /// Lot wall clock as minutes east of UTC
    pub lot_utc_offset_minutes: i32,
    /// How long a quote stays valid
    pub quote_validity_ms: u64,
    /// Pricing tunables
    pub pricing: PricingConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8086,
            roster_path: None,
            lot_utc_offset_minutes: 0,
            quote_validity_ms: Quote::DEFAULT_VALIDITY_MS,
            pricing: PricingConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from `.env` and the environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply `PARKWISE_*` overrides on top of the defaults
    #[instrument(skip(lookup))]
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        // Platform PORT takes priority over PARKWISE_PORT
        if let Some(port) = parse_var(&lookup, "PORT").or_else(|| parse_var(&lookup, "PARKWISE_PORT")) {
            cfg.port = port;
        }
        if let Some(host) = lookup("PARKWISE_HOST") {
            cfg.host = host;
        }
        if let Some(path) = lookup("PARKWISE_ROSTER_PATH").filter(|p| !p.trim().is_empty()) {
            cfg.roster_path = Some(path);
        }
        if let Some(minutes) = parse_var(&lookup, "PARKWISE_LOT_UTC_OFFSET_MINUTES") {
            cfg.lot_utc_offset_minutes = minutes;
        }
        if let Some(ms) = parse_var(&lookup, "PARKWISE_QUOTE_VALIDITY_MS") {
            cfg.quote_validity_ms = ms;
        }

        // Pricing settings
        let pricing = &mut cfg.pricing;
        if let Some(v) = parse_var(&lookup, "PARKWISE_HOURLY_RATE") {
            pricing.hourly_rate = v;
        }
        if let Some(v) = parse_var(&lookup, "PARKWISE_DAILY_RATE") {
            pricing.daily_rate = v;
        }
        if let Some(v) = parse_var(&lookup, "PARKWISE_MONTHLY_RATE") {
            pricing.monthly_rate = v;
        }
        if let Some(v) = parse_var(&lookup, "PARKWISE_SURGE_THRESHOLD") {
            pricing.surge_threshold = v;
        }
        if let Some(v) = parse_var(&lookup, "PARKWISE_SURGE_SLOPE") {
            pricing.surge_slope = v;
        }
        if let Some(v) = parse_var(&lookup, "PARKWISE_PEAK_MULTIPLIER") {
            pricing.peak_multiplier = v;
        }
        if let Some(raw) = lookup("PARKWISE_PEAK_WINDOWS") {
            pricing.peak_windows = parse_peak_windows(&raw)?;
        }
        if let Some(v) = parse_var(&lookup, "PARKWISE_SUBSCRIBER_DISCOUNT") {
            pricing.subscriber_discount = v;
        }
        if let Some(v) = parse_var(&lookup, "PARKWISE_MAX_LOYALTY_DISCOUNT") {
            pricing.max_loyalty_discount = v;
        }

        cfg.pricing.validate()?;
        cfg.lot_offset()?;
        if !(1..=Quote::MAX_VALIDITY_MS).contains(&cfg.quote_validity_ms) {
            return Err(ParkwiseError::Config(format!(
                "quote validity must be within 1..={} ms, got {}",
                Quote::MAX_VALIDITY_MS,
                cfg.quote_validity_ms
            )));
        }
        Ok(cfg)
    }

    /// Lot UTC offset as a chrono offset
    pub fn lot_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.lot_utc_offset_minutes.saturating_mul(60)).ok_or_else(|| {
            ParkwiseError::Config(format!(
                "lot UTC offset out of range: {} minutes",
                self.lot_utc_offset_minutes
            ))
        })
    }

    /// Assemble a quoter, loading the roster file when one is configured
    pub fn build_quoter(&self) -> Result<Quoter> {
        let roster = match &self.roster_path {
            Some(path) => SubscriberRoster::load(Path::new(path))?,
            None => {
                info!("No subscriber roster configured");
                SubscriberRoster::new()
            }
        };

        Ok(Quoter::new(
            PricingEngine::new(self.pricing.clone()),
            Arc::new(roster),
            self.lot_offset()?,
        )
        .with_validity_ms(self.quote_validity_ms))
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable setting");
            None
        }
    }
}

/// Parse `"8-10,17-19"` into inclusive hour ranges
fn parse_peak_windows(raw: &str) -> Result<Vec<(u32, u32)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| -> Result<(u32, u32)> {
            let (from, to) = part
                .split_once('-')
                .ok_or_else(|| ParkwiseError::Config(format!("invalid peak window: {}", part)))?;
            let hour = |s: &str| {
                s.trim()
                    .parse::<u32>()
                    .map_err(|e| ParkwiseError::Config(format!("invalid peak window {}: {}", part, e)))
            };
            Ok((hour(from)?, hour(to)?))
        })
        .collect()
}
