//! # Parkwise Pricing
//!
//! Dynamic pricing engine and quote boundary for Parkwise parking lots.
//!
//! ## Pricing Formula
//!
//! ```text
//! base     = months × 2000 + days × 100 + hours × 20
//! demand   = 1.5 for local hours 8-10 and 17-19, else 1.0
//! surge    = round2(1 + sigmoid(10 × (occupied / total − 0.4)))
//! cost     = base × demand × surge
//! cost    ×= 0.8                             (subscribers)
//! cost    −= min(cost × 0.3, loyalty_points)
//! charged  = round(cost)
//! ```
//!
//! The engine ([`pricing::PricingEngine`]) is pure and holds no state
//! between calls, so it can be shared freely across threads. Input
//! validation, the empty-lot policy, subscriber lookups, and charge
//! amounts live in [`quote`].

pub mod config;
pub mod pricing;
pub mod quote;

pub use config::ServiceConfig;
pub use pricing::{compute_cost, PricingConfig, PricingEngine};
pub use quote::{
    BookingWindow, ChargeAmount, Quote, QuoteInput, QuoteValidator, Quoter, SubscriberRoster,
};
