//! Quote module
//!
//! Boundary between raw booking input and the pricing engine:
//! - Input validation and the empty-lot occupancy policy
//! - Subscriber roster lookups by plate
//! - Booking windows for the booking flow
//! - Charge amounts for the payment flow

pub mod charge;
pub mod input;
pub mod quoter;
pub mod roster;
pub mod window;

pub use charge::ChargeAmount;
pub use input::{QuoteInput, QuoteValidator, ValidatedInput};
pub use quoter::{Quote, Quoter};
pub use roster::SubscriberRoster;
pub use window::BookingWindow;
