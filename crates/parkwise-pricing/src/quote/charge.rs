//! Charge amounts handed to the payment flow

use parkwise_common::QuoteError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Amount to collect for a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeAmount {
    /// Amount due in currency units, 2 decimal places
    pub amount_due: Decimal,
    /// Same amount in minor units for the payment provider
    pub amount_cents: u64,
}

impl ChargeAmount {
    pub fn from_cost(cost: u64) -> Self {
        let mut amount_due = Decimal::from(cost);
        amount_due.rescale(2);
        Self {
            amount_due,
            amount_cents: cost.saturating_mul(100),
        }
    }

    /// Payment intents need a strictly positive amount
    pub fn payable(self) -> Result<Self, QuoteError> {
        if self.amount_cents == 0 {
            return Err(QuoteError::NothingToCharge);
        }
        Ok(self)
    }
}
