use rust_decimal::prelude::*;

use crate::interfaces::Policy;
use crate::quote::{compute_quotes, Quote, QuoteError};
use crate::types::Price;

/// Quotes a fixed fractional distance below and above the mid-price.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SymmetricSpread {
    bid_spread: Decimal,
    ask_spread: Decimal,
}

impl SymmetricSpread {
    pub fn new(bid_spread: Decimal, ask_spread: Decimal) -> Self {
        Self {
            bid_spread,
            ask_spread,
        }
    }
}

impl Policy for SymmetricSpread {
    fn evaluate(&self, mid: Price) -> Result<Quote, QuoteError> {
        compute_quotes(mid, self.bid_spread, self.ask_spread)
    }
}
