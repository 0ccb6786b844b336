use rust_decimal::prelude::*;

use super::symbol::Symbol;
use super::values::{Amount, Price};
use crate::quote::{round_price, round_quantity, QuoteError};

/// Static trading rules of one market.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketRules {
    symbol: Symbol,
    tick_size: Decimal,
    step_size: Decimal,
    min_quantity: Amount,
}

impl MarketRules {
    pub fn new(symbol: Symbol, tick_size: Decimal, step_size: Decimal, min_quantity: Amount) -> Self {
        Self {
            symbol,
            tick_size,
            step_size,
            min_quantity,
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn min_quantity(&self) -> Amount {
        self.min_quantity
    }

    pub fn round_price(&self, price: Price) -> Result<Price, QuoteError> {
        round_price(price, self.tick_size)
    }

    pub fn round_quantity(&self, amount: Amount) -> Result<Amount, QuoteError> {
        round_quantity(amount, self.step_size)
    }
}
