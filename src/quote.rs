//! Quote arithmetic: spread offsets around a mid-price and rounding to the
//! exchange's price/quantity increments.
//!
//! Values are rounded to the nearest multiple of the increment with ties
//! away from zero. For power-of-ten increments this equals rounding to the
//! increment's number of decimal places (tick `0.01` rounds `12.345` to
//! `12.35`), and for other increments such as `0.025` it still lands on a
//! valid multiple.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::types::{Amount, Price};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("{kind} increment must be positive, got {value}")]
    InvalidIncrement { kind: &'static str, value: Decimal },

    #[error("{kind} overflowed for {value}")]
    Overflow { kind: &'static str, value: Decimal },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Quote {
    bid: Price,
    ask: Price,
}

impl Quote {
    pub fn new(bid: Price, ask: Price) -> Self {
        Self { bid, ask }
    }

    pub fn bid(&self) -> Price {
        self.bid
    }

    pub fn ask(&self) -> Price {
        self.ask
    }
}

/// `bid = mid * (1 - bid_spread)`, `ask = mid * (1 + ask_spread)`.
pub fn compute_quotes(mid: Price, bid_spread: Decimal, ask_spread: Decimal) -> Result<Quote, QuoteError> {
    let scale = |factor: Option<Decimal>, kind| {
        factor
            .and_then(|f| mid.checked_mul(f))
            .ok_or(QuoteError::Overflow { kind, value: mid })
    };

    Ok(Quote {
        bid: scale(dec!(1).checked_sub(bid_spread), "bid price")?,
        ask: scale(dec!(1).checked_add(ask_spread), "ask price")?,
    })
}

pub fn round_price(value: Price, tick_size: Decimal) -> Result<Price, QuoteError> {
    round_to_increment(value, tick_size, "price tick")
}

pub fn round_quantity(value: Amount, step_size: Decimal) -> Result<Amount, QuoteError> {
    round_to_increment(value, step_size, "quantity step")
}

fn round_to_increment(
    value: Decimal,
    increment: Decimal,
    kind: &'static str,
) -> Result<Decimal, QuoteError> {
    if increment <= Decimal::ZERO {
        return Err(QuoteError::InvalidIncrement {
            kind,
            value: increment,
        });
    }

    let overflow = || QuoteError::Overflow { kind, value };
    let steps = value
        .checked_div(increment)
        .ok_or_else(overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Ok(steps.checked_mul(increment).ok_or_else(overflow)?.normalize())
}
