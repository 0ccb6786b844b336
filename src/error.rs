use thiserror::Error;

use crate::quote::QuoteError;
use crate::types::{Amount, Price, Side, Symbol};

/// Failures talking to the exchange.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Invalid or missing startup settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),

    #[error("invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("cannot load env file: {0}")]
    EnvFile(dotenvy::Error),
}

/// Reasons a single quoting or valuation pass stops early. None of these
/// stop the polling loop.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("configuration error: {0}")]
    Configuration(#[from] QuoteError),

    #[error("{0} not found in the market data")]
    SymbolNotFound(Symbol),

    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    #[error("position size {size} is less than the minimum quantity {min} for {symbol}")]
    Validation {
        symbol: Symbol,
        size: Amount,
        min: Amount,
    },

    #[error("rounded quote {bid}/{ask} does not bracket mid {mid} for {symbol}")]
    CrossedQuote {
        symbol: Symbol,
        mid: Price,
        bid: Price,
        ask: Price,
    },

    #[error("transport error: {0}")]
    Transport(#[from] ExchangeError),
}

/// One side of the quote could not be placed.
#[derive(Debug, Error)]
#[error("error placing {side} order: {source}")]
pub struct PlacementError {
    pub side: Side,
    #[source]
    pub source: ExchangeError,
}
