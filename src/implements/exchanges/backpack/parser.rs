use rust_decimal::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::ExchangeError;
use crate::types::{Balance, Balances, OrderConfirmation, OrderId, Ticker};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTicker {
    last_price: Option<Decimal>,
    high: Option<Decimal>,
    low: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawBalance {
    available: Decimal,
    locked: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOrderId {
    Text(String),
    Number(u64),
}

#[derive(Debug, Deserialize)]
struct RawOrder {
    id: RawOrderId,
    status: Option<String>,
}

fn decode<'a, T>(raw: &'a Value, what: &str) -> Result<T, ExchangeError>
where
    T: Deserialize<'a>,
{
    T::deserialize(raw).map_err(|e| ExchangeError::Malformed(format!("{what}: {e}: {raw}")))
}

pub fn parse_ticker(raw: &Value) -> Result<Ticker, ExchangeError> {
    let ticker: RawTicker = decode(raw, "ticker")?;
    Ok(Ticker::new(ticker.last_price, ticker.high, ticker.low))
}

/// `{ "<asset>": { "available": "..", "locked": "..", "staked": ".." }, .. }`
pub fn parse_balances(raw: &Value) -> Result<Balances, ExchangeError> {
    let assets: HashMap<String, RawBalance> = decode(raw, "balances")?;
    Ok(Balances::new(assets.into_iter().map(|(asset, balance)| {
        (asset, Balance::new(balance.available, balance.locked))
    })))
}

pub fn parse_order_confirmation(raw: &Value) -> Result<OrderConfirmation, ExchangeError> {
    let order: RawOrder = decode(raw, "order response")?;
    let id = match order.id {
        RawOrderId::Text(id) => OrderId::new(id),
        RawOrderId::Number(id) => OrderId::new(id),
    };
    Ok(OrderConfirmation::new(
        id,
        order.status.unwrap_or_else(|| "Unknown".to_string()),
    ))
}
