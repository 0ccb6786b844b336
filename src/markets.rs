use anyhow::{Context, Result};
use log::*;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

use crate::error::CycleError;
use crate::types::{decimal_from_value, MarketRules, Symbol};

/// Read-only set of market rules, loaded once at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarketBook {
    markets: Vec<MarketRules>,
}

impl MarketBook {
    pub fn new<I>(markets: I) -> Self
    where
        I: IntoIterator<Item = MarketRules>,
    {
        Self {
            markets: markets.into_iter().collect(),
        }
    }

    pub fn read_json<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let raw: Value = serde_json::from_reader(file)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        Ok(Self::new(parse_markets(&raw)?))
    }

    pub fn lookup(&self, symbol: &Symbol) -> Result<&MarketRules, CycleError> {
        self.markets
            .iter()
            .find(|market| market.symbol() == symbol)
            .ok_or_else(|| CycleError::SymbolNotFound(symbol.clone()))
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}

/// Parses the exchange's market listing:
///
/// ```json
/// [{ "symbol": "RENDER_USDC",
///    "filters": { "price": { "tickSize": "0.001" },
///                 "quantity": { "stepSize": "0.1", "minQuantity": "0.1" } } }]
/// ```
///
/// Entries lacking any of the rule fields are skipped.
pub fn parse_markets(raw: &Value) -> Result<Vec<MarketRules>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_value(raw.clone())?;

    let mut markets = Vec::with_capacity(entries.len());
    for entry in &entries {
        match parse_market(entry) {
            Some(rules) => markets.push(rules),
            None => warn!("skipping market entry without trading rules: {}", entry),
        }
    }
    Ok(markets)
}

fn parse_market(entry: &Value) -> Option<MarketRules> {
    let symbol = entry.get("symbol")?.as_str()?;
    let filters = entry.get("filters")?;
    let tick_size = decimal_from_value(filters.pointer("/price/tickSize")?)?;
    let step_size = decimal_from_value(filters.pointer("/quantity/stepSize")?)?;
    let min_quantity = decimal_from_value(filters.pointer("/quantity/minQuantity")?)?;

    Some(MarketRules::new(
        Symbol::new(symbol),
        tick_size,
        step_size,
        min_quantity,
    ))
}
