use rust_decimal::prelude::*;
use serde_json::Value;

pub type Price = Decimal;
pub type Amount = Decimal;

/// Reads a decimal that the exchange may send either as a string or as a
/// JSON number. `null` and anything unparsable yield `None`.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
