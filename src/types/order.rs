use std::fmt;

use super::symbol::Symbol;
use super::values::{Amount, Price};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl ToString) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Ask,
    Bid,
}

impl Side {
    /// Name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ask => "Ask",
            Self::Bid => "Bid",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrderType {
    Limit,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "Limit",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewOrder {
    symbol: Symbol,
    order_type: OrderType,
    order_side: Side,
    price: Price,
    amount: Amount,
}

impl NewOrder {
    pub fn new(
        symbol: Symbol,
        order_type: OrderType,
        order_side: Side,
        price: Price,
        amount: Amount,
    ) -> Self {
        Self {
            symbol,
            order_type,
            order_side,
            price,
            amount,
        }
    }

    pub fn limit(symbol: Symbol, order_side: Side, price: Price, amount: Amount) -> Self {
        Self::new(symbol, OrderType::Limit, order_side, price, amount)
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn order_side(&self) -> Side {
        self.order_side
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// Exchange acknowledgement of an accepted order. The exchange owns order
/// identity, nothing is tracked client-side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderConfirmation {
    id: OrderId,
    status: String,
}

impl OrderConfirmation {
    pub fn new(id: OrderId, status: impl Into<String>) -> Self {
        Self {
            id,
            status: status.into(),
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

impl fmt::Display for OrderConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    #[test]
    fn test_side() {
        assert_eq!("Bid", Side::Bid.to_string());
        assert_eq!("Ask", Side::Ask.as_str());
    }

    #[test]
    fn test_new_order_limit() {
        let order = NewOrder::limit(Symbol::new("SOL_USDC"), Side::Bid, dec!(99.5), dec!(2));

        assert_eq!(OrderType::Limit, order.order_type());
        assert_eq!("Limit", order.order_type().as_str());
        assert_eq!(Side::Bid, order.order_side());
        assert_eq!(dec!(99.5), order.price());
        assert_eq!(dec!(2), order.amount());
        assert_eq!("SOL_USDC", order.symbol().as_str());
    }

    #[test]
    fn test_order_confirmation_string() {
        let confirmation = OrderConfirmation::new(OrderId::new(112233), "New");
        assert_eq!("112233 (New)", confirmation.to_string());
    }
}
