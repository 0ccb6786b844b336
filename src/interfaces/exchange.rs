use async_trait::async_trait;

use crate::error::ExchangeError;
use crate::types::{Balances, MarketRules, NewOrder, OrderConfirmation, Symbol, Ticker};

/// The slice of exchange functionality the bot depends on.
#[async_trait]
pub trait Exchange {
    async fn balances(&self) -> Result<Balances, ExchangeError>;

    async fn ticker(&self, symbol: &Symbol) -> Result<Ticker, ExchangeError>;

    async fn cancel_all_orders(&self, symbol: &Symbol) -> Result<(), ExchangeError>;

    async fn place_limit_order(&self, order: NewOrder) -> Result<OrderConfirmation, ExchangeError>;

    async fn ping(&self) -> Result<(), ExchangeError>;

    /// Trading rules of every listed market.
    async fn markets(&self) -> Result<Vec<MarketRules>, ExchangeError>;
}
