//! In-memory exchange used by the unit tests.

use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::sync::Mutex;

use crate::error::ExchangeError;
use crate::interfaces::Exchange;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Balances,
    Ticker(Symbol),
    CancelAll(Symbol),
    Place(NewOrder),
    Ping,
    Markets,
}

pub struct MockExchange {
    pub ticker: Ticker,
    pub balances: Balances,
    pub markets: Vec<MarketRules>,
    pub cancel_fails: bool,
    pub failing_sides: Vec<Side>,
    calls: Mutex<Vec<Call>>,
}

impl MockExchange {
    pub fn new() -> Self {
        Self {
            ticker: Ticker::new(Some(dec!(7.2345)), Some(dec!(7.5)), Some(dec!(6.9))),
            balances: Balances::default(),
            markets: vec![render_rules()],
            cancel_fails: false,
            failing_sides: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn placed(&self) -> Vec<NewOrder> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Place(order) => Some(order),
                _ => None,
            })
            .collect()
    }

    pub fn cancel_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::CancelAll(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn render_rules() -> MarketRules {
    MarketRules::new(Symbol::new("RENDER_USDC"), dec!(0.001), dec!(0.1), dec!(0.1))
}

fn unavailable() -> ExchangeError {
    ExchangeError::Status {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

#[async_trait]
impl Exchange for MockExchange {
    async fn balances(&self) -> Result<Balances, ExchangeError> {
        self.record(Call::Balances);
        Ok(self.balances.clone())
    }

    async fn ticker(&self, symbol: &Symbol) -> Result<Ticker, ExchangeError> {
        self.record(Call::Ticker(symbol.clone()));
        Ok(self.ticker.clone())
    }

    async fn cancel_all_orders(&self, symbol: &Symbol) -> Result<(), ExchangeError> {
        self.record(Call::CancelAll(symbol.clone()));
        if self.cancel_fails {
            return Err(unavailable());
        }
        Ok(())
    }

    async fn place_limit_order(&self, order: NewOrder) -> Result<OrderConfirmation, ExchangeError> {
        let side = order.order_side();
        self.record(Call::Place(order));
        if self.failing_sides.contains(&side) {
            return Err(unavailable());
        }
        Ok(OrderConfirmation::new(
            OrderId::new(format!("{side}-{}", self.calls().len())),
            "New",
        ))
    }

    async fn ping(&self) -> Result<(), ExchangeError> {
        self.record(Call::Ping);
        Ok(())
    }

    async fn markets(&self) -> Result<Vec<MarketRules>, ExchangeError> {
        self.record(Call::Markets);
        Ok(self.markets.clone())
    }
}
