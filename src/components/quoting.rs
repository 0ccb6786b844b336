use log::*;
use std::fmt;

use crate::error::{CycleError, PlacementError};
use crate::interfaces::{Exchange, Policy};
use crate::markets::MarketBook;
use crate::quote::Quote;
use crate::types::{Amount, NewOrder, OrderConfirmation, Price, Side, Symbol};

/// Outcome of one side of a refresh.
#[derive(Debug)]
pub enum Placement {
    Placed(OrderConfirmation),
    Failed(PlacementError),
    /// Dry run, nothing was sent.
    Skipped,
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Placed(confirmation) => write!(f, "placed {confirmation}"),
            Self::Failed(e) => write!(f, "failed ({e})"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

#[derive(Debug)]
pub struct CycleReport {
    pub mid: Price,
    /// Rounded prices actually sent.
    pub quote: Quote,
    pub amount: Amount,
    pub bid: Placement,
    pub ask: Placement,
}

impl CycleReport {
    pub fn placed(&self) -> usize {
        [&self.bid, &self.ask]
            .iter()
            .filter(|p| p.is_placed())
            .count()
    }

    pub fn failed(&self) -> usize {
        [&self.bid, &self.ask]
            .iter()
            .filter(|p| p.is_failed())
            .count()
    }
}

/// One cancel-validate-quote-place pass over a single market.
///
/// Existing orders are cancelled before anything new is placed. The two
/// steps are not atomic: if placement fails afterwards the account is left
/// without open orders until the next pass.
pub struct QuotingCycle<'a, E, P> {
    exchange: &'a E,
    markets: &'a MarketBook,
    policy: &'a P,
    position_size: Amount,
    dry_run: bool,
}

impl<'a, E, P> QuotingCycle<'a, E, P>
where
    E: Exchange,
    P: Policy,
{
    pub fn new(exchange: &'a E, markets: &'a MarketBook, policy: &'a P, position_size: Amount) -> Self {
        Self {
            exchange,
            markets,
            policy,
            position_size,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self, symbol: &Symbol) -> Result<CycleReport, CycleError> {
        let ticker = self.exchange.ticker(symbol).await?;
        let mid = ticker.mid_price().ok_or_else(|| {
            CycleError::DataUnavailable(format!(
                "ticker for {symbol} has no positive last price or high/low: {ticker:?}"
            ))
        })?;

        if self.dry_run {
            info!("dry run: keeping open orders on {symbol}");
        } else {
            self.exchange.cancel_all_orders(symbol).await?;
            debug!("cancelled open orders on {symbol}");
        }

        let rules = self.markets.lookup(symbol)?;
        let amount = rules.round_quantity(self.position_size)?;
        // both the configured and the rounded size must clear the minimum
        for size in [self.position_size, amount] {
            if size <= Amount::ZERO || size < rules.min_quantity() {
                return Err(CycleError::Validation {
                    symbol: symbol.clone(),
                    size,
                    min: rules.min_quantity(),
                });
            }
        }

        let raw = self.policy.evaluate(mid)?;
        let quote = Quote::new(rules.round_price(raw.bid())?, rules.round_price(raw.ask())?);
        if !(quote.bid() < mid && mid < quote.ask()) {
            return Err(CycleError::CrossedQuote {
                symbol: symbol.clone(),
                mid,
                bid: quote.bid(),
                ask: quote.ask(),
            });
        }

        info!(
            "Placing new orders. Mid price: {}, Bid price: {}, Ask price: {}, Size: {}",
            mid,
            quote.bid(),
            quote.ask(),
            amount
        );

        let (bid, ask) = if self.dry_run {
            (Placement::Skipped, Placement::Skipped)
        } else {
            let bid = self.place(symbol, Side::Bid, quote.bid(), amount).await;
            let ask = self.place(symbol, Side::Ask, quote.ask(), amount).await;
            (bid, ask)
        };

        info!("Placed orders: bid {bid}, ask {ask}");

        Ok(CycleReport {
            mid,
            quote,
            amount,
            bid,
            ask,
        })
    }

    async fn place(&self, symbol: &Symbol, side: Side, price: Price, amount: Amount) -> Placement {
        let order = NewOrder::limit(symbol.clone(), side, price, amount);
        match self.exchange.place_limit_order(order).await {
            Ok(confirmation) => Placement::Placed(confirmation),
            Err(source) => {
                let e = PlacementError { side, source };
                error!("{e}");
                Placement::Failed(e)
            }
        }
    }
}
