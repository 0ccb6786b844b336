use anyhow::Result;
use log::*;
use std::thread;

use tokio::runtime::Runtime;

use crate::components::{valuation, CycleReport, QuotingCycle, Valuation};
use crate::config::{Config, Mode};
use crate::error::CycleError;
use crate::interfaces::{Exchange, Policy};
use crate::markets::MarketBook;

#[derive(Debug)]
pub enum Outcome {
    Quoted(CycleReport),
    Valued(Valuation),
}

/// Polling driver: runs the configured operation, sleeps for the refresh
/// interval, and repeats until the process is stopped. Every operation runs
/// to completion before the next one starts.
pub struct Bot<E, P> {
    config: Config,
    exchange: E,
    markets: MarketBook,
    policy: P,
    rt: Runtime,
}

impl<E, P> Bot<E, P>
where
    E: Exchange,
    P: Policy,
{
    /// Checks connectivity and loads the market rules, from `markets_file`
    /// when it exists and from the exchange otherwise.
    pub fn new(config: Config, exchange: E, policy: P) -> Result<Self> {
        let rt = Runtime::new()?;

        if let Err(e) = rt.block_on(exchange.ping()) {
            warn!("exchange ping failed: {e}");
        }

        let markets = if config.markets_file.exists() {
            info!("Loading market rules from {}", config.markets_file.display());
            MarketBook::read_json(&config.markets_file)?
        } else {
            info!(
                "{} not found, fetching market rules from the exchange",
                config.markets_file.display()
            );
            MarketBook::new(rt.block_on(exchange.markets())?)
        };
        info!("Loaded rules for {} markets", markets.len());

        Ok(Self::with_markets(config, exchange, markets, policy, rt))
    }

    pub fn with_markets(config: Config, exchange: E, markets: MarketBook, policy: P, rt: Runtime) -> Self {
        Self {
            config,
            exchange,
            markets,
            policy,
            rt,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn markets(&self) -> &MarketBook {
        &self.markets
    }

    pub fn run(&mut self) -> Result<()> {
        info!("Start running!");
        info!("\n{:#?}", self.config);

        for i in 0u64.. {
            debug!("iteration[{i}] {:?}", self.config.mode);
            // errors are logged by `step` and never end the loop
            let _ = self.step();
            thread::sleep(self.config.refresh_interval);
        }

        Ok(())
    }

    /// Runs the configured operation once.
    pub fn step(&self) -> Result<Outcome, CycleError> {
        let symbol = &self.config.symbol;

        let outcome = match self.config.mode {
            Mode::Quote => {
                let cycle = QuotingCycle::new(
                    &self.exchange,
                    &self.markets,
                    &self.policy,
                    self.config.position_size,
                )
                .dry_run(self.config.dry_run);
                self.rt.block_on(cycle.run(symbol)).map(Outcome::Quoted)
            }
            Mode::Report => self
                .rt
                .block_on(valuation::report(&self.exchange, symbol))
                .map(Outcome::Valued),
        };

        if let Err(e) = &outcome {
            error!("Error: {e}");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::path::PathBuf;

    use crate::strategies::spread::SymmetricSpread;
    use crate::testing::{render_rules, Call, MockExchange};
    use crate::types::{Balance, Balances, Side, Symbol, Ticker};

    fn config(mode: &str) -> Config {
        let mut env: HashMap<&str, String> = HashMap::new();
        env.insert("API_KEY", "public".to_string());
        env.insert("API_SECRET", BASE64.encode([3u8; 32]));
        env.insert("BOT_MODE", mode.to_string());
        env.insert("MARKETS_FILE", "/nonexistent/market.json".to_string());
        Config::from_lookup(|key| env.get(key).cloned()).unwrap()
    }

    fn policy(config: &Config) -> SymmetricSpread {
        SymmetricSpread::new(config.bid_spread, config.ask_spread)
    }

    #[test]
    fn test_bot_fetches_markets_when_file_missing() {
        let config = config("quote");
        assert_eq!(PathBuf::from("/nonexistent/market.json"), config.markets_file);
        let policy = policy(&config);

        let bot = Bot::new(config, MockExchange::new(), policy).unwrap();
        assert!(bot.markets().lookup(&Symbol::new("RENDER_USDC")).is_ok());
        assert_eq!(vec![Call::Ping, Call::Markets], bot.exchange.calls());
    }

    #[test]
    fn test_bot_step_quote() {
        let config = config("quote");
        let policy = policy(&config);
        let rt = Runtime::new().unwrap();
        let markets = MarketBook::new(vec![render_rules()]);
        let bot = Bot::with_markets(config, MockExchange::new(), markets, policy, rt);

        match bot.step() {
            Ok(Outcome::Quoted(report)) => assert_eq!(2, report.placed()),
            other => panic!("unexpected outcome: {:?}", other),
        }

        // repeated steps each cancel once before placing
        bot.step().unwrap();
        assert_eq!(2, bot.exchange.cancel_count());
        assert_eq!(4, bot.exchange.placed().len());
        let sides: Vec<Side> = bot.exchange.placed().iter().map(|o| o.order_side()).collect();
        assert_eq!(vec![Side::Bid, Side::Ask, Side::Bid, Side::Ask], sides);
    }

    #[test]
    fn test_bot_step_report() {
        let config = config("report");
        let policy = policy(&config);
        let mut exchange = MockExchange::new();
        exchange.balances = Balances::new(vec![
            ("RENDER", Balance::new(dec!(5), dec!(1))),
            ("USDC", Balance::new(dec!(100), dec!(0))),
        ]);
        exchange.ticker = Ticker::new(Some(dec!(2.0)), None, None);
        let rt = Runtime::new().unwrap();
        let bot = Bot::with_markets(config, exchange, MarketBook::default(), policy, rt);

        match bot.step() {
            Ok(Outcome::Valued(valuation)) => assert_eq!(dec!(112.0), valuation.total),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(bot.exchange.placed().is_empty());
        assert_eq!(0, bot.exchange.cancel_count());
    }

    #[test]
    fn test_bot_step_error_is_contained() {
        let config = config("quote");
        let policy = policy(&config);
        let rt = Runtime::new().unwrap();
        // no rules for the configured symbol
        let bot = Bot::with_markets(config, MockExchange::new(), MarketBook::default(), policy, rt);

        assert!(matches!(bot.step(), Err(CycleError::SymbolNotFound(_))));
        // the next iteration still runs
        assert!(matches!(bot.step(), Err(CycleError::SymbolNotFound(_))));
        assert_eq!(2, bot.exchange.cancel_count());
    }
}
