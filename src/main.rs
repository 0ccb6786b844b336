use anyhow::Result;
use log::*;
use std::path::Path;

use market_maker::bot::Bot;
use market_maker::config::{self, Config};
use market_maker::implements::exchanges::backpack::BpxClient;
use market_maker::logger;
use market_maker::strategies::spread::SymmetricSpread;

fn main() -> Result<()> {
    // a missing .env is fine, the variables may come from the environment
    config::load_env_file(Path::new(".env"))?;

    let config = Config::from_env()?;
    logger::setup(&config.log_filter, config.log_file.as_deref())?;

    // exchange
    let client = BpxClient::connect(&config.apikey, &config.exchange)?;

    // strategy
    let policy = SymmetricSpread::new(config.bid_spread, config.ask_spread);

    // bot
    let mut bot = Bot::new(config, client, policy)?;
    info!("Trading {} in {:?} mode", bot.config().symbol, bot.config().mode);
    bot.run()
}
