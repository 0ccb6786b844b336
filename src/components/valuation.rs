use log::*;

use crate::error::CycleError;
use crate::interfaces::Exchange;
use crate::types::{Amount, Balances, Price, Symbol};

/// Account value of one market's two assets, in the quote asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Valuation {
    pub base_asset: String,
    pub base_balance: Amount,
    pub quote_asset: String,
    pub quote_balance: Amount,
    pub price: Price,
    pub total: Amount,
}

/// Sums `available + locked` of both assets of `symbol`, valuing the base
/// asset at the last traded price. Read-only.
pub async fn report<E>(exchange: &E, symbol: &Symbol) -> Result<Valuation, CycleError>
where
    E: Exchange,
{
    let balances = exchange.balances().await?;
    let base_balance = asset_total(&balances, symbol.base());
    let quote_balance = asset_total(&balances, symbol.quote());

    info!("{}: {}", symbol.base(), base_balance);
    info!("{}: {}", symbol.quote(), quote_balance);

    let ticker = exchange.ticker(symbol).await?;
    let price = ticker.last_price().ok_or_else(|| {
        CycleError::DataUnavailable(format!("no last traded price for {symbol}"))
    })?;
    info!("{} price: {}", symbol.base(), price);

    let total = quote_balance + base_balance * price;
    info!("Total value: {}", total);

    Ok(Valuation {
        base_asset: symbol.base().to_string(),
        base_balance,
        quote_asset: symbol.quote().to_string(),
        quote_balance,
        price,
        total,
    })
}

fn asset_total(balances: &Balances, asset: &str) -> Amount {
    match balances.get(asset) {
        Some(balance) => balance.total(),
        None => {
            warn!("no {asset} balance reported, counting it as zero");
            Amount::ZERO
        }
    }
}
