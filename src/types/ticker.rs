use rust_decimal_macros::dec;

use super::values::Price;

/// 24h ticker snapshot. The exchange may omit any of the price fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ticker {
    last_price: Option<Price>,
    high: Option<Price>,
    low: Option<Price>,
}

impl Ticker {
    pub fn new(last_price: Option<Price>, high: Option<Price>, low: Option<Price>) -> Self {
        Self {
            last_price,
            high,
            low,
        }
    }

    pub fn last_price(&self) -> Option<Price> {
        self.last_price
    }

    /// Last traded price, or the midpoint of high and low when no trade price
    /// was reported. Only positive prices count.
    pub fn mid_price(&self) -> Option<Price> {
        let positive = |price: Price| price > Price::ZERO;

        if let Some(last) = self.last_price.filter(|p| positive(*p)) {
            return Some(last);
        }
        match (self.high, self.low) {
            (Some(high), Some(low)) => Some((high + low) / dec!(2)).filter(|p| positive(*p)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_mid_price() {
        // last price wins
        let ticker = Ticker::new(Some(dec!(2.5)), Some(dec!(10)), Some(dec!(8)));
        assert_eq!(Some(dec!(2.5)), ticker.mid_price());

        // high/low fallback
        let ticker = Ticker::new(None, Some(dec!(10)), Some(dec!(8)));
        assert_eq!(Some(dec!(9.0)), ticker.mid_price());

        // nothing usable
        assert_eq!(None, Ticker::default().mid_price());
        let ticker = Ticker::new(None, Some(dec!(10)), None);
        assert_eq!(None, ticker.mid_price());
    }

    #[test]
    fn test_ticker_ignores_non_positive_prices() {
        let ticker = Ticker::new(Some(dec!(0)), None, None);
        assert_eq!(None, ticker.mid_price());

        let ticker = Ticker::new(Some(dec!(-3)), Some(dec!(10)), Some(dec!(8)));
        assert_eq!(Some(dec!(9)), ticker.mid_price());

        let ticker = Ticker::new(None, Some(dec!(0)), Some(dec!(0)));
        assert_eq!(None, ticker.mid_price());
    }
}
