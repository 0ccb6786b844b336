use std::collections::HashMap;

use super::values::Amount;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Balance {
    available: Amount,
    locked: Amount,
}

impl Balance {
    pub fn new(available: Amount, locked: Amount) -> Self {
        Self { available, locked }
    }

    pub fn total(&self) -> Amount {
        self.available + self.locked
    }
}

/// Account balances keyed by asset symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Balances {
    assets: HashMap<String, Balance>,
}

impl Balances {
    pub fn new<I, S>(assets: I) -> Self
    where
        I: IntoIterator<Item = (S, Balance)>,
        S: Into<String>,
    {
        Self {
            assets: assets
                .into_iter()
                .map(|(asset, balance)| (asset.into(), balance))
                .collect(),
        }
    }

    pub fn get(&self, asset: &str) -> Option<&Balance> {
        self.assets.get(asset)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    #[test]
    fn test_balances() {
        let balances = Balances::new(vec![
            ("RENDER", Balance::new(dec!(5), dec!(1))),
            ("USDC", Balance::new(dec!(100), dec!(0))),
        ]);

        assert_eq!(2, balances.len());
        assert_eq!(Some(dec!(6)), balances.get("RENDER").map(|b| b.total()));
        assert_eq!(Some(dec!(100)), balances.get("USDC").map(|b| b.total()));
        assert_eq!(None, balances.get("SOL"));
    }
}
