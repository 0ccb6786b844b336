use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::apikey::ApiKey;
use crate::error::ConfigError;
use crate::types::{Amount, Symbol};

pub const DEFAULT_BASE_URL: &str = "https://api.backpack.exchange/";

/// What the bot does on every tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Log the account value, never touch orders.
    Report,
    /// Cancel and re-quote both sides of the book.
    Quote,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "report" => Ok(Self::Report),
            "quote" => Ok(Self::Quote),
            other => Err(format!("expected `report` or `quote`, got `{other}`")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeSettings {
    pub base_url: String,
    pub window_ms: u64,
    pub request_timeout: Duration,
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            window_ms: 5_000,
            request_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub symbol: Symbol,
    pub bid_spread: Decimal,
    pub ask_spread: Decimal,
    pub refresh_interval: Duration,
    pub position_size: Amount,
    pub mode: Mode,
    pub dry_run: bool, // no cancellation or submission
    pub markets_file: PathBuf,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
    pub exchange: ExchangeSettings,
    pub apikey: ApiKey,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source. Unset or empty
    /// optional keys fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let key = get("API_KEY").ok_or(ConfigError::Missing("API_KEY"))?;
        let secret = get("API_SECRET").ok_or(ConfigError::Missing("API_SECRET"))?;
        let apikey = ApiKey::new(key, secret);
        apikey.signing_key()?;

        let symbol = Symbol::new(get("SYMBOL").unwrap_or_else(|| "RENDER_USDC".to_string()));
        let bid_spread = parse_or("BID_SPREAD", get("BID_SPREAD"), dec!(0.002))?;
        let ask_spread = parse_or("ASK_SPREAD", get("ASK_SPREAD"), dec!(0.002))?;
        let refresh_secs: u64 = parse_or("ORDER_REFRESH_TIME", get("ORDER_REFRESH_TIME"), 60)?;
        let position_size = parse_or("POSITION_SIZE", get("POSITION_SIZE"), dec!(1.8))?;
        let mode = parse_or("BOT_MODE", get("BOT_MODE"), Mode::Report)?;
        let dry_run = parse_or("DRY_RUN", get("DRY_RUN"), false)?;
        let timeout_secs: u64 =
            parse_or("REQUEST_TIMEOUT_SECS", get("REQUEST_TIMEOUT_SECS"), 10)?;
        let window_ms = parse_or("BPX_WINDOW_MS", get("BPX_WINDOW_MS"), 5_000)?;

        check_spread("BID_SPREAD", bid_spread)?;
        check_spread("ASK_SPREAD", ask_spread)?;
        if refresh_secs == 0 {
            return Err(invalid("ORDER_REFRESH_TIME", "must be at least one second"));
        }
        if position_size <= Decimal::ZERO {
            return Err(invalid("POSITION_SIZE", "must be positive"));
        }
        if timeout_secs == 0 {
            return Err(invalid("REQUEST_TIMEOUT_SECS", "must be at least one second"));
        }

        // an explicitly empty LOG_FILE turns file logging off
        let log_file = match lookup("LOG_FILE") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from("market_maker.log")),
        };

        Ok(Self {
            symbol,
            bid_spread,
            ask_spread,
            refresh_interval: Duration::from_secs(refresh_secs),
            position_size,
            mode,
            dry_run,
            markets_file: PathBuf::from(
                get("MARKETS_FILE").unwrap_or_else(|| "market.json".to_string()),
            ),
            log_filter: get("LOG_FILTER").unwrap_or_else(|| "info".to_string()),
            log_file,
            exchange: ExchangeSettings {
                base_url: get("BPX_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                window_ms,
                request_timeout: Duration::from_secs(timeout_secs),
            },
            apikey,
        })
    }
}

/// Loads `path` into the process environment. Returns `false` when the file
/// does not exist. A file that exists but cannot be parsed is an error.
pub fn load_env_file(path: &Path) -> Result<bool, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(ConfigError::EnvFile(e)),
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e| invalid(key, format!("`{}`: {}", v.trim(), e))),
        None => Ok(default),
    }
}

fn check_spread(key: &'static str, spread: Decimal) -> Result<(), ConfigError> {
    if spread < Decimal::ZERO || spread >= Decimal::ONE {
        return Err(invalid(key, format!("{spread} is outside [0, 1)")));
    }
    Ok(())
}
