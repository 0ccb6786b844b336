use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::*;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;

use super::parser;
use super::signer::{Params, Signer};
use crate::apikey::ApiKey;
use crate::config::ExchangeSettings;
use crate::error::ExchangeError;
use crate::interfaces::Exchange;
use crate::markets::parse_markets;
use crate::types::{Balances, MarketRules, NewOrder, OrderConfirmation, Symbol, Ticker};

const BODY_PREVIEW: usize = 200;

/// REST client for the Backpack exchange.
pub struct BpxClient {
    http: Client,
    base_url: String,
    signer: Signer,
}

impl BpxClient {
    pub fn connect(apikey: &ApiKey, settings: &ExchangeSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        let signer = Signer::new(apikey, settings.window_ms)?;

        let mut base_url = settings.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            http,
            base_url,
            signer,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn public_get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ExchangeError> {
        let request = self.http.get(self.url(path)).query(query);
        read_json(request.send().await?).await
    }

    /// Sends a signed request. `GET` carries the parameters in the query
    /// string, other methods as a JSON body.
    async fn signed(
        &self,
        method: Method,
        path: &str,
        instruction: &str,
        params: Params,
    ) -> Result<Value, ExchangeError> {
        let timestamp = Utc::now().timestamp_millis();
        let headers = self.signer.sign(instruction, &params, timestamp);

        let mut request: RequestBuilder = self.http.request(method.clone(), self.url(path));
        for (name, value) in headers {
            request = request.header(name, value);
        }
        request = if method == Method::GET {
            request.query(&params)
        } else {
            request.body(serde_json::to_string(&params).map_err(|e| {
                ExchangeError::Malformed(format!("cannot encode request body: {e}"))
            })?)
        };

        debug!("{method} {path} ({instruction}) {params:?}");
        read_json(request.send().await?).await
    }
}

async fn read_text(response: Response) -> Result<(u16, String), ExchangeError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ExchangeError::Status {
            status: status.as_u16(),
            body: body.chars().take(BODY_PREVIEW).collect(),
        });
    }
    Ok((status.as_u16(), body))
}

async fn read_json(response: Response) -> Result<Value, ExchangeError> {
    let (status, body) = read_text(response).await?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| {
        ExchangeError::Malformed(format!(
            "status {status}, {e}: {}",
            body.chars().take(BODY_PREVIEW).collect::<String>()
        ))
    })
}

#[async_trait]
impl Exchange for BpxClient {
    async fn balances(&self) -> Result<Balances, ExchangeError> {
        let raw = self
            .signed(Method::GET, "api/v1/capital", "balanceQuery", Params::new())
            .await?;
        parser::parse_balances(&raw)
    }

    async fn ticker(&self, symbol: &Symbol) -> Result<Ticker, ExchangeError> {
        let raw = self
            .public_get("api/v1/ticker", &[("symbol", symbol.as_str())])
            .await?;
        parser::parse_ticker(&raw)
    }

    async fn cancel_all_orders(&self, symbol: &Symbol) -> Result<(), ExchangeError> {
        let mut params = Params::new();
        params.insert("symbol", symbol.to_string());

        let raw = self
            .signed(Method::DELETE, "api/v1/orders", "orderCancelAll", params)
            .await?;
        debug!("cancelled orders: {raw}");
        Ok(())
    }

    async fn place_limit_order(&self, order: NewOrder) -> Result<OrderConfirmation, ExchangeError> {
        let mut params = Params::new();
        params.insert("symbol", order.symbol().to_string());
        params.insert("side", order.order_side().as_str().to_string());
        params.insert("orderType", order.order_type().as_str().to_string());
        params.insert("quantity", order.amount().normalize().to_string());
        params.insert("price", order.price().normalize().to_string());

        let raw = self
            .signed(Method::POST, "api/v1/order", "orderExecute", params)
            .await?;
        parser::parse_order_confirmation(&raw)
    }

    async fn ping(&self) -> Result<(), ExchangeError> {
        let response = self.http.get(self.url("api/v1/ping")).send().await?;
        let (_, body) = read_text(response).await?;
        debug!("ping: {}", body.trim());
        Ok(())
    }

    async fn markets(&self) -> Result<Vec<MarketRules>, ExchangeError> {
        let raw = self.public_get("api/v1/markets", &[]).await?;
        parse_markets(&raw).map_err(|e| ExchangeError::Malformed(format!("markets: {e}")))
    }
}
