//! Dashboard backend REST client
//!
//! Implements the backend API for:
//! - Balance, open orders and trade history
//! - Market data (analysis, ticker, OHLC)
//! - Order placement and cancellation
//! - Synchronous and background auto-trade
//!
//! Every response is wrapped in an [`Envelope`]; anything but
//! `status == "success"` becomes [`DashboardError::Api`].

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::config::{Config, Routes};
use crate::error::{DashboardError, Result, UNKNOWN_ERROR};
use crate::types::{
    AutoTradeOutcome, AutoTradeRequest, BalanceMap, Candle, Envelope, HistoryEntry,
    HistoryPayload, MarketAnalysis, OpenOrder, OpenOrdersPayload, OrderRequest, Ticker,
};

/// Operations the dashboard needs from the backend.
///
/// Futures are `!Send`; they run on the browser event loop.
#[allow(async_fn_in_trait)]
pub trait DashboardApi {
    async fn balance(&self) -> Result<BalanceMap>;
    async fn analysis(&self, pair: &str) -> Result<MarketAnalysis>;
    async fn ticker(&self, pair: &str) -> Result<Ticker>;
    async fn ohlc(&self, pair: &str) -> Result<Vec<Candle>>;
    async fn open_orders(&self) -> Result<BTreeMap<String, OpenOrder>>;
    /// Newest first
    async fn history(&self) -> Result<Vec<HistoryEntry>>;
    async fn place_order(&self, order: &OrderRequest) -> Result<()>;
    async fn cancel_order(&self, order_id: &str) -> Result<()>;
    async fn auto_trade(&self, pair: &str) -> Result<AutoTradeOutcome>;
    /// Returns the acknowledgment message
    async fn schedule_auto_trade(&self, pair: &str) -> Result<String>;
}

/// HTTP implementation of [`DashboardApi`]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    routes: Routes,
    ohlc_interval: u32,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url(),
            routes: config.routes.clone(),
            ohlc_interval: config.ohlc_interval,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Perform GET request
    async fn get(&self, path: &str) -> Result<Envelope> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Perform POST request with a JSON body
    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Envelope> {
        let response = self
            .http
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Perform DELETE request
    async fn delete(&self, path: &str) -> Result<Envelope> {
        let response = self.http.delete(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Read the body and check the envelope
    async fn handle_response(response: reqwest::Response) -> Result<Envelope> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_envelope(status, &body)
    }
}

/// Decode a response body into a success envelope.
///
/// Error bodies may be a `{status:"error", error}` envelope or a bare
/// `{detail}`; a non-JSON error body falls back to the HTTP status line.
pub fn decode_envelope(status: u16, body: &str) -> Result<Envelope> {
    let ok = (200..300).contains(&status);

    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !ok => {
            let text = body.trim();
            let text = if text.is_empty() { UNKNOWN_ERROR } else { text };
            return Err(DashboardError::Http(format!("HTTP {status}: {text}")));
        }
        Err(e) => return Err(e.into()),
    };

    if !envelope.is_success() {
        return Err(DashboardError::Api(
            envelope.error_message().unwrap_or(UNKNOWN_ERROR).to_string(),
        ));
    }
    Ok(envelope)
}

impl DashboardApi for ApiClient {
    async fn balance(&self) -> Result<BalanceMap> {
        self.get(&self.routes.balance).await?.data_as()
    }

    async fn analysis(&self, pair: &str) -> Result<MarketAnalysis> {
        self.get(&Routes::with_pair(&self.routes.analysis, pair))
            .await?
            .data_as()
    }

    async fn ticker(&self, pair: &str) -> Result<Ticker> {
        self.get(&Routes::with_pair(&self.routes.ticker, pair))
            .await?
            .data_as()
    }

    async fn ohlc(&self, pair: &str) -> Result<Vec<Candle>> {
        let path = format!(
            "{}?interval={}",
            Routes::with_pair(&self.routes.ohlc, pair),
            self.ohlc_interval
        );
        let rows: Vec<Vec<Value>> = self.get(&path).await?.data_as()?;
        Ok(Candle::from_rows(&rows))
    }

    async fn open_orders(&self) -> Result<BTreeMap<String, OpenOrder>> {
        let payload: OpenOrdersPayload = self.get(&self.routes.open_orders).await?.data_as()?;
        Ok(payload.into_orders())
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>> {
        let payload: HistoryPayload = self.get(&self.routes.history).await?.data_as()?;
        Ok(payload.into_entries())
    }

    async fn place_order(&self, order: &OrderRequest) -> Result<()> {
        self.post(&self.routes.place_order, order).await?;
        Ok(())
    }

    async fn cancel_order(&self, order_id: &str) -> Result<()> {
        self.delete(&Routes::with_id(&self.routes.cancel_order, order_id))
            .await?;
        Ok(())
    }

    async fn auto_trade(&self, pair: &str) -> Result<AutoTradeOutcome> {
        let body = AutoTradeRequest {
            pair: pair.to_string(),
        };
        let value: Value = self.post(&self.routes.auto_trade, &body).await?.data_as()?;
        AutoTradeOutcome::from_value(value)
    }

    async fn schedule_auto_trade(&self, pair: &str) -> Result<String> {
        let body = AutoTradeRequest {
            pair: pair.to_string(),
        };
        let envelope = self.post(&self.routes.auto_trade_background, &body).await?;
        Ok(envelope
            .message
            .unwrap_or_else(|| format!("Auto-trade scheduled for {pair}")))
    }
}
