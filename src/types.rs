//! Wire types for the dashboard API
//!
//! Payloads are decoded leniently: the backend serves exchange data verbatim,
//! so amounts arrive as numbers or numeric strings, and a few endpoints exist
//! in two shapes.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DashboardError, Result};

/// A number that may be sent as a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// Parsed value, `None` for non-numeric text
    pub fn value(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Number(value)
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Numeric::Text(value.to_string())
    }
}

/// Response wrapper used by every endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    /// FastAPI puts HTTPException messages here, or a list of validation
    /// errors on 422
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// Server-provided failure message, if any
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or_else(|| self.detail.as_ref().and_then(detail_text))
            .filter(|m| !m.trim().is_empty())
    }

    /// Decode the `data` payload
    pub fn data_as<T: for<'de> Deserialize<'de>>(self) -> Result<T> {
        let data = self
            .data
            .ok_or_else(|| DashboardError::Malformed("missing data".into()))?;
        serde_json::from_value(data).map_err(DashboardError::from)
    }
}

/// Message of a `detail` field: the string itself, or the first `msg` of a
/// validation error list
fn detail_text(detail: &Value) -> Option<&str> {
    match detail {
        Value::String(message) => Some(message),
        Value::Array(errors) => errors
            .iter()
            .find_map(|e| e.get("msg").and_then(Value::as_str)),
        _ => None,
    }
}

/// Currency code → amount
pub type BalanceMap = BTreeMap<String, Numeric>;

/// Market analysis for one pair
#[derive(Debug, Clone, Deserialize)]
pub struct MarketAnalysis {
    pub trend: String,
    pub recommendation: String,
    /// Raw confidence in 0..=1
    pub confidence: f64,
    pub indicators: Indicators,
    #[serde(default)]
    pub support_levels: Vec<f64>,
    #[serde(default)]
    pub resistance_levels: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    pub rsi: f64,
    pub macd: Macd,
    pub bollinger_bands: BollingerBands,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Ticker payload; only the last-trade array is used
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// `[price, lot volume]` of the last trade
    #[serde(rename = "c", default)]
    pub last_trade: Vec<Numeric>,
}

impl Ticker {
    pub fn last_price(&self) -> Option<f64> {
        self.last_trade.first().and_then(Numeric::value)
    }
}

/// OHLC candle
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    /// Seconds since epoch
    pub time: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// Parse a `[time, open, high, low, close, ...]` row
    pub fn from_row(row: &[Value]) -> Option<Self> {
        let field = |idx: usize| -> Option<f64> {
            match row.get(idx)? {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }
        };

        Some(Self {
            time: field(0)?,
            open: field(1)?,
            high: field(2)?,
            low: field(3)?,
            close: field(4)?,
        })
    }

    /// Parse every row, skipping malformed ones
    pub fn from_rows(rows: &[Vec<Value>]) -> Vec<Self> {
        rows.iter().filter_map(|row| Self::from_row(row)).collect()
    }
}

/// Open order description block
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDescr {
    pub pair: String,
    #[serde(rename = "type")]
    pub side: String,
    #[serde(default)]
    pub price: Option<Numeric>,
}

/// An open order
#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrder {
    pub descr: OrderDescr,
    #[serde(default)]
    pub vol: Option<Numeric>,
}

/// Open orders, either flat or wrapped in `{ "open": { ... } }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OpenOrdersPayload {
    Wrapped(WrappedOrders),
    Flat(BTreeMap<String, OpenOrder>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WrappedOrders {
    #[serde(default)]
    pub open: Option<BTreeMap<String, OpenOrder>>,
}

impl OpenOrdersPayload {
    /// Orders keyed by id
    pub fn into_orders(self) -> BTreeMap<String, OpenOrder> {
        match self {
            OpenOrdersPayload::Wrapped(w) => w.open.unwrap_or_default(),
            OpenOrdersPayload::Flat(orders) => orders,
        }
    }
}

/// One past trade
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    /// Filled in from the map key when the payload is id-keyed
    #[serde(default)]
    pub id: Option<String>,
    pub time: f64,
    pub pair: String,
    #[serde(rename = "type")]
    pub side: String,
    pub price: Numeric,
    #[serde(alias = "vol")]
    pub volume: Numeric,
    #[serde(default)]
    pub cost: Option<Numeric>,
    #[serde(default)]
    pub fee: Option<Numeric>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Trade history, either a list or a map keyed by trade id
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HistoryPayload {
    List(Vec<HistoryEntry>),
    Map(BTreeMap<String, HistoryEntry>),
}

impl HistoryPayload {
    /// Entries sorted newest first
    pub fn into_entries(self) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = match self {
            HistoryPayload::List(list) => list,
            HistoryPayload::Map(map) => map
                .into_iter()
                .map(|(id, mut entry)| {
                    if entry.id.is_none() {
                        entry.id = Some(id);
                    }
                    entry
                })
                .collect(),
        };
        entries.sort_by(|a, b| b.time.total_cmp(&a.time));
        entries
    }
}

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for OrderSide {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(OrderSide::Buy),
            "sell" => Ok(OrderSide::Sell),
            other => Err(DashboardError::InvalidInput(format!("unknown order side: {other}"))),
        }
    }
}

/// Order type (market or limit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    #[default]
    Market,
    Limit,
}

impl FromStr for OrderKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "market" => Ok(OrderKind::Market),
            "limit" => Ok(OrderKind::Limit),
            other => Err(DashboardError::InvalidInput(format!("unknown order type: {other}"))),
        }
    }
}

/// Raw values of the order form, as typed by the user
#[derive(Debug, Clone)]
pub struct OrderForm {
    pub pair: String,
    pub side: OrderSide,
    pub kind: OrderKind,
    pub volume: String,
    pub price: String,
}

/// Body of `POST /order`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    pub pair: String,
    pub order_type: OrderSide,
    pub order_ordertype: OrderKind,
    pub volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl OrderRequest {
    /// Build a request from the form; the price only travels with limit orders
    pub fn from_form(form: &OrderForm) -> Result<Self> {
        let volume = form
            .volume
            .trim()
            .parse::<f64>()
            .map_err(|_| DashboardError::InvalidInput(format!("volume '{}'", form.volume)))?;

        let price = match form.kind {
            OrderKind::Limit => Some(
                form.price
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| DashboardError::InvalidInput(format!("price '{}'", form.price)))?,
            ),
            OrderKind::Market => None,
        };

        Ok(Self {
            pair: form.pair.trim().to_string(),
            order_type: form.side,
            order_ordertype: form.kind,
            volume,
            price,
        })
    }
}

/// Body of both auto-trade endpoints
#[derive(Debug, Clone, Serialize)]
pub struct AutoTradeRequest {
    pub pair: String,
}

/// What the backend decided to do
#[derive(Debug, Clone, PartialEq)]
pub enum AutoTradeOutcome {
    Executed {
        side: OrderSide,
        volume: f64,
        price: f64,
    },
    NoTrade {
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct RawAutoTrade {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(rename = "type", default)]
    side: Option<String>,
    #[serde(default)]
    volume: Option<Numeric>,
    #[serde(default)]
    price: Option<Numeric>,
    #[serde(default)]
    reason: Option<String>,
}

impl AutoTradeOutcome {
    /// Decode either `{status, type, volume, price | reason}` or
    /// `{action, volume, price | reason}`
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawAutoTrade = serde_json::from_value(value)?;

        let side = match (raw.action.as_deref(), raw.status.as_deref()) {
            (Some(action), _) => action.parse::<OrderSide>().ok(),
            (None, Some("success")) => raw.side.as_deref().and_then(|s| s.parse().ok()),
            _ => None,
        };

        let Some(side) = side else {
            return Ok(AutoTradeOutcome::NoTrade {
                reason: raw.reason.unwrap_or_else(|| "no reason given".to_string()),
            });
        };

        let volume = raw
            .volume
            .as_ref()
            .and_then(Numeric::value)
            .ok_or_else(|| DashboardError::Malformed("auto-trade volume".into()))?;
        let price = raw
            .price
            .as_ref()
            .and_then(Numeric::value)
            .ok_or_else(|| DashboardError::Malformed("auto-trade price".into()))?;

        Ok(AutoTradeOutcome::Executed { side, volume, price })
    }
}
