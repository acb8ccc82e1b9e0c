//! Configuration management for the dashboard client

use std::str::FromStr;

use crate::error::{DashboardError, Result};

/// Where the price chart gets its points from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSource {
    /// Rolling window of live ticker prices, one point per refresh
    Ticker,
    /// Full OHLC series, close price per candle
    Ohlc,
}

impl FromStr for ChartSource {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ticker" => Ok(ChartSource::Ticker),
            "ohlc" => Ok(ChartSource::Ohlc),
            other => Err(DashboardError::Config(format!("unknown chart source: {other}"))),
        }
    }
}

/// How the balance container is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceLayout {
    /// List group with badges, negligible amounts hidden
    List,
    /// Two-column table, non-positive amounts hidden
    Table,
}

impl FromStr for BalanceLayout {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "list" => Ok(BalanceLayout::List),
            "table" => Ok(BalanceLayout::Table),
            other => Err(DashboardError::Config(format!("unknown balance layout: {other}"))),
        }
    }
}

/// Endpoint paths, relative to `api_base + api_prefix`.
///
/// `{pair}` and `{id}` placeholders are substituted per request.
#[derive(Debug, Clone)]
pub struct Routes {
    pub balance: String,
    pub analysis: String,
    pub ticker: String,
    pub ohlc: String,
    pub open_orders: String,
    pub place_order: String,
    pub cancel_order: String,
    pub history: String,
    pub auto_trade: String,
    pub auto_trade_background: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            balance: "/balance".to_string(),
            analysis: "/market/analysis/{pair}".to_string(),
            ticker: "/ticker/{pair}".to_string(),
            ohlc: "/ohlc/{pair}".to_string(),
            open_orders: "/orders".to_string(),
            place_order: "/order".to_string(),
            cancel_order: "/order/{id}".to_string(),
            history: "/history".to_string(),
            auto_trade: "/trade/auto".to_string(),
            auto_trade_background: "/trade/auto/background".to_string(),
        }
    }
}

impl Routes {
    /// Fill the `{pair}` placeholder
    pub fn with_pair(template: &str, pair: &str) -> String {
        template.replace("{pair}", pair)
    }

    /// Fill the `{id}` placeholder
    pub fn with_id(template: &str, id: &str) -> String {
        template.replace("{id}", id)
    }
}

/// Dashboard client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Scheme + host of the backend, e.g. `http://localhost:8000`
    pub api_base: String,
    pub api_prefix: String,

    /// Pair used when the selector is empty
    pub default_pair: String,

    pub refresh_interval_ms: u32,
    pub toast_timeout_ms: u32,

    /// Chart
    pub chart_window: usize,
    pub chart_source: ChartSource,
    pub ohlc_interval: u32, // minutes per candle

    /// Balance rendering
    pub balance_layout: BalanceLayout,
    pub balance_threshold: f64,

    /// Log level
    pub log_level: String,

    pub routes: Routes,
}

/// Largest accepted chart window
pub const MAX_CHART_WINDOW: usize = 10_000;

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    ///
    /// Missing or unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Routes::default();
        let route = |key: &str, default: String| var(key).unwrap_or(default);

        Self {
            api_base: var("API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "http://localhost:8000".to_string()),

            api_prefix: var("API_PREFIX").unwrap_or_else(|| "/api".to_string()),

            default_pair: var("DEFAULT_PAIR").unwrap_or_else(|| "BTCUSD".to_string()),

            refresh_interval_ms: var("REFRESH_INTERVAL_MS")
                .map(|v| v.parse().unwrap_or(10_000))
                .unwrap_or(10_000),

            toast_timeout_ms: var("TOAST_TIMEOUT_MS")
                .map(|v| v.parse().unwrap_or(5_000))
                .unwrap_or(5_000),

            chart_window: var("CHART_WINDOW")
                .map(|v| v.parse().unwrap_or(30))
                .unwrap_or(30),

            chart_source: var("CHART_SOURCE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(ChartSource::Ticker),

            ohlc_interval: var("OHLC_INTERVAL")
                .map(|v| v.parse().unwrap_or(60))
                .unwrap_or(60),

            balance_layout: var("BALANCE_LAYOUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(BalanceLayout::List),

            balance_threshold: var("BALANCE_THRESHOLD")
                .map(|v| v.parse().unwrap_or(0.000_01))
                .unwrap_or(0.000_01),

            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            routes: Routes {
                balance: route("ROUTE_BALANCE", defaults.balance),
                analysis: route("ROUTE_ANALYSIS", defaults.analysis),
                ticker: route("ROUTE_TICKER", defaults.ticker),
                ohlc: route("ROUTE_OHLC", defaults.ohlc),
                open_orders: route("ROUTE_OPEN_ORDERS", defaults.open_orders),
                place_order: route("ROUTE_PLACE_ORDER", defaults.place_order),
                cancel_order: route("ROUTE_CANCEL_ORDER", defaults.cancel_order),
                history: route("ROUTE_HISTORY", defaults.history),
                auto_trade: route("ROUTE_AUTO_TRADE", defaults.auto_trade),
                auto_trade_background: route(
                    "ROUTE_AUTO_TRADE_BACKGROUND",
                    defaults.auto_trade_background,
                ),
            },
        }
    }

    /// `dataset` property holding `key` on an HTML element
    /// (`API_BASE` → `apiBase`, i.e. the `data-api-base` attribute)
    pub fn dataset_key(key: &str) -> String {
        let mut out = String::with_capacity(key.len());
        for (i, part) in key.split('_').filter(|p| !p.is_empty()).enumerate() {
            let part = part.to_lowercase();
            if i == 0 {
                out.push_str(&part);
            } else {
                let mut chars = part.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                }
            }
        }
        out
    }

    /// Base URL every route is appended to
    pub fn api_url(&self) -> String {
        format!("{}{}", self.api_base, self.api_prefix)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(DashboardError::Config(format!(
                "api_base must be an absolute http(s) URL, got {}",
                self.api_base
            )));
        }
        if self.refresh_interval_ms == 0 {
            return Err(DashboardError::Config("refresh_interval_ms must be positive".into()));
        }
        if self.chart_window == 0 || self.chart_window > MAX_CHART_WINDOW {
            return Err(DashboardError::Config(format!(
                "chart_window must be between 1 and {MAX_CHART_WINDOW}, got {}",
                self.chart_window
            )));
        }
        if self.default_pair.is_empty() {
            return Err(DashboardError::Config("default_pair required".into()));
        }
        Ok(())
    }
}
