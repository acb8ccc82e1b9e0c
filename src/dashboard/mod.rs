//! Dashboard module - HTML rendering for the trading dashboard
//!
//! Everything here is a pure function from typed data to an HTML string,
//! so it runs and tests natively. The browser binding assigns the output
//! to the matching container.
//!
//! # Architecture
//! - `html.rs`, `css.rs`: host page structure and styling
//! - `balance.rs`, `orders.rs`, `history.rs`: poller fragments
//! - `analysis.rs`, `chart.rs`: market analysis cards and the SVG chart
//! - `format.rs`: number, time and currency formatting shared by all of them

pub mod analysis;
pub mod balance;
pub mod chart;
mod css;
pub mod format;
pub mod history;
mod html;
pub mod orders;

use std::io::Write;

use crate::config::{BalanceLayout, ChartSource, Config};
use crate::error::Result;
use self::format::escape_html;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_ICONS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js";

/// `data-*` attributes on `<body>` the browser binding reads its config from
fn body_attributes(config: &Config) -> String {
    let chart_source = match config.chart_source {
        ChartSource::Ticker => "ticker",
        ChartSource::Ohlc => "ohlc",
    };
    let balance_layout = match config.balance_layout {
        BalanceLayout::List => "list",
        BalanceLayout::Table => "table",
    };

    [
        ("api-base", config.api_base.clone()),
        ("api-prefix", config.api_prefix.clone()),
        ("default-pair", config.default_pair.clone()),
        ("refresh-interval-ms", config.refresh_interval_ms.to_string()),
        ("toast-timeout-ms", config.toast_timeout_ms.to_string()),
        ("chart-window", config.chart_window.to_string()),
        ("chart-source", chart_source.to_string()),
        ("ohlc-interval", config.ohlc_interval.to_string()),
        ("balance-layout", balance_layout.to_string()),
        ("balance-threshold", config.balance_threshold.to_string()),
        ("log-level", config.log_level.clone()),
    ]
    .iter()
    .map(|(key, value)| format!(r#" data-{key}="{}""#, escape_html(value)))
    .collect()
}

/// Generate the complete dashboard host page.
///
/// `pkg_path` is where the wasm-bindgen output is served from.
pub fn page_html(config: &Config, pkg_path: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-bs-theme="dark">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Trading Dashboard</title>
    <link rel="stylesheet" href="{BOOTSTRAP_CSS}">
    <link rel="stylesheet" href="{BOOTSTRAP_ICONS}">
    <style>
{css}
    </style>
</head>
<body{attrs}>
{html}
    <script src="{BOOTSTRAP_JS}"></script>
    <script type="module">
        import init from '{pkg}/trading_dashboard.js';
        init();
    </script>
</body>
</html>"#,
        css = css::STYLES,
        attrs = body_attributes(config),
        html = html::TEMPLATE,
        pkg = pkg_path.trim_end_matches('/'),
    )
}

/// Write the host page for `config` to `out`
pub fn write_page(config: &Config, pkg_path: &str, out: &mut impl Write) -> Result<()> {
    config.validate()?;
    out.write_all(page_html(config, pkg_path).as_bytes())?;
    out.flush()?;
    Ok(())
}
