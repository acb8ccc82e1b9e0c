//! Trading Dashboard - typed browser client for a crypto trading backend
//!
//! Polls the backend REST API for balance, market analysis, prices, open
//! orders and trade history, renders them into the page, and submits order,
//! cancel and auto-trade requests.
//!
//! # Architecture
//! - `controller`: the [`Dashboard`], one `Command` in, API calls and view
//!   updates out
//! - `client`: the [`DashboardApi`] trait and its HTTP implementation
//! - `dashboard`: pure HTML renderers and the host page
//! - `view`, `settings`: the seams to the page and to browser storage
//! - `web` (wasm32 only): DOM binding and the `#[wasm_bindgen(start)]` entry
//!
//! The host page the module expects comes from [`dashboard::page_html`]; the
//! `write-page` binary writes it from environment config.
//!
//! # Features
//! - Concurrent 10-second refresh with stale responses discarded
//! - Live ticker or OHLC price chart
//! - Market and limit orders, order cancellation
//! - Synchronous and background auto-trade with button locking
//! - Risk settings persisted in localStorage

// Clippy configuration for rendering code patterns
#![allow(clippy::cast_precision_loss)] // Float casts OK for display
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)] // Long HTML templates
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // Command payloads are moved in
#![allow(clippy::map_unwrap_or)] // Explicit fallback preference
#![allow(clippy::format_push_string)] // HTML assembly

pub mod chart;
pub mod client;
pub mod command;
pub mod config;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod sequence;
pub mod settings;
pub mod types;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use client::{ApiClient, DashboardApi};
pub use command::{Command, RefreshTarget};
pub use config::Config;
pub use controller::Dashboard;
pub use error::{DashboardError, Result};
pub use settings::{KeyValueStore, MemoryStore, Settings};
pub use view::{DashboardView, Toast};
