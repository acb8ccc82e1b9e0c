//! Typed user and timer events
//!
//! Platform callbacks translate into a [`Command`] and hand it to
//! `Dashboard::dispatch`; nothing else calls into the controller.

use std::str::FromStr;

use crate::error::{DashboardError, Result};
use crate::settings::Settings;
use crate::types::{OrderForm, OrderKind};

/// Which container a refresh button targets (`data-target`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTarget {
    Balance,
    Market,
    Chart,
    Orders,
    History,
}

impl FromStr for RefreshTarget {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "balance" => Ok(RefreshTarget::Balance),
            "market" | "analysis" => Ok(RefreshTarget::Market),
            "chart" => Ok(RefreshTarget::Chart),
            "orders" => Ok(RefreshTarget::Orders),
            "history" => Ok(RefreshTarget::History),
            other => Err(DashboardError::InvalidInput(format!("unknown refresh target: {other}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Command {
    /// Page loaded: settings, then every container
    Init,
    /// Periodic refresh
    Tick,
    Refresh(RefreshTarget),
    SelectPair(String),
    SetOrderKind(OrderKind),
    PlaceOrder(OrderForm),
    CancelOrder(String),
    /// `None` uses the selected pair
    AutoTrade { pair: Option<String> },
    AutoTradeBackground { pair: Option<String> },
    LoadSettings,
    SaveSettings(Settings),
}

impl Command {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Init => "init",
            Command::Tick => "tick",
            Command::Refresh(_) => "refresh",
            Command::SelectPair(_) => "select_pair",
            Command::SetOrderKind(_) => "set_order_kind",
            Command::PlaceOrder(_) => "place_order",
            Command::CancelOrder(_) => "cancel_order",
            Command::AutoTrade { .. } => "auto_trade",
            Command::AutoTradeBackground { .. } => "auto_trade_background",
            Command::LoadSettings => "load_settings",
            Command::SaveSettings(_) => "save_settings",
        }
    }
}
