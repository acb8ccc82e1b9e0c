//! Risk settings persisted in per-browser key-value storage
//!
//! Values are kept as the decimal strings the user typed; nothing is
//! normalised or range-checked.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::warn;

use crate::error::Result;

pub const MAX_TRADE_AMOUNT_KEY: &str = "maxTradeAmount";
pub const RISK_PERCENTAGE_KEY: &str = "riskPercentage";
pub const STOP_LOSS_PERCENTAGE_KEY: &str = "stopLossPercentage";
pub const TAKE_PROFIT_PERCENTAGE_KEY: &str = "takeProfitPercentage";

/// String key-value storage (localStorage in the browser)
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, used natively and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// User risk parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub max_trade_amount: String,
    pub risk_percentage: String,
    pub stop_loss_percentage: String,
    pub take_profit_percentage: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_trade_amount: "1000".to_string(),
            risk_percentage: "2".to_string(),
            stop_loss_percentage: "5".to_string(),
            take_profit_percentage: "10".to_string(),
        }
    }
}

impl Settings {
    /// Read stored values, falling back to the default per missing or empty key
    pub fn load(store: &impl KeyValueStore) -> Self {
        let defaults = Self::default();
        let read = |key: &str, default: String| match store.get_item(key) {
            Ok(Some(value)) if !value.is_empty() => value,
            Ok(_) => default,
            Err(e) => {
                warn!(key, error = %e, "settings read failed, using default");
                default
            }
        };

        Self {
            max_trade_amount: read(MAX_TRADE_AMOUNT_KEY, defaults.max_trade_amount),
            risk_percentage: read(RISK_PERCENTAGE_KEY, defaults.risk_percentage),
            stop_loss_percentage: read(STOP_LOSS_PERCENTAGE_KEY, defaults.stop_loss_percentage),
            take_profit_percentage: read(
                TAKE_PROFIT_PERCENTAGE_KEY,
                defaults.take_profit_percentage,
            ),
        }
    }

    /// Write all four values back
    pub fn save(&self, store: &impl KeyValueStore) -> Result<()> {
        store.set_item(MAX_TRADE_AMOUNT_KEY, &self.max_trade_amount)?;
        store.set_item(RISK_PERCENTAGE_KEY, &self.risk_percentage)?;
        store.set_item(STOP_LOSS_PERCENTAGE_KEY, &self.stop_loss_percentage)?;
        store.set_item(TAKE_PROFIT_PERCENTAGE_KEY, &self.take_profit_percentage)?;
        Ok(())
    }
}
