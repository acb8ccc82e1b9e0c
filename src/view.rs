//! Rendering surface abstraction
//!
//! The controller never touches the DOM directly; it talks to a
//! [`DashboardView`]. The browser implementation lives in `web.rs`.

use std::rc::Rc;

use uuid::Uuid;

use crate::dashboard::format::escape_html;
use crate::settings::Settings;

/// Containers whose content is replaced wholesale on refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Balance,
    MarketAnalysis,
    Chart,
    /// Sidebar list of open orders
    OpenOrders,
    /// Orders tab
    Orders,
    History,
}

impl Container {
    pub const ALL: [Container; 6] = [
        Container::Balance,
        Container::MarketAnalysis,
        Container::Chart,
        Container::OpenOrders,
        Container::Orders,
        Container::History,
    ];

    /// DOM id of the element
    pub fn element_id(self) -> &'static str {
        match self {
            Container::Balance => "balance-container",
            Container::MarketAnalysis => "market-analysis-container",
            Container::Chart => "trading-chart",
            Container::OpenOrders => "open-orders-container",
            Container::Orders => "orders-container",
            Container::History => "history-container",
        }
    }
}

/// Buttons that lock while their request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    AutoTrade,
    AutoTradeBackground,
}

impl Button {
    pub fn element_id(self) -> &'static str {
        match self {
            Button::AutoTrade => "auto-trade-btn-advanced",
            Button::AutoTradeBackground => "auto-trade-background-btn",
        }
    }

    pub fn idle_html(self) -> &'static str {
        match self {
            Button::AutoTrade => r#"<i class="bi bi-lightning-charge"></i> Auto Trade"#,
            Button::AutoTradeBackground => r#"<i class="bi bi-clock-history"></i> Schedule Auto Trade"#,
        }
    }

    pub fn busy_html(self) -> &'static str {
        match self {
            Button::AutoTrade => r#"<i class="bi bi-arrow-repeat"></i> Analyzing..."#,
            Button::AutoTradeBackground => r#"<i class="bi bi-arrow-repeat"></i> Scheduling..."#,
        }
    }
}

/// Toast severity, mapped onto Bootstrap alert classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Danger,
}

impl ToastKind {
    pub fn css_suffix(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Info => "info",
            ToastKind::Warning => "warning",
            ToastKind::Danger => "danger",
        }
    }
}

/// Transient notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Danger, message)
    }

    pub fn element_id(&self) -> String {
        format!("toast-{}", self.id)
    }

    pub fn class_name(&self) -> String {
        format!("alert alert-{} alert-dismissible fade show", self.kind.css_suffix())
    }

    /// Inner markup: escaped message plus a dismiss button
    pub fn inner_html(&self) -> String {
        format!(
            r#"{}<button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>"#,
            escape_html(&self.message)
        )
    }
}

/// Everything the controller may do to the page
pub trait DashboardView {
    /// Replace the full content of a container; missing containers are ignored
    fn render(&self, container: Container, html: &str);

    fn set_chart_title(&self, title: &str);

    /// Show a toast that dismisses itself after the configured timeout
    fn notify(&self, toast: Toast);

    fn set_busy(&self, button: Button, busy: bool);

    fn reset_order_form(&self);

    fn show_price_field(&self, visible: bool);

    fn fill_settings_form(&self, settings: &Settings);

    /// Point both auto-trade buttons at `pair`
    fn set_auto_trade_pair(&self, pair: &str);
}

impl<T: DashboardView + ?Sized> DashboardView for Rc<T> {
    fn render(&self, container: Container, html: &str) {
        (**self).render(container, html);
    }

    fn set_chart_title(&self, title: &str) {
        (**self).set_chart_title(title);
    }

    fn notify(&self, toast: Toast) {
        (**self).notify(toast);
    }

    fn set_busy(&self, button: Button, busy: bool) {
        (**self).set_busy(button, busy);
    }

    fn reset_order_form(&self) {
        (**self).reset_order_form();
    }

    fn show_price_field(&self, visible: bool) {
        (**self).show_price_field(visible);
    }

    fn fill_settings_form(&self, settings: &Settings) {
        (**self).fill_settings_form(settings);
    }

    fn set_auto_trade_pair(&self, pair: &str) {
        (**self).set_auto_trade_pair(pair);
    }
}

/// Keeps a button disabled until dropped.
///
/// Dropping happens on every exit path of the owning scope, including `?`
/// early returns, so the button cannot stay locked.
pub struct ButtonGuard<'a, V: DashboardView + ?Sized> {
    view: &'a V,
    button: Button,
}

impl<'a, V: DashboardView + ?Sized> ButtonGuard<'a, V> {
    pub fn lock(view: &'a V, button: Button) -> Self {
        view.set_busy(button, true);
        Self { view, button }
    }
}

impl<V: DashboardView + ?Sized> Drop for ButtonGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_busy(self.button, false);
    }
}
