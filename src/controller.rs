//! Dashboard controller
//!
//! Owns the dashboard state and turns [`Command`]s into API calls and view
//! updates. Every operation handles its own failures: errors are logged and
//! shown as a danger toast, and never escape `dispatch`.
//!
//! State lives in a `RefCell` and is never borrowed across an `.await`;
//! refreshes take a sequencer ticket first so that only the newest response
//! per endpoint is applied.

use std::cell::RefCell;

use chrono::Local;
use tracing::{debug, error, info};

use crate::chart::{ChartPoint, ChartState};
use crate::client::DashboardApi;
use crate::command::{Command, RefreshTarget};
use crate::config::{ChartSource, Config};
use crate::dashboard::analysis::render_analysis;
use crate::dashboard::balance::render_balance;
use crate::dashboard::chart::render_chart;
use crate::dashboard::format::format_epoch;
use crate::dashboard::history::render_history;
use crate::dashboard::orders::render_open_orders;
use crate::error::{DashboardError, Result};
use crate::sequence::{Endpoint, RequestSequencer, Ticket};
use crate::settings::{KeyValueStore, Settings};
use crate::types::{AutoTradeOutcome, OrderForm, OrderKind, OrderRequest};
use crate::view::{Button, ButtonGuard, Container, DashboardView, Toast};

/// Mutable per-page state
#[derive(Debug)]
pub struct DashboardState {
    /// Selected pair; `None` until the user picks one
    pub pair: Option<String>,
    pub order_kind: OrderKind,
    pub chart: ChartState,
}

/// The dashboard: one instance per page
pub struct Dashboard<A, V, S> {
    config: Config,
    api: A,
    view: V,
    store: S,
    state: RefCell<DashboardState>,
    sequencer: RequestSequencer,
}

impl<A, V, S> Dashboard<A, V, S>
where
    A: DashboardApi,
    V: DashboardView,
    S: KeyValueStore,
{
    pub fn new(config: Config, api: A, view: V, store: S) -> Self {
        let state = DashboardState {
            pair: None,
            order_kind: OrderKind::Market,
            chart: ChartState::new(config.chart_source, config.chart_window),
        };
        Self {
            config,
            api,
            view,
            store,
            state: RefCell::new(state),
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Selected pair, or the configured default when unset or blank
    pub fn selected_pair(&self) -> String {
        self.state
            .borrow()
            .pair
            .clone()
            .unwrap_or_else(|| self.config.default_pair.clone())
    }

    /// Single entry point for platform events
    pub async fn dispatch(&self, command: Command) {
        match command {
            Command::Tick => debug!(command = command.name(), "dispatch"),
            _ => info!(command = command.name(), "dispatch"),
        }

        match command {
            Command::Init => self.init().await,
            Command::Tick => self.tick().await,
            Command::Refresh(target) => self.refresh(target).await,
            Command::SelectPair(pair) => self.select_pair(&pair).await,
            Command::SetOrderKind(kind) => self.set_order_kind(kind),
            Command::PlaceOrder(form) => self.place_order(&form).await,
            Command::CancelOrder(id) => self.cancel_order(&id).await,
            Command::AutoTrade { pair } => self.auto_trade(pair.as_deref()).await,
            Command::AutoTradeBackground { pair } => {
                self.auto_trade_background(pair.as_deref()).await;
            }
            Command::LoadSettings => self.load_settings(),
            Command::SaveSettings(settings) => self.save_settings(&settings),
        }
    }

    /// Load settings, sync the order form and the controls with the current
    /// state, then fill every container
    pub async fn init(&self) {
        self.load_settings();
        let order_kind = self.state.borrow().order_kind;
        self.view.show_price_field(order_kind == OrderKind::Limit);
        let pair = self.selected_pair();
        self.view.set_auto_trade_pair(&pair);
        self.view.set_chart_title(&pair);
        self.tick().await;
    }

    /// Refresh every container concurrently
    pub async fn tick(&self) {
        futures::join!(
            self.refresh_balance(),
            self.refresh_analysis(),
            self.refresh_chart(),
            self.refresh_orders(),
            self.refresh_history()
        );
    }

    pub async fn refresh(&self, target: RefreshTarget) {
        match target {
            RefreshTarget::Balance => self.refresh_balance().await,
            RefreshTarget::Market => self.refresh_analysis().await,
            RefreshTarget::Chart => self.refresh_chart().await,
            RefreshTarget::Orders => self.refresh_orders().await,
            RefreshTarget::History => self.refresh_history().await,
        }
    }

    pub async fn refresh_balance(&self) {
        let ticket = self.sequencer.issue(Endpoint::Balance);
        let result = self.api.balance().await;
        let Some(balance) = self.accept(ticket, result, "Error loading balance") else {
            return;
        };
        let html = render_balance(
            &balance,
            self.config.balance_layout,
            self.config.balance_threshold,
        );
        self.view.render(Container::Balance, &html);
    }

    pub async fn refresh_analysis(&self) {
        let pair = self.selected_pair();
        let ticket = self.sequencer.issue(Endpoint::Analysis);
        let result = self.api.analysis(&pair).await;
        let Some(analysis) = self.accept(ticket, result, "Error loading market analysis") else {
            return;
        };
        self.view
            .render(Container::MarketAnalysis, &render_analysis(&analysis));
    }

    /// Fetch the latest price (or candle series) and redraw the chart
    pub async fn refresh_chart(&self) {
        let pair = self.selected_pair();
        let source = self.state.borrow().chart.source;
        let ticket = self.sequencer.issue(Endpoint::Chart);

        match source {
            ChartSource::Ticker => {
                let result = self.api.ticker(&pair).await.and_then(|ticker| {
                    ticker
                        .last_price()
                        .ok_or_else(|| DashboardError::Malformed("ticker has no last trade".into()))
                });
                let Some(price) = self.accept(ticket, result, "Error loading price") else {
                    return;
                };

                let label = Local::now().format("%H:%M:%S").to_string();
                let points = {
                    let mut state = self.state.borrow_mut();
                    state.chart.live.push(label, price);
                    state.chart.visible_points()
                };
                self.view.render(Container::Chart, &render_chart(&points));
                self.view.set_chart_title(&format!("{pair} - {price:.2}"));
            }
            ChartSource::Ohlc => {
                let result = self.api.ohlc(&pair).await;
                let Some(candles) = self.accept(ticket, result, "Error loading chart") else {
                    return;
                };

                let series: Vec<ChartPoint> = candles
                    .iter()
                    .map(|candle| ChartPoint {
                        label: format_epoch(candle.time, &Local, "%d/%m %H:%M"),
                        price: candle.close,
                    })
                    .collect();
                let points = {
                    let mut state = self.state.borrow_mut();
                    state.chart.series = series;
                    state.chart.visible_points()
                };
                self.view.render(Container::Chart, &render_chart(&points));
                self.view.set_chart_title(&format!("{pair} chart"));
            }
        }
    }

    /// Same fragment goes to the orders tab and the sidebar
    pub async fn refresh_orders(&self) {
        let ticket = self.sequencer.issue(Endpoint::Orders);
        let result = self.api.open_orders().await;
        let Some(orders) = self.accept(ticket, result, "Error loading orders") else {
            return;
        };
        let html = render_open_orders(&orders);
        self.view.render(Container::Orders, &html);
        self.view.render(Container::OpenOrders, &html);
    }

    pub async fn refresh_history(&self) {
        let ticket = self.sequencer.issue(Endpoint::History);
        let result = self.api.history().await;
        let Some(entries) = self.accept(ticket, result, "Error loading history") else {
            return;
        };
        self.view
            .render(Container::History, &render_history(&entries, &Local));
    }

    /// Switch pair: drop the old chart and reload analysis and chart
    pub async fn select_pair(&self, pair: &str) {
        let pair = pair.trim();
        {
            let mut state = self.state.borrow_mut();
            state.pair = (!pair.is_empty()).then(|| pair.to_string());
            state.chart.reset();
        }

        let pair = self.selected_pair();
        self.view.set_chart_title(&pair);
        self.view.set_auto_trade_pair(&pair);
        self.view.render(Container::Chart, &render_chart(&[]));

        futures::join!(self.refresh_analysis(), self.refresh_chart());
    }

    /// The price field is only shown for limit orders
    pub fn set_order_kind(&self, kind: OrderKind) {
        self.state.borrow_mut().order_kind = kind;
        self.view.show_price_field(kind == OrderKind::Limit);
    }

    pub async fn place_order(&self, form: &OrderForm) {
        let request = match OrderRequest::from_form(form) {
            Ok(request) => request,
            Err(e) => {
                self.report("Invalid order", &e);
                return;
            }
        };

        info!(
            pair = %request.pair,
            side = %request.order_type,
            volume = request.volume,
            "placing order"
        );

        if let Err(e) = self.api.place_order(&request).await {
            self.report("Error placing order", &e);
            return;
        }

        self.view.notify(Toast::success("Order placed successfully"));
        self.view.reset_order_form();
        self.set_order_kind(OrderKind::Market);
        futures::join!(self.refresh_orders(), self.refresh_balance());
    }

    pub async fn cancel_order(&self, order_id: &str) {
        info!(order_id, "cancelling order");

        if let Err(e) = self.api.cancel_order(order_id).await {
            self.report("Error cancelling order", &e);
            return;
        }

        self.view.notify(Toast::success("Order cancelled successfully"));
        self.refresh_orders().await;
    }

    /// Ask the backend to decide and execute a trade now
    pub async fn auto_trade(&self, pair: Option<&str>) {
        let pair = self.pair_or_selected(pair);
        info!(pair = %pair, "auto-trade requested");

        let result = {
            let _busy = ButtonGuard::lock(&self.view, Button::AutoTrade);
            self.api.auto_trade(&pair).await
        };

        match result {
            Ok(AutoTradeOutcome::Executed { side, volume, price }) => {
                info!(pair = %pair, side = %side, volume, price, "auto-trade executed");
                self.view.notify(Toast::success(format!(
                    "Auto-trade executed: {side} {volume:.8} {pair} at {price:.2}"
                )));
                futures::join!(self.refresh_balance(), self.refresh_orders());
            }
            Ok(AutoTradeOutcome::NoTrade { reason }) => {
                info!(pair = %pair, reason = %reason, "auto-trade skipped");
                self.view.notify(Toast::info(format!("No trade: {reason}")));
            }
            Err(e) => self.report("Error during auto-trade", &e),
        }
    }

    /// Queue an auto-trade evaluation on the backend
    pub async fn auto_trade_background(&self, pair: Option<&str>) {
        let pair = self.pair_or_selected(pair);
        info!(pair = %pair, "background auto-trade requested");

        let result = {
            let _busy = ButtonGuard::lock(&self.view, Button::AutoTradeBackground);
            self.api.schedule_auto_trade(&pair).await
        };

        match result {
            Ok(message) => self.view.notify(Toast::success(message)),
            Err(e) => self.report("Error scheduling auto-trade", &e),
        }
    }

    pub fn load_settings(&self) {
        let settings = Settings::load(&self.store);
        self.view.fill_settings_form(&settings);
    }

    pub fn save_settings(&self, settings: &Settings) {
        match settings.save(&self.store) {
            Ok(()) => self.view.notify(Toast::success("Settings saved")),
            Err(e) => self.report("Error saving settings", &e),
        }
    }

    fn pair_or_selected(&self, pair: Option<&str>) -> String {
        pair.map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.selected_pair())
    }

    /// Apply a response only if its ticket is still current
    fn accept<T>(&self, ticket: Ticket, result: Result<T>, context: &str) -> Option<T> {
        if !self.sequencer.is_current(ticket) {
            debug!(
                endpoint = ?ticket.endpoint,
                seq = ticket.seq,
                ok = result.is_ok(),
                "discarding stale response"
            );
            return None;
        }
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.report(context, &e);
                None
            }
        }
    }

    /// Log a failure and show it as a danger toast
    fn report(&self, context: &str, err: &DashboardError) {
        error!(context, error = %err, "operation failed");
        self.view.notify(Toast::danger(format!("{context}: {err}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::rc::Rc;

    use futures::channel::oneshot;
    use serde_json::{Value, json};

    use crate::config::BalanceLayout;
    use crate::settings::{MemoryStore, RISK_PERCENTAGE_KEY};
    use crate::types::{
        BalanceMap, Candle, HistoryEntry, HistoryPayload, MarketAnalysis, OpenOrder,
        OpenOrdersPayload, OrderSide, Ticker,
    };
    use crate::view::ToastKind;
    use std::collections::BTreeMap;

    type Log = Rc<RefCell<Vec<String>>>;

    enum Reply {
        Ok(Value),
        Err(&'static str),
        Wait(oneshot::Receiver<Value>),
    }

    impl Reply {
        async fn resolve(self) -> Result<Value> {
            match self {
                Reply::Ok(value) => Ok(value),
                Reply::Err(message) => Err(DashboardError::Api(message.to_string())),
                Reply::Wait(rx) => rx
                    .await
                    .map_err(|_| DashboardError::Http("request aborted".into())),
            }
        }
    }

    #[derive(Clone, Default)]
    struct MockApi {
        log: Log,
        replies: Rc<RefCell<HashMap<&'static str, VecDeque<Reply>>>>,
    }

    impl MockApi {
        fn script(&self, endpoint: &'static str, reply: Reply) {
            self.replies
                .borrow_mut()
                .entry(endpoint)
                .or_default()
                .push_back(reply);
        }

        async fn call(&self, endpoint: &'static str, detail: &str) -> Result<Value> {
            self.log.borrow_mut().push(format!("api:{endpoint}{detail}"));
            let reply = self
                .replies
                .borrow_mut()
                .get_mut(endpoint)
                .and_then(VecDeque::pop_front);
            match reply {
                Some(reply) => reply.resolve().await,
                None => Err(DashboardError::Api(format!("{endpoint} not scripted"))),
            }
        }
    }

    impl DashboardApi for MockApi {
        async fn balance(&self) -> Result<BalanceMap> {
            Ok(serde_json::from_value(self.call("balance", "").await?)?)
        }

        async fn analysis(&self, pair: &str) -> Result<MarketAnalysis> {
            Ok(serde_json::from_value(self.call("analysis", &format!(":{pair}")).await?)?)
        }

        async fn ticker(&self, pair: &str) -> Result<Ticker> {
            Ok(serde_json::from_value(self.call("ticker", &format!(":{pair}")).await?)?)
        }

        async fn ohlc(&self, pair: &str) -> Result<Vec<Candle>> {
            let rows: Vec<Vec<Value>> =
                serde_json::from_value(self.call("ohlc", &format!(":{pair}")).await?)?;
            Ok(Candle::from_rows(&rows))
        }

        async fn open_orders(&self) -> Result<BTreeMap<String, OpenOrder>> {
            let payload: OpenOrdersPayload = serde_json::from_value(self.call("orders", "").await?)?;
            Ok(payload.into_orders())
        }

        async fn history(&self) -> Result<Vec<HistoryEntry>> {
            let payload: HistoryPayload = serde_json::from_value(self.call("history", "").await?)?;
            Ok(payload.into_entries())
        }

        async fn place_order(&self, order: &OrderRequest) -> Result<()> {
            let body = serde_json::to_string(order)?;
            self.call("place_order", &format!(":{body}")).await?;
            Ok(())
        }

        async fn cancel_order(&self, order_id: &str) -> Result<()> {
            self.call("cancel_order", &format!(":{order_id}")).await?;
            Ok(())
        }

        async fn auto_trade(&self, pair: &str) -> Result<AutoTradeOutcome> {
            AutoTradeOutcome::from_value(self.call("auto_trade", &format!(":{pair}")).await?)
        }

        async fn schedule_auto_trade(&self, pair: &str) -> Result<String> {
            let value = self.call("schedule_auto_trade", &format!(":{pair}")).await?;
            Ok(value.as_str().unwrap_or_default().to_string())
        }
    }

    #[derive(Default)]
    struct MockView {
        log: Log,
        rendered: RefCell<Vec<(Container, String)>>,
        toasts: RefCell<Vec<Toast>>,
        titles: RefCell<Vec<String>>,
        settings: RefCell<Option<Settings>>,
    }

    impl MockView {
        fn last_render(&self, container: Container) -> Option<String> {
            self.rendered
                .borrow()
                .iter()
                .rev()
                .find(|(c, _)| *c == container)
                .map(|(_, html)| html.clone())
        }

        fn toast_messages(&self, kind: ToastKind) -> Vec<String> {
            self.toasts
                .borrow()
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| t.message.clone())
                .collect()
        }
    }

    impl DashboardView for MockView {
        fn render(&self, container: Container, html: &str) {
            self.log
                .borrow_mut()
                .push(format!("render:{}", container.element_id()));
            self.rendered.borrow_mut().push((container, html.to_string()));
        }

        fn set_chart_title(&self, title: &str) {
            self.titles.borrow_mut().push(title.to_string());
        }

        fn notify(&self, toast: Toast) {
            self.toasts.borrow_mut().push(toast);
        }

        fn set_busy(&self, button: Button, busy: bool) {
            self.log
                .borrow_mut()
                .push(format!("busy:{}:{busy}", button.element_id()));
        }

        fn reset_order_form(&self) {
            self.log.borrow_mut().push("reset_form".to_string());
        }

        fn show_price_field(&self, visible: bool) {
            self.log.borrow_mut().push(format!("price_field:{visible}"));
        }

        fn fill_settings_form(&self, settings: &Settings) {
            *self.settings.borrow_mut() = Some(settings.clone());
        }

        fn set_auto_trade_pair(&self, pair: &str) {
            self.log.borrow_mut().push(format!("auto_trade_pair:{pair}"));
        }
    }

    type TestDashboard = Dashboard<MockApi, Rc<MockView>, MemoryStore>;

    fn setup_with(config: Config) -> (MockApi, Rc<MockView>, TestDashboard, Log) {
        let log: Log = Rc::default();
        let api = MockApi {
            log: Rc::clone(&log),
            ..MockApi::default()
        };
        let view = Rc::new(MockView {
            log: Rc::clone(&log),
            ..MockView::default()
        });
        let dashboard = Dashboard::new(config, api.clone(), Rc::clone(&view), MemoryStore::new());
        (api, view, dashboard, log)
    }

    fn setup() -> (MockApi, Rc<MockView>, TestDashboard, Log) {
        setup_with(Config::default())
    }

    fn position(log: &Log, entry: &str) -> usize {
        log.borrow()
            .iter()
            .position(|e| e == entry)
            .unwrap_or_else(|| panic!("{entry} not in {:?}", log.borrow()))
    }

    fn analysis_json() -> Value {
        json!({
            "trend": "bullish",
            "recommendation": "buy",
            "confidence": 0.837,
            "indicators": {
                "rsi": 55.0,
                "macd": {"macd": 1.0, "signal": 0.5, "histogram": 0.5},
                "bollinger_bands": {"upper": 3.0, "middle": 2.0, "lower": 1.0}
            },
            "support_levels": [],
            "resistance_levels": []
        })
    }

    #[tokio::test]
    async fn test_tick_refreshes_every_container() {
        let (api, view, dashboard, log) = setup();
        api.script("balance", Reply::Ok(json!({"ZUSD": "100.0"})));
        api.script("analysis", Reply::Ok(analysis_json()));
        api.script("ticker", Reply::Ok(json!({"c": ["50000.0", "1"]})));
        api.script("orders", Reply::Ok(json!({})));
        api.script("history", Reply::Ok(json!([])));

        dashboard.dispatch(Command::Tick).await;

        for call in ["api:balance", "api:analysis:BTCUSD", "api:ticker:BTCUSD", "api:orders", "api:history"] {
            position(&log, call);
        }
        assert!(view.last_render(Container::Balance).unwrap().contains("USD"));
        assert!(view.last_render(Container::MarketAnalysis).unwrap().contains("83.7%"));
        assert!(view.last_render(Container::Chart).unwrap().contains("<polyline"));
        assert_eq!(view.last_render(Container::Orders), view.last_render(Container::OpenOrders));
        assert!(view.last_render(Container::OpenOrders).unwrap().contains("No open orders"));
        assert!(view.last_render(Container::History).unwrap().contains("No trade history available"));
        assert_eq!(view.titles.borrow().last().unwrap(), "BTCUSD - 50000.00");
        assert!(view.toasts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_content_and_toasts() {
        let (api, view, dashboard, _log) = setup();
        api.script("balance", Reply::Ok(json!({"ZUSD": "100.0"})));
        api.script("balance", Reply::Err("Erreur lors de la récupération du solde"));

        dashboard.refresh_balance().await;
        dashboard.refresh_balance().await;

        assert_eq!(view.rendered.borrow().len(), 1);
        assert_eq!(
            view.toast_messages(ToastKind::Danger),
            vec!["Error loading balance: Erreur lors de la récupération du solde"]
        );
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let (api, view, dashboard, _log) = setup();
        let (slow_tx, slow_rx) = oneshot::channel();
        api.script("balance", Reply::Wait(slow_rx));
        api.script("balance", Reply::Ok(json!({"ZUSD": "200.0"})));

        futures::join!(dashboard.refresh_balance(), async {
            dashboard.refresh_balance().await;
            slow_tx.send(json!({"ZUSD": "100.0"})).unwrap();
        });

        let rendered = view.rendered.borrow();
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].1.contains("200.00000000"));
    }

    #[tokio::test]
    async fn test_stale_failure_is_not_reported() {
        let (api, view, dashboard, _log) = setup();
        let (slow_tx, slow_rx) = oneshot::channel::<Value>();
        api.script("orders", Reply::Wait(slow_rx));
        api.script("orders", Reply::Ok(json!({})));

        futures::join!(dashboard.refresh_orders(), async {
            dashboard.refresh_orders().await;
            drop(slow_tx);
        });

        assert!(view.toasts.borrow().is_empty());
        assert!(view.last_render(Container::Orders).unwrap().contains("No open orders"));
    }

    #[tokio::test]
    async fn test_market_order_flow() {
        let (api, view, dashboard, log) = setup();
        api.script("place_order", Reply::Ok(Value::Null));
        api.script("orders", Reply::Ok(json!({})));
        api.script("balance", Reply::Ok(json!({})));

        let form = OrderForm {
            pair: "BTCUSD".into(),
            side: OrderSide::Sell,
            kind: OrderKind::Market,
            volume: "0.25".into(),
            price: "123".into(),
        };
        dashboard.dispatch(Command::PlaceOrder(form)).await;

        let sent = log
            .borrow()
            .iter()
            .find(|e| e.starts_with("api:place_order:"))
            .cloned()
            .unwrap();
        assert!(sent.contains(r#""order_type":"sell""#));
        assert!(!sent.contains("price"));

        assert_eq!(view.toast_messages(ToastKind::Success), vec!["Order placed successfully"]);
        position(&log, "reset_form");
        position(&log, "price_field:false");
        position(&log, "api:orders");
        position(&log, "api:balance");
    }

    #[tokio::test]
    async fn test_invalid_order_is_not_sent() {
        let (_api, view, dashboard, log) = setup();
        let form = OrderForm {
            pair: "BTCUSD".into(),
            side: OrderSide::Buy,
            kind: OrderKind::Limit,
            volume: "1".into(),
            price: String::new(),
        };
        dashboard.place_order(&form).await;

        assert!(!log.borrow().iter().any(|e| e.starts_with("api:")));
        assert_eq!(view.toast_messages(ToastKind::Danger).len(), 1);
    }

    #[tokio::test]
    async fn test_order_rejection_shows_server_message() {
        let (api, view, dashboard, log) = setup();
        api.script("place_order", Reply::Err("EOrder:Insufficient funds"));

        let form = OrderForm {
            pair: "BTCUSD".into(),
            side: OrderSide::Buy,
            kind: OrderKind::Market,
            volume: "1".into(),
            price: String::new(),
        };
        dashboard.place_order(&form).await;

        assert_eq!(
            view.toast_messages(ToastKind::Danger),
            vec!["Error placing order: EOrder:Insufficient funds"]
        );
        assert!(!log.borrow().contains(&"reset_form".to_string()));
    }

    #[tokio::test]
    async fn test_auto_trade_executed() {
        let (api, view, dashboard, log) = setup();
        api.script(
            "auto_trade",
            Reply::Ok(json!({"status": "success", "type": "buy", "volume": "0.01", "price": 50000.0})),
        );
        api.script("balance", Reply::Ok(json!({})));
        api.script("orders", Reply::Ok(json!({})));

        dashboard.dispatch(Command::AutoTrade { pair: None }).await;

        let locked = position(&log, "busy:auto-trade-btn-advanced:true");
        let called = position(&log, "api:auto_trade:BTCUSD");
        let released = position(&log, "busy:auto-trade-btn-advanced:false");
        assert!(locked < called && called < released);

        assert_eq!(
            view.toast_messages(ToastKind::Success),
            vec!["Auto-trade executed: BUY 0.01000000 BTCUSD at 50000.00"]
        );
        position(&log, "api:balance");
        position(&log, "api:orders");
    }

    #[tokio::test]
    async fn test_auto_trade_no_trade_releases_button() {
        let (api, view, dashboard, log) = setup();
        api.script("auto_trade", Reply::Ok(json!({"action": "hold", "reason": "low confidence"})));

        dashboard.auto_trade(Some("ETHUSD")).await;

        position(&log, "api:auto_trade:ETHUSD");
        position(&log, "busy:auto-trade-btn-advanced:false");
        assert_eq!(view.toast_messages(ToastKind::Info), vec!["No trade: low confidence"]);
        assert!(!log.borrow().contains(&"api:balance".to_string()));
    }

    #[tokio::test]
    async fn test_auto_trade_error_releases_button() {
        let (api, view, dashboard, log) = setup();
        api.script("auto_trade", Reply::Err("Market closed"));

        dashboard.auto_trade(None).await;

        let released = position(&log, "busy:auto-trade-btn-advanced:false");
        assert!(position(&log, "api:auto_trade:BTCUSD") < released);
        assert_eq!(
            view.toast_messages(ToastKind::Danger),
            vec!["Error during auto-trade: Market closed"]
        );
    }

    #[tokio::test]
    async fn test_background_auto_trade() {
        let (api, view, dashboard, log) = setup();
        api.script("schedule_auto_trade", Reply::Ok(json!("Auto-trade scheduled for BTCUSD")));

        dashboard
            .dispatch(Command::AutoTradeBackground { pair: Some("  ".into()) })
            .await;

        assert!(
            position(&log, "busy:auto-trade-background-btn:true")
                < position(&log, "busy:auto-trade-background-btn:false")
        );
        assert_eq!(
            view.toast_messages(ToastKind::Success),
            vec!["Auto-trade scheduled for BTCUSD"]
        );
    }

    #[tokio::test]
    async fn test_cancel_order_refreshes_orders() {
        let (api, view, dashboard, log) = setup();
        api.script("cancel_order", Reply::Ok(Value::Null));
        api.script("orders", Reply::Ok(json!({})));

        dashboard
            .dispatch(Command::CancelOrder("OQCLML-BW3P3-BUCMWZ".into()))
            .await;

        assert!(position(&log, "api:cancel_order:OQCLML-BW3P3-BUCMWZ") < position(&log, "api:orders"));
        assert_eq!(view.toast_messages(ToastKind::Success), vec!["Order cancelled successfully"]);
    }

    #[tokio::test]
    async fn test_select_pair_resets_chart() {
        let (api, view, dashboard, log) = setup();
        api.script("ticker", Reply::Ok(json!({"c": ["50000.0", "1"]})));
        dashboard.refresh_chart().await;
        assert_eq!(dashboard.state.borrow().chart.live.len(), 1);

        api.script("analysis", Reply::Ok(analysis_json()));
        api.script("ticker", Reply::Ok(json!({"c": ["2000.5", "1"]})));
        dashboard.dispatch(Command::SelectPair("ETHUSD".into())).await;

        let state = dashboard.state.borrow();
        assert_eq!(state.pair.as_deref(), Some("ETHUSD"));
        assert_eq!(state.chart.live.prices().collect::<Vec<_>>(), vec![2000.5]);
        position(&log, "auto_trade_pair:ETHUSD");
        position(&log, "api:analysis:ETHUSD");
        assert_eq!(view.titles.borrow().last().unwrap(), "ETHUSD - 2000.50");
    }

    #[tokio::test]
    async fn test_blank_pair_falls_back_to_default() {
        let (api, _view, dashboard, log) = setup();
        api.script("analysis", Reply::Ok(analysis_json()));
        api.script("ticker", Reply::Ok(json!({"c": ["1.0"]})));

        dashboard.select_pair("   ").await;

        assert_eq!(dashboard.selected_pair(), "BTCUSD");
        position(&log, "api:ticker:BTCUSD");
    }

    #[tokio::test]
    async fn test_chart_window_is_bounded() {
        let (api, _view, dashboard, _log) = setup();
        for i in 0..31 {
            api.script("ticker", Reply::Ok(json!({"c": [format!("{i}.0")]})));
        }
        for _ in 0..31 {
            dashboard.refresh_chart().await;
        }

        let state = dashboard.state.borrow();
        assert_eq!(state.chart.live.len(), 30);
        assert_eq!(state.chart.live.prices().next(), Some(1.0));
    }

    #[tokio::test]
    async fn test_ohlc_chart_source() {
        let config = Config {
            chart_source: ChartSource::Ohlc,
            ..Config::default()
        };
        let (api, view, dashboard, _log) = setup_with(config);
        api.script(
            "ohlc",
            Reply::Ok(json!([
                [1_700_000_000, "1.0", "2.0", "0.5", "1.5"],
                [1_700_003_600, "1.5", "2.5", "1.0", "2.0"]
            ])),
        );

        dashboard.refresh(RefreshTarget::Chart).await;

        assert_eq!(dashboard.state.borrow().chart.series.len(), 2);
        assert!(view.last_render(Container::Chart).unwrap().contains(">2.00</text>"));
        assert_eq!(view.titles.borrow().last().unwrap(), "BTCUSD chart");
    }

    #[tokio::test]
    async fn test_table_balance_layout() {
        let config = Config {
            balance_layout: BalanceLayout::Table,
            ..Config::default()
        };
        let (api, view, dashboard, _log) = setup_with(config);
        api.script("balance", Reply::Ok(json!({"XXBT": "0.5", "ZUSD": "0"})));

        dashboard.refresh(RefreshTarget::Balance).await;

        let html = view.last_render(Container::Balance).unwrap();
        assert!(html.contains("<td>BTC</td><td>0.500000</td>"));
        assert!(!html.contains("USD"));
    }

    #[tokio::test]
    async fn test_order_kind_toggles_price_field() {
        let (_api, _view, dashboard, log) = setup();
        dashboard.dispatch(Command::SetOrderKind(OrderKind::Limit)).await;
        dashboard.dispatch(Command::SetOrderKind(OrderKind::Market)).await;

        assert_eq!(*log.borrow(), vec!["price_field:true", "price_field:false"]);
    }

    #[tokio::test]
    async fn test_init_applies_order_kind() {
        let (_api, _view, dashboard, log) = setup();
        dashboard.dispatch(Command::Init).await;
        assert!(log.borrow().iter().any(|e| e == "price_field:false"));

        dashboard.set_order_kind(OrderKind::Limit);
        log.borrow_mut().clear();
        dashboard.dispatch(Command::Init).await;
        assert!(log.borrow().iter().any(|e| e == "price_field:true"));
        assert!(!log.borrow().iter().any(|e| e == "price_field:false"));
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let (_api, view, dashboard, _log) = setup();
        let settings = Settings {
            risk_percentage: "3".into(),
            ..Settings::default()
        };

        dashboard.dispatch(Command::SaveSettings(settings.clone())).await;
        assert_eq!(view.toast_messages(ToastKind::Success), vec!["Settings saved"]);
        assert_eq!(
            dashboard.store.get_item(RISK_PERCENTAGE_KEY).unwrap().as_deref(),
            Some("3")
        );

        dashboard.dispatch(Command::LoadSettings).await;
        assert_eq!(view.settings.borrow().as_ref(), Some(&settings));
    }
}
