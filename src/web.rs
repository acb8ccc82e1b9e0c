//! Browser binding
//!
//! Wires the DOM to a [`Dashboard`]: a [`DomView`] renders into the page,
//! `localStorage` backs the settings, and every DOM event is translated into
//! a [`Command`] dispatched on the browser event loop.

use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlButtonElement, HtmlFormElement,
    HtmlInputElement, HtmlSelectElement, Storage, Window,
};

use crate::client::ApiClient;
use crate::command::{Command, RefreshTarget};
use crate::config::Config;
use crate::controller::Dashboard;
use crate::error::{DashboardError, Result};
use crate::settings::{KeyValueStore, Settings};
use crate::types::{OrderForm, OrderKind};
use crate::view::{Button, Container, DashboardView, Toast};

type WebDashboard = Dashboard<ApiClient, Rc<DomView>, LocalStorageStore>;

/// Delay between fading a toast out and removing it
const TOAST_FADE_MS: i32 = 500;

fn dom_err(err: JsValue) -> DashboardError {
    DashboardError::Dom(format!("{err:?}"))
}

fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| DashboardError::Dom("no window".into()))
}

fn millis(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

/// `localStorage` as a [`KeyValueStore`]
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn new(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            warn!("localStorage unavailable, settings will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| DashboardError::Storage("localStorage unavailable".into()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| DashboardError::Storage(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| DashboardError::Storage(format!("{e:?}")))
    }
}

/// Renders into the host page's elements
pub struct DomView {
    window: Window,
    document: Document,
    toast_timeout_ms: u32,
}

impl DomView {
    pub fn new(window: Window, document: Document, toast_timeout_ms: u32) -> Self {
        Self {
            window,
            document,
            toast_timeout_ms,
        }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn typed<T: JsCast>(&self, id: &str) -> Option<T> {
        self.element(id).and_then(|el| el.dyn_into::<T>().ok())
    }

    fn set_input(&self, id: &str, value: &str) {
        if let Some(input) = self.typed::<HtmlInputElement>(id) {
            input.set_value(value);
        }
    }

    fn show_toast(&self, toast: &Toast) -> Result<()> {
        let Some(container) = self.element("alerts-container") else {
            return Ok(());
        };
        let alert = self.document.create_element("div").map_err(dom_err)?;
        alert.set_id(&toast.element_id());
        alert.set_class_name(&toast.class_name());
        alert.set_attribute("role", "alert").map_err(dom_err)?;
        alert.set_inner_html(&toast.inner_html());
        container.append_child(&alert).map_err(dom_err)?;

        let window = self.window.clone();
        let fade = Closure::once_into_js(move || {
            // Fade first, then drop the node once the transition is over
            if alert.class_list().remove_1("show").is_err() {
                alert.remove();
                return;
            }
            let remove = Closure::once_into_js(move || alert.remove());
            if window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    remove.unchecked_ref(),
                    TOAST_FADE_MS,
                )
                .is_err()
            {
                warn!("could not schedule toast removal");
            }
        });
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                fade.unchecked_ref(),
                millis(self.toast_timeout_ms),
            )
            .map_err(dom_err)?;
        Ok(())
    }

    /// Value of the checked radio in group `name`
    fn checked_value(&self, name: &str) -> Result<String> {
        let selector = format!(r#"input[name="{name}"]:checked"#);
        self.document
            .query_selector(&selector)
            .map_err(dom_err)?
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .ok_or_else(|| DashboardError::InvalidInput(format!("no {name} selected")))
    }

    fn input_value(&self, id: &str) -> String {
        self.typed::<HtmlInputElement>(id)
            .map(|input| input.value())
            .unwrap_or_default()
    }

    pub fn read_order_form(&self) -> Result<OrderForm> {
        Ok(OrderForm {
            pair: self.input_value("order-pair"),
            side: self.checked_value("order-type")?.parse()?,
            kind: self.checked_value("order-ordertype")?.parse()?,
            volume: self.input_value("order-volume"),
            price: self.input_value("order-price"),
        })
    }

    pub fn read_settings_form(&self) -> Settings {
        Settings {
            max_trade_amount: self.input_value("max-trade-amount"),
            risk_percentage: self.input_value("risk-percentage"),
            stop_loss_percentage: self.input_value("stop-loss-percentage"),
            take_profit_percentage: self.input_value("take-profit-percentage"),
        }
    }
}

impl DashboardView for DomView {
    fn render(&self, container: Container, html: &str) {
        if let Some(el) = self.element(container.element_id()) {
            el.set_inner_html(html);
        }
    }

    fn set_chart_title(&self, title: &str) {
        if let Some(el) = self.element("chart-title") {
            el.set_text_content(Some(title));
        }
    }

    fn notify(&self, toast: Toast) {
        if let Err(e) = self.show_toast(&toast) {
            warn!(error = %e, message = %toast.message, "toast failed");
        }
    }

    fn set_busy(&self, button: Button, busy: bool) {
        if let Some(el) = self.typed::<HtmlButtonElement>(button.element_id()) {
            el.set_disabled(busy);
            el.set_inner_html(if busy {
                button.busy_html()
            } else {
                button.idle_html()
            });
        }
    }

    fn reset_order_form(&self) {
        if let Some(form) = self.typed::<HtmlFormElement>("order-form") {
            form.reset();
        }
    }

    fn show_price_field(&self, visible: bool) {
        let Some(field) = self.document.query_selector(".order-price-field").ok().flatten() else {
            return;
        };
        if field.class_list().toggle_with_force("d-none", !visible).is_err() {
            warn!("could not toggle price field");
        }
    }

    fn fill_settings_form(&self, settings: &Settings) {
        self.set_input("max-trade-amount", &settings.max_trade_amount);
        self.set_input("risk-percentage", &settings.risk_percentage);
        self.set_input("stop-loss-percentage", &settings.stop_loss_percentage);
        self.set_input("take-profit-percentage", &settings.take_profit_percentage);
    }

    fn set_auto_trade_pair(&self, pair: &str) {
        for button in [Button::AutoTrade, Button::AutoTradeBackground] {
            let Some(el) = self.element(button.element_id()) else {
                continue;
            };
            if el.set_attribute("data-pair", pair).is_err() {
                warn!(button = button.element_id(), "could not set data-pair");
            }
        }
    }
}

/// Read configuration from `data-*` attributes on `<body>`, defaulting the
/// API base to the page origin
fn load_config(window: &Window, document: &Document) -> Config {
    let dataset = document.body().map(|body| body.dataset());
    let origin = window.location().origin().ok();

    Config::from_lookup(|key| {
        let value = dataset
            .as_ref()
            .and_then(|d| d.get(&Config::dataset_key(key)));
        match (key, value) {
            ("API_BASE", None) => origin.clone(),
            (_, value) => value,
        }
    })
}

fn spawn(dashboard: &Rc<WebDashboard>, command: Command) {
    let dashboard = Rc::clone(dashboard);
    spawn_local(async move {
        dashboard.dispatch(command).await;
    });
}

/// Attach a listener that lives as long as the page
fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    closure.forget();
    Ok(())
}

fn listen_all<F>(document: &Document, selector: &str, event: &str, handler: F) -> Result<()>
where
    F: Fn(&Element, Event) + Clone + 'static,
{
    let nodes = document.query_selector_all(selector).map_err(dom_err)?;
    for i in 0..nodes.length() {
        let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let handler = handler.clone();
        let target = element.clone();
        listen(&element, event, move |ev| handler(&target, ev))?;
    }
    Ok(())
}

fn bind_events(
    document: &Document,
    dashboard: &Rc<WebDashboard>,
    view: &Rc<DomView>,
) -> Result<()> {
    if let Some(form) = document.get_element_by_id("order-form") {
        let (dashboard, view) = (Rc::clone(dashboard), Rc::clone(view));
        listen(&form, "submit", move |ev| {
            ev.prevent_default();
            match view.read_order_form() {
                Ok(form) => spawn(&dashboard, Command::PlaceOrder(form)),
                Err(e) => view.notify(Toast::danger(format!("Invalid order: {e}"))),
            }
        })?;
    }

    {
        let dashboard = Rc::clone(dashboard);
        listen_all(document, r#"input[name="order-ordertype"]"#, "change", move |el, _| {
            let value = el
                .dyn_ref::<HtmlInputElement>()
                .map(HtmlInputElement::value)
                .unwrap_or_default();
            let kind = value.parse().unwrap_or(OrderKind::Market);
            spawn(&dashboard, Command::SetOrderKind(kind));
        })?;
    }

    {
        let dashboard = Rc::clone(dashboard);
        listen_all(document, ".refresh-btn", "click", move |el, _| {
            match el.get_attribute("data-target").map(|t| t.parse::<RefreshTarget>()) {
                Some(Ok(target)) => spawn(&dashboard, Command::Refresh(target)),
                Some(Err(e)) => warn!(error = %e, "refresh button ignored"),
                None => spawn(&dashboard, Command::Tick),
            }
        })?;
    }

    for button in [Button::AutoTrade, Button::AutoTradeBackground] {
        let Some(el) = document.get_element_by_id(button.element_id()) else {
            continue;
        };
        let dashboard = Rc::clone(dashboard);
        let target = el.clone();
        listen(&el, "click", move |_| {
            let pair = target.get_attribute("data-pair");
            let command = match button {
                Button::AutoTrade => Command::AutoTrade { pair },
                Button::AutoTradeBackground => Command::AutoTradeBackground { pair },
            };
            spawn(&dashboard, command);
        })?;
    }

    if let Some(form) = document.get_element_by_id("settings-form") {
        let (dashboard, view) = (Rc::clone(dashboard), Rc::clone(view));
        listen(&form, "submit", move |ev| {
            ev.prevent_default();
            spawn(&dashboard, Command::SaveSettings(view.read_settings_form()));
        })?;
    }

    if let Some(selector) = document.get_element_by_id("pair-selector") {
        let dashboard = Rc::clone(dashboard);
        let target = selector.clone();
        listen(&selector, "change", move |_| {
            if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
                spawn(&dashboard, Command::SelectPair(select.value()));
            }
        })?;
    }

    // Cancel buttons are re-rendered on every refresh, so delegate
    {
        let dashboard = Rc::clone(dashboard);
        listen(document, "click", move |ev| {
            let order_id = ev
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("[data-order-id]").ok().flatten())
                .and_then(|el| el.get_attribute("data-order-id"));
            if let Some(order_id) = order_id {
                spawn(&dashboard, Command::CancelOrder(order_id));
            }
        })?;
    }

    if let Some(tab) = document.get_element_by_id("history-tab") {
        let dashboard = Rc::clone(dashboard);
        listen(&tab, "shown.bs.tab", move |_| {
            spawn(&dashboard, Command::Refresh(RefreshTarget::History));
        })?;
    }

    Ok(())
}

fn start_refresh_timer(window: &Window, dashboard: &Rc<WebDashboard>) -> Result<()> {
    let interval = millis(dashboard.config().refresh_interval_ms);
    let dashboard = Rc::clone(dashboard);
    let tick = Closure::<dyn FnMut()>::new(move || spawn(&dashboard, Command::Tick));
    window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            interval,
        )
        .map_err(dom_err)?;
    tick.forget();
    Ok(())
}

fn run() -> Result<()> {
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| DashboardError::Dom("no document".into()))?;

    let config = load_config(&window, &document);
    crate::logging::init(&config.log_level);
    config.validate()?;
    info!(api = %config.api_url(), pair = %config.default_pair, "starting dashboard");

    let view = Rc::new(DomView::new(
        window.clone(),
        document.clone(),
        config.toast_timeout_ms,
    ));
    let store = LocalStorageStore::new(&window);
    let api = ApiClient::new(&config);
    let dashboard = Rc::new(Dashboard::new(config, api, Rc::clone(&view), store));

    bind_events(&document, &dashboard, &view)?;
    spawn(&dashboard, Command::Init);
    start_refresh_timer(&window, &dashboard)?;
    Ok(())
}

/// Entry point called by the wasm-bindgen glue once the module loads
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();
    run().map_err(|e| {
        tracing::error!(error = %e, "dashboard failed to start");
        JsValue::from_str(&e.to_string())
    })
}
