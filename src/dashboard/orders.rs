//! Open orders table

use std::collections::BTreeMap;

use crate::dashboard::format::{escape_html, fixed, short_id};
use crate::types::{Numeric, OpenOrder};

const EMPTY: &str = r#"<p class="text-muted">No open orders</p>"#;

fn side_cell(side: &str) -> String {
    let class = if side.eq_ignore_ascii_case("buy") {
        "text-success"
    } else {
        "text-danger"
    };
    format!(r#"<td class="{class}">{}</td>"#, escape_html(&side.to_uppercase()))
}

fn price_cell(price: Option<&Numeric>) -> String {
    match price.and_then(Numeric::value) {
        Some(p) if p != 0.0 => fixed(p, 2),
        _ => "Market".to_string(),
    }
}

/// Render open orders keyed by order id
pub fn render_open_orders(orders: &BTreeMap<String, OpenOrder>) -> String {
    if orders.is_empty() {
        return EMPTY.to_string();
    }

    let rows: String = orders
        .iter()
        .map(|(id, order)| {
            let volume = order
                .vol
                .as_ref()
                .and_then(Numeric::value)
                .map(|v| fixed(v, 8))
                .unwrap_or_else(|| "-".to_string());
            format!(
                r#"<tr><td title="{id}">{short}</td><td>{pair}</td>{side}<td>{price}</td><td>{volume}</td><td><button type="button" class="btn btn-sm btn-outline-danger" data-order-id="{id}">Cancel</button></td></tr>"#,
                id = escape_html(id),
                short = escape_html(&short_id(id)),
                pair = escape_html(&order.descr.pair),
                side = side_cell(&order.descr.side),
                price = price_cell(order.descr.price.as_ref()),
            )
        })
        .collect();

    format!(
        r#"<table class="table table-sm"><thead><tr><th>ID</th><th>Pair</th><th>Type</th><th>Price</th><th>Volume</th><th></th></tr></thead><tbody>{rows}</tbody></table>"#
    )
}
