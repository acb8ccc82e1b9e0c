//! Balance container rendering

use crate::config::BalanceLayout;
use crate::dashboard::format::{display_currency_name, escape_html, fixed};
use crate::types::BalanceMap;

const EMPTY: &str = r#"<p class="text-muted">No funds available</p>"#;

/// Badge class for a display currency
pub fn badge_class(currency: &str) -> &'static str {
    match currency {
        "BTC" | "ETH" => "bg-success",
        "USD" | "EUR" => "bg-info",
        _ => "bg-primary",
    }
}

/// Render the balance map in the configured layout
pub fn render_balance(balance: &BalanceMap, layout: BalanceLayout, threshold: f64) -> String {
    match layout {
        BalanceLayout::List => render_list(balance, threshold),
        BalanceLayout::Table => render_table(balance),
    }
}

fn render_list(balance: &BalanceMap, threshold: f64) -> String {
    let items: Vec<String> = balance
        .iter()
        .filter_map(|(code, amount)| {
            let amount = amount.value().filter(|a| *a >= threshold)?;
            let name = display_currency_name(code);
            Some(format!(
                r#"<li class="list-group-item d-flex justify-content-between align-items-center">{name}<span class="badge {badge} rounded-pill">{amount}</span></li>"#,
                badge = badge_class(&name),
                name = escape_html(&name),
                amount = fixed(amount, 8),
            ))
        })
        .collect();

    if items.is_empty() {
        return EMPTY.to_string();
    }
    format!(r#"<ul class="list-group">{}</ul>"#, items.concat())
}

fn render_table(balance: &BalanceMap) -> String {
    let rows: Vec<String> = balance
        .iter()
        .filter_map(|(code, amount)| {
            let amount = amount.value().filter(|a| *a > 0.0)?;
            Some(format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                escape_html(&display_currency_name(code)),
                fixed(amount, 6)
            ))
        })
        .collect();

    if rows.is_empty() {
        return EMPTY.to_string();
    }
    format!(
        r#"<table class="table table-sm"><thead><tr><th>Currency</th><th>Amount</th></tr></thead><tbody>{}</tbody></table>"#,
        rows.concat()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Numeric;

    fn balance() -> BalanceMap {
        let mut map = BalanceMap::new();
        map.insert("ZUSD".into(), Numeric::from("1520.5"));
        map.insert("XXBT".into(), Numeric::from(0.5));
        map.insert("XETH".into(), Numeric::from("0.000001"));
        map.insert("XLTC".into(), Numeric::from("0.0"));
        map.insert("DOT".into(), Numeric::from("not a number"));
        map
    }

    #[test]
    fn test_list_skips_dust_and_maps_names() {
        let html = render_balance(&balance(), BalanceLayout::List, 0.000_01);

        assert!(html.contains("USD<span class=\"badge bg-info rounded-pill\">1520.50000000</span>"));
        assert!(html.contains("BTC<span class=\"badge bg-success rounded-pill\">0.50000000</span>"));
        assert!(!html.contains("ETH"));
        assert!(!html.contains("LTC"));
        assert!(!html.contains("DOT"));
        assert!(!html.contains("ZUSD"));
    }

    #[test]
    fn test_table_skips_non_positive() {
        let html = render_balance(&balance(), BalanceLayout::Table, 0.000_01);

        assert!(html.contains("<td>USD</td><td>1520.500000</td>"));
        // Below the list threshold but still positive
        assert!(html.contains("<td>ETH</td><td>0.000001</td>"));
        assert!(!html.contains("LTC"));
    }

    #[test]
    fn test_empty_balance_message() {
        let html = render_balance(&BalanceMap::new(), BalanceLayout::List, 0.000_01);
        assert!(html.contains("No funds available"));
        assert!(!html.contains("<ul"));
    }

    #[test]
    fn test_badge_classes() {
        assert_eq!(badge_class("ETH"), "bg-success");
        assert_eq!(badge_class("EUR"), "bg-info");
        assert_eq!(badge_class("SOL"), "bg-primary");
    }
}
