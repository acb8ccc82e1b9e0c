//! Trade history table

use chrono::TimeZone;

use crate::dashboard::format::{escape_html, fixed, format_epoch};
use crate::types::{HistoryEntry, Numeric};

const EMPTY: &str = r#"<p class="text-muted">No trade history available</p>"#;

fn optional(value: Option<&Numeric>, decimals: usize) -> String {
    value
        .and_then(Numeric::value)
        .map(|v| fixed(v, decimals))
        .unwrap_or_else(|| "-".to_string())
}

/// Render entries in the order given (newest first after decoding), with
/// dates shown in `tz`
pub fn render_history<Tz: TimeZone>(entries: &[HistoryEntry], tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if entries.is_empty() {
        return EMPTY.to_string();
    }

    let rows: String = entries
        .iter()
        .map(|entry| {
            let side_class = if entry.side.eq_ignore_ascii_case("buy") {
                "text-success"
            } else {
                "text-danger"
            };
            format!(
                r#"<tr><td>{date}</td><td>{pair}</td><td class="{side_class}">{side}</td><td>{price}</td><td>{volume}</td><td>{cost}</td><td>{fee}</td><td>{status}</td></tr>"#,
                date = format_epoch(entry.time, tz, "%Y-%m-%d %H:%M:%S"),
                pair = escape_html(&entry.pair),
                side = escape_html(&entry.side.to_uppercase()),
                price = optional(Some(&entry.price), 2),
                volume = optional(Some(&entry.volume), 8),
                cost = optional(entry.cost.as_ref(), 2),
                fee = optional(entry.fee.as_ref(), 2),
                status = entry
                    .status
                    .as_deref()
                    .map(escape_html)
                    .unwrap_or_else(|| "-".to_string()),
            )
        })
        .collect();

    format!(
        r#"<table class="table table-sm table-striped"><thead><tr><th>Date</th><th>Pair</th><th>Type</th><th>Price</th><th>Volume</th><th>Cost</th><th>Fee</th><th>Status</th></tr></thead><tbody>{rows}</tbody></table>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HistoryPayload;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_empty_history_message() {
        let html = render_history(&[], &Utc);
        assert!(html.contains("No trade history available"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_rows_newest_first_with_placeholders() {
        let payload: HistoryPayload = serde_json::from_value(json!({
            "T1": {"time": 1_700_000_000.0, "pair": "XBTUSD", "type": "buy", "price": "35000", "vol": "0.1"},
            "T2": {"time": 1_700_000_060.0, "pair": "XBTUSD", "type": "sell", "price": "35100.456",
                   "vol": "0.1", "cost": "3510.05", "fee": "5.6", "status": "closed"}
        }))
        .unwrap();
        let html = render_history(&payload.into_entries(), &Utc);

        let newer = html.find("2023-11-14 22:14:20").unwrap();
        let older = html.find("2023-11-14 22:13:20").unwrap();
        assert!(newer < older);
        assert!(html.contains("<td>35100.46</td>"));
        assert!(html.contains("<td>0.10000000</td>"));
        assert!(html.contains("<td>-</td><td>-</td><td>-</td>"));
        assert!(html.contains("<td>closed</td>"));
    }
}
