//! Shared formatting helpers for the renderers

use chrono::{DateTime, TimeZone, Utc};

/// Fixed-point number with `decimals` places
pub fn fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Escape text for safe interpolation into HTML content or attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Exchange codes with a fixed display name
const CURRENCY_NAMES: [(&str, &str); 3] = [("ZUSD", "USD"), ("XXBT", "BTC"), ("XETH", "ETH")];

/// Display name for an exchange currency code.
///
/// Known codes map through the lookup table; any other four-letter code with
/// an `X` or `Z` prefix loses the prefix.
pub fn display_currency_name(code: &str) -> String {
    if let Some((_, name)) = CURRENCY_NAMES.iter().find(|(raw, _)| *raw == code) {
        return (*name).to_string();
    }
    if code.len() == 4 && (code.starts_with('X') || code.starts_with('Z')) {
        return code[1..].to_string();
    }
    code.to_string()
}

/// First 8 characters followed by an ellipsis
pub fn short_id(id: &str) -> String {
    let head: String = id.chars().take(8).collect();
    format!("{head}...")
}

/// Epoch value to UTC time; values above 10^12 are taken as milliseconds
pub fn epoch_to_datetime(value: f64) -> Option<DateTime<Utc>> {
    let millis = if value > 1e12 { value } else { value * 1000.0 };
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
}

/// Format an epoch value in `tz`; unrepresentable values render `-`
pub fn format_epoch<Tz: TimeZone>(value: f64, tz: &Tz, pattern: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    epoch_to_datetime(value)
        .map(|dt| dt.with_timezone(tz).format(pattern).to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_names() {
        assert_eq!(display_currency_name("ZUSD"), "USD");
        assert_eq!(display_currency_name("XXBT"), "BTC");
        assert_eq!(display_currency_name("XETH"), "ETH");
        assert_eq!(display_currency_name("XLTC"), "LTC");
        assert_eq!(display_currency_name("ZEUR"), "EUR");
        // Prefix only stripped from four-letter codes
        assert_eq!(display_currency_name("XTZ"), "XTZ");
        assert_eq!(display_currency_name("DOT"), "DOT");
        assert_eq!(display_currency_name("USDC"), "USDC");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("OQCLML-BW3P3-BUCMWZ"), "OQCLML-B...");
        assert_eq!(short_id("abc"), "abc...");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_epoch_seconds_and_millis() {
        let secs = format_epoch(1_700_000_000.0, &Utc, "%Y-%m-%d %H:%M:%S");
        let millis = format_epoch(1_700_000_000_000.0, &Utc, "%Y-%m-%d %H:%M:%S");
        assert_eq!(secs, "2023-11-14 22:13:20");
        assert_eq!(secs, millis);
        assert_eq!(format_epoch(f64::NAN, &Utc, "%H"), "-");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(fixed(1.5, 2), "1.50");
        assert_eq!(fixed(0.25, 8), "0.25000000");
    }
}
