//! Market analysis cards

use crate::dashboard::format::{escape_html, fixed};
use crate::types::MarketAnalysis;

/// Text and background classes for a recommendation
pub fn recommendation_classes(recommendation: &str) -> (&'static str, &'static str) {
    match recommendation.to_lowercase().as_str() {
        "buy" => ("text-success", "bg-success"),
        "sell" => ("text-danger", "bg-danger"),
        _ => ("text-secondary", "bg-secondary"),
    }
}

/// Confidence as a percentage in `[0, 100]`
pub fn confidence_percent(confidence: f64) -> f64 {
    if confidence.is_nan() {
        return 0.0;
    }
    (confidence * 100.0).clamp(0.0, 100.0)
}

fn level(levels: &[f64]) -> String {
    levels
        .first()
        .map(|v| fixed(*v, 2))
        .unwrap_or_else(|| "-".to_string())
}

fn card(title: &str, body: &str) -> String {
    format!(
        r#"<div class="col-md-4 mb-3"><div class="card h-100"><div class="card-body"><h6 class="card-subtitle mb-2 text-muted">{title}</h6>{body}</div></div></div>"#
    )
}

/// Render the analysis for one pair as a row of cards
pub fn render_analysis(analysis: &MarketAnalysis) -> String {
    let (text_class, bg_class) = recommendation_classes(&analysis.recommendation);
    let percent = confidence_percent(analysis.confidence);
    let indicators = &analysis.indicators;

    let cards = [
        card(
            "Trend",
            &format!(r#"<h5 class="card-title">{}</h5>"#, escape_html(&analysis.trend)),
        ),
        card(
            "Recommendation",
            &format!(
                r#"<h5 class="card-title {text_class}">{}</h5><div class="progress"><div class="progress-bar {bg_class}" role="progressbar" style="width: {pct}%" aria-valuenow="{pct}" aria-valuemin="0" aria-valuemax="100">{pct}%</div></div>"#,
                escape_html(&analysis.recommendation.to_uppercase()),
                pct = fixed(percent, 1),
            ),
        ),
        card(
            "RSI",
            &format!(r#"<h5 class="card-title">{}</h5>"#, fixed(indicators.rsi, 2)),
        ),
        card(
            "MACD",
            &format!(
                "<p class=\"mb-0\">Signal: {}</p><p class=\"mb-0\">MACD: {}</p><p class=\"mb-0\">Histogram: {}</p>",
                fixed(indicators.macd.signal, 2),
                fixed(indicators.macd.macd, 2),
                fixed(indicators.macd.histogram, 2),
            ),
        ),
        card(
            "Bollinger Bands",
            &format!(
                "<p class=\"mb-0\">Upper: {}</p><p class=\"mb-0\">Middle: {}</p><p class=\"mb-0\">Lower: {}</p>",
                fixed(indicators.bollinger_bands.upper, 2),
                fixed(indicators.bollinger_bands.middle, 2),
                fixed(indicators.bollinger_bands.lower, 2),
            ),
        ),
        card(
            "Support / Resistance",
            &format!(
                "<p class=\"mb-0\">Support: {}</p><p class=\"mb-0\">Resistance: {}</p>",
                level(&analysis.support_levels),
                level(&analysis.resistance_levels),
            ),
        ),
    ];

    format!(r#"<div class="row">{}</div>"#, cards.concat())
}
