//! Inline SVG line chart

use crate::chart::ChartPoint;
use crate::dashboard::format::{escape_html, fixed};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 300.0;
const PAD_LEFT: f64 = 70.0;
const PAD_RIGHT: f64 = 10.0;
const PAD_TOP: f64 = 10.0;
const PAD_BOTTOM: f64 = 30.0;
const MAX_LABELS: usize = 10;

const WAITING: &str = r#"<p class="text-muted text-center">Waiting for price data...</p>"#;

/// Indices of at most `MAX_LABELS` evenly spread time labels
fn label_indices(len: usize) -> Vec<usize> {
    if len <= MAX_LABELS {
        return (0..len).collect();
    }
    let step = len.div_ceil(MAX_LABELS);
    (0..len).step_by(step).collect()
}

/// Render points as a polyline with min/max price labels
pub fn render_chart(points: &[ChartPoint]) -> String {
    if points.is_empty() {
        return WAITING.to_string();
    }

    let min = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };

    let plot_w = WIDTH - PAD_LEFT - PAD_RIGHT;
    let plot_h = HEIGHT - PAD_TOP - PAD_BOTTOM;
    let step_x = if points.len() > 1 {
        plot_w / (points.len() - 1) as f64
    } else {
        0.0
    };

    let x_at = |i: usize| PAD_LEFT + step_x * i as f64;
    let y_at = |price: f64| {
        if max > min {
            PAD_TOP + plot_h * (1.0 - (price - min) / span)
        } else {
            PAD_TOP + plot_h / 2.0
        }
    };

    let coords: Vec<String> = points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{:.1},{:.1}", x_at(i), y_at(p.price)))
        .collect();

    let labels: String = label_indices(points.len())
        .into_iter()
        .map(|i| {
            format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="10" text-anchor="middle" fill="gray">{}</text>"#,
                x_at(i),
                HEIGHT - 8.0,
                escape_html(&points[i].label)
            )
        })
        .collect();

    format!(
        concat!(
            r#"<svg class="price-chart" viewBox="0 0 {w} {h}" preserveAspectRatio="none" width="100%" height="{h}">"#,
            r#"<text x="4" y="{top:.1}" font-size="11" fill="gray">{max}</text>"#,
            r#"<text x="4" y="{bottom:.1}" font-size="11" fill="gray">{min}</text>"#,
            r#"<polyline fill="none" stroke="rgb(75, 192, 192)" stroke-width="2" points="{coords}"/>"#,
            "{labels}</svg>"
        ),
        w = WIDTH,
        h = HEIGHT,
        top = PAD_TOP + 10.0,
        bottom = HEIGHT - PAD_BOTTOM,
        max = fixed(max, 2),
        min = fixed(min, 2),
        coords = coords.join(" "),
        labels = labels,
    )
}
