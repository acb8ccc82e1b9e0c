//! Dashboard CSS overrides
//!
//! Layout and components come from Bootstrap; this only themes the page and
//! styles the pieces Bootstrap has no opinion on (toast stack, SVG chart).

pub const STYLES: &str = r"
:root {
    --bg: #0d1117;
    --card: #161b22;
    --border: #30363d;
    --text: #c9d1d9;
    --text-dim: #8b949e;
}

body {
    background: var(--bg);
    color: var(--text);
    min-height: 100vh;
}

.card {
    background: var(--card);
    border: 1px solid var(--border);
    color: var(--text);
}

.card-header { border-bottom: 1px solid var(--border); }

.text-muted { color: var(--text-dim) !important; }

.table { color: var(--text); }

/* Toasts */
.toast-stack {
    position: fixed;
    top: 16px;
    right: 16px;
    z-index: 1080;
    width: 360px;
}

.toast-stack .alert { box-shadow: 0 4px 12px rgba(0, 0, 0, 0.4); }

/* Chart */
.price-chart {
    display: block;
    background: rgba(255, 255, 255, 0.02);
    border-radius: 8px;
}

.btn:disabled { opacity: 0.6; cursor: not-allowed; }

@media (max-width: 600px) {
    .toast-stack { left: 16px; right: 16px; width: auto; }
}
";
