//! Dashboard HTML template
//!
//! Contains the page structure:
//! - Navbar with pair selector and auto-trade buttons
//! - Balance and open orders sidebar
//! - Price chart and market analysis cards
//! - Tabs for the order form, open orders, history and settings
//!
//! Element ids must match `view::Container`, `view::Button` and the form
//! readers in `web.rs`.

pub const TEMPLATE: &str = r##"
    <nav class="navbar navbar-dark bg-dark mb-4">
        <div class="container-fluid">
            <span class="navbar-brand">Trading Dashboard</span>
            <div class="d-flex gap-2">
                <select class="form-select" id="pair-selector">
                    <option value="BTCUSD">BTC/USD</option>
                    <option value="ETHUSD">ETH/USD</option>
                    <option value="XRPUSD">XRP/USD</option>
                    <option value="SOLUSD">SOL/USD</option>
                </select>
                <button class="btn btn-warning text-nowrap" id="auto-trade-btn-advanced" data-pair="BTCUSD">
                    <i class="bi bi-lightning-charge"></i> Auto Trade
                </button>
                <button class="btn btn-outline-warning text-nowrap" id="auto-trade-background-btn" data-pair="BTCUSD">
                    <i class="bi bi-clock-history"></i> Schedule Auto Trade
                </button>
            </div>
        </div>
    </nav>

    <div class="container-fluid">
        <div id="alerts-container" class="toast-stack"></div>

        <div class="row">
            <!-- Sidebar -->
            <div class="col-lg-3">
                <div class="card mb-4">
                    <div class="card-header d-flex justify-content-between align-items-center">
                        <span>Balance</span>
                        <button class="btn btn-sm btn-outline-secondary refresh-btn" data-target="balance">Refresh</button>
                    </div>
                    <div class="card-body" id="balance-container">
                        <p class="text-muted">Loading...</p>
                    </div>
                </div>

                <div class="card mb-4">
                    <div class="card-header d-flex justify-content-between align-items-center">
                        <span>Open Orders</span>
                        <button class="btn btn-sm btn-outline-secondary refresh-btn" data-target="orders">Refresh</button>
                    </div>
                    <div class="card-body" id="open-orders-container">
                        <p class="text-muted">Loading...</p>
                    </div>
                </div>
            </div>

            <!-- Main -->
            <div class="col-lg-9">
                <div class="card mb-4">
                    <div class="card-header d-flex justify-content-between align-items-center">
                        <span id="chart-title">Price chart</span>
                        <button class="btn btn-sm btn-outline-secondary refresh-btn" data-target="chart">Refresh</button>
                    </div>
                    <div class="card-body" id="trading-chart">
                        <p class="text-muted text-center">Waiting for price data...</p>
                    </div>
                </div>

                <div class="card mb-4">
                    <div class="card-header d-flex justify-content-between align-items-center">
                        <span>Market Analysis</span>
                        <button class="btn btn-sm btn-outline-secondary refresh-btn" data-target="market">Refresh</button>
                    </div>
                    <div class="card-body" id="market-analysis-container">
                        <p class="text-muted">Loading...</p>
                    </div>
                </div>

                <ul class="nav nav-tabs" role="tablist">
                    <li class="nav-item" role="presentation">
                        <button class="nav-link active" id="trade-tab" data-bs-toggle="tab" data-bs-target="#trade" type="button" role="tab">Trade</button>
                    </li>
                    <li class="nav-item" role="presentation">
                        <button class="nav-link" id="orders-tab" data-bs-toggle="tab" data-bs-target="#orders" type="button" role="tab">Orders</button>
                    </li>
                    <li class="nav-item" role="presentation">
                        <button class="nav-link" id="history-tab" data-bs-toggle="tab" data-bs-target="#history" type="button" role="tab">History</button>
                    </li>
                    <li class="nav-item" role="presentation">
                        <button class="nav-link" id="settings-tab" data-bs-toggle="tab" data-bs-target="#settings" type="button" role="tab">Settings</button>
                    </li>
                </ul>

                <div class="tab-content card card-body border-top-0 mb-4">
                    <div class="tab-pane fade show active" id="trade" role="tabpanel">
                        <form id="order-form">
                            <div class="row g-3">
                                <div class="col-md-4">
                                    <label class="form-label" for="order-pair">Pair</label>
                                    <input class="form-control" id="order-pair" value="BTCUSD" required>
                                </div>
                                <div class="col-md-4">
                                    <label class="form-label d-block">Side</label>
                                    <input class="btn-check" type="radio" name="order-type" id="order-type-buy" value="buy" checked>
                                    <label class="btn btn-outline-success" for="order-type-buy">Buy</label>
                                    <input class="btn-check" type="radio" name="order-type" id="order-type-sell" value="sell">
                                    <label class="btn btn-outline-danger" for="order-type-sell">Sell</label>
                                </div>
                                <div class="col-md-4">
                                    <label class="form-label d-block">Order type</label>
                                    <input class="btn-check" type="radio" name="order-ordertype" id="order-ordertype-market" value="market" checked>
                                    <label class="btn btn-outline-secondary" for="order-ordertype-market">Market</label>
                                    <input class="btn-check" type="radio" name="order-ordertype" id="order-ordertype-limit" value="limit">
                                    <label class="btn btn-outline-secondary" for="order-ordertype-limit">Limit</label>
                                </div>
                                <div class="col-md-4">
                                    <label class="form-label" for="order-volume">Volume</label>
                                    <input class="form-control" id="order-volume" type="number" step="any" min="0" required>
                                </div>
                                <div class="col-md-4 order-price-field d-none">
                                    <label class="form-label" for="order-price">Price</label>
                                    <input class="form-control" id="order-price" type="number" step="any" min="0">
                                </div>
                                <div class="col-12">
                                    <button class="btn btn-primary" type="submit">Place Order</button>
                                </div>
                            </div>
                        </form>
                    </div>

                    <div class="tab-pane fade" id="orders" role="tabpanel">
                        <div id="orders-container"><p class="text-muted">Loading...</p></div>
                    </div>

                    <div class="tab-pane fade" id="history" role="tabpanel">
                        <div class="d-flex justify-content-end mb-2">
                            <button class="btn btn-sm btn-outline-secondary refresh-btn" data-target="history">Refresh</button>
                        </div>
                        <div id="history-container"><p class="text-muted">Loading...</p></div>
                    </div>

                    <div class="tab-pane fade" id="settings" role="tabpanel">
                        <form id="settings-form">
                            <div class="row g-3">
                                <div class="col-md-3">
                                    <label class="form-label" for="max-trade-amount">Max trade amount</label>
                                    <input class="form-control" id="max-trade-amount" type="number" step="any">
                                </div>
                                <div class="col-md-3">
                                    <label class="form-label" for="risk-percentage">Risk %</label>
                                    <input class="form-control" id="risk-percentage" type="number" step="any">
                                </div>
                                <div class="col-md-3">
                                    <label class="form-label" for="stop-loss-percentage">Stop loss %</label>
                                    <input class="form-control" id="stop-loss-percentage" type="number" step="any">
                                </div>
                                <div class="col-md-3">
                                    <label class="form-label" for="take-profit-percentage">Take profit %</label>
                                    <input class="form-control" id="take-profit-percentage" type="number" step="any">
                                </div>
                                <div class="col-12">
                                    <button class="btn btn-primary" type="submit">Save Settings</button>
                                </div>
                            </div>
                        </form>
                    </div>
                </div>
            </div>
        </div>
    </div>
"##;
