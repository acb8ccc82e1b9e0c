//! Write the dashboard host page
//!
//! Reads the same keys as the browser (`API_BASE`, `DEFAULT_PAIR`, ...) from
//! the environment and bakes them into `<body data-*>`.
//!
//! Usage: `write-page [OUTPUT]`, with `PKG_PATH` pointing at the
//! wasm-bindgen output (default `./pkg`). Writes to stdout without OUTPUT.

use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;

use tracing::{error, info};
use trading_dashboard::dashboard::write_page;
use trading_dashboard::{Config, Result, logging};

fn run() -> Result<()> {
    let config = Config::from_env();
    let pkg_path = std::env::var("PKG_PATH").unwrap_or_else(|_| "./pkg".to_string());

    match std::env::args().nth(1) {
        Some(path) => {
            write_page(&config, &pkg_path, &mut BufWriter::new(File::create(&path)?))?;
            info!(%path, %pkg_path, "host page written");
        }
        None => write_page(&config, &pkg_path, &mut io::stdout().lock())?,
    }
    Ok(())
}

fn main() -> ExitCode {
    logging::init(&std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to write host page");
            ExitCode::FAILURE
        }
    }
}
