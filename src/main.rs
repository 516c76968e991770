//! Library Catalog CLI
//!
//! Interactive menu over an in-memory library catalog.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --books books.csv --users users.csv
//! cargo run -- --ledger-out ledger.csv
//! RUST_LOG=info cargo run
//! ```
//!
//! Menu prompts go to stdout; logs go to stderr, filtered by `RUST_LOG`
//! (default `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (input file not found, unreadable CSV, ledger export failed, etc.)

use library_catalog::cli;
use std::io;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = cli::parse_args();

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = cli::run_session(&args, stdin.lock(), stdout.lock()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
