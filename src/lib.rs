#![doc(test(attr(deny(warnings))))]

//! Spendview turns a Mint-style transaction CSV export into a categorized,
//! user-correctable spending summary: counted vs ignored transactions,
//! counted debit/credit totals, and per-category sums.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod import;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Spendview tracing initialized.");
    });
}
