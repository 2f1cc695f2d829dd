//! Ledger domain models, classification, and aggregate queries.

pub mod category;
pub mod classify;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use category::CategoryAggregate;
pub use classify::looks_like_transfer;
pub use ledger::{round2, Highlight, HighlightSelector, Ledger};
pub use transaction::{Transaction, TransactionKind};
