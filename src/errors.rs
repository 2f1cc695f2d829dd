use thiserror::Error;

/// Error type that captures every way the engine can fail.
///
/// `Schema` and `Parse` are fatal to ledger construction; `Index` and
/// `EmptyLedger` are recoverable conditions the caller is expected to
/// report and move past.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("missing required column `{0}`")]
    Schema(String),
    #[error("row {row}: malformed {field} `{value}`")]
    Parse {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("transaction index {index} out of range (ledger holds {len})")]
    Index { index: usize, len: usize },
    #[error("ledger has no transactions")]
    EmptyLedger,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    /// Whether the caller can recover by re-fetching state and retrying,
    /// as opposed to a failure that aborts the operation wholesale.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LedgerError::Index { .. } | LedgerError::EmptyLedger)
    }
}
