use tracing::info;

use crate::errors::LedgerError;
use crate::ledger::Ledger;
use crate::storage::RowSource;

/// Facade that owns the current ledger and coordinates loads.
///
/// There is exactly one ledger at a time, held explicitly by whoever owns
/// the session; loading a new export builds a whole replacement ledger and
/// only swaps it in once the build succeeds, so a failed load leaves the
/// previous ledger untouched.
pub struct Session {
    source: Box<dyn RowSource>,
    known_prefixes: Vec<String>,
    current: Option<Ledger>,
    current_file: Option<String>,
}

impl Session {
    pub fn new(source: Box<dyn RowSource>, known_prefixes: Vec<String>) -> Self {
        Self {
            source,
            known_prefixes,
            current: None,
            current_file: None,
        }
    }

    /// Export files the source can currently offer.
    pub fn available_files(&self) -> Result<Vec<String>, LedgerError> {
        self.source.list_files()
    }

    /// Loads `name`, replacing the current ledger atomically on success.
    pub fn load(&mut self, name: &str) -> Result<&Ledger, LedgerError> {
        let table = self.source.load_rows(name)?;
        let ledger = Ledger::build(&table, &self.known_prefixes)?;
        info!(file = name, transactions = ledger.len(), "Export loaded.");
        self.current_file = Some(name.to_string());
        Ok(self.current.insert(ledger))
    }

    pub fn ledger(&self) -> Option<&Ledger> {
        self.current.as_ref()
    }

    pub fn ledger_mut(&mut self) -> Option<&mut Ledger> {
        self.current.as_mut()
    }

    pub fn current_file(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.current_file = None;
    }
}
