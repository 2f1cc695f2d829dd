//! Interactive shell and rendering helpers over the core engine.

pub mod output;
pub mod shell;
pub mod table;

use thiserror::Error;

use crate::errors::LedgerError;

pub use shell::run_cli;

/// Fatal shell failures that end the process.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Core(#[from] LedgerError),
}

/// Per-command failures reported to the user without ending the loop.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
}

impl CommandError {
    pub fn usage(message: impl Into<String>) -> Self {
        CommandError::Usage(message.into())
    }
}
