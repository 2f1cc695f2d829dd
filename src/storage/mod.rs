pub mod csv_source;

use crate::errors::LedgerError;
use crate::import::RawTable;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over places transaction exports can be read from.
///
/// The engine only needs a listing of available files and the raw rows of a
/// selected one; everything else about the filesystem stays behind this
/// boundary.
pub trait RowSource: Send + Sync {
    fn list_files(&self) -> Result<Vec<String>>;
    fn load_rows(&self, name: &str) -> Result<RawTable>;
}

pub use csv_source::CsvDirSource;
