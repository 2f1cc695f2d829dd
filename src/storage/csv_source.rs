use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::import::RawTable;

use super::{Result, RowSource};

const CSV_EXTENSION: &str = "csv";

/// Reads transaction exports out of a single configured directory.
#[derive(Debug, Clone)]
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RowSource for CsvDirSource {
    /// Lists the `.csv` files in the directory, sorted by name.
    fn list_files(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION));
            if !is_csv {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn load_rows(&self, name: &str) -> Result<RawTable> {
        let path = self.dir.join(name);
        let file = File::open(&path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let headers = reader.headers()?.clone();
        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record?);
        }
        debug!(file = %path.display(), rows = records.len(), "Loaded export rows.");
        Ok(RawTable::new(headers, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut file = File::create(dir.join(name)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn lists_only_csv_files_sorted() {
        let temp = tempdir().unwrap();
        write_file(temp.path(), "b.csv", "Date\n");
        write_file(temp.path(), "a.csv", "Date\n");
        write_file(temp.path(), "notes.txt", "not a csv\n");
        write_file(temp.path(), "upper.CSV", "Date\n");

        let source = CsvDirSource::new(temp.path());
        let names = source.list_files().unwrap();
        assert_eq!(names, vec!["a.csv", "b.csv", "upper.CSV"]);
    }

    #[test]
    fn loads_headers_and_records() {
        let temp = tempdir().unwrap();
        write_file(
            temp.path(),
            "transactions.csv",
            "Date,Description,Amount\n1/02/2024,COFFEE,4.50\n",
        );

        let source = CsvDirSource::new(temp.path());
        let table = source.load_rows("transactions.csv").unwrap();
        assert_eq!(table.headers.get(1), Some("Description"));
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].get(2), Some("4.50"));
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let temp = tempdir().unwrap();
        let source = CsvDirSource::new(temp.path());
        let err = source.load_rows("nope.csv").expect_err("file absent");
        assert!(matches!(err, crate::errors::LedgerError::Io(_)));
    }
}
