//! Record normalizer for Mint-style CSV exports.
//!
//! Raw rows come in with the full export schema; normalization strips noisy
//! card prefixes from descriptions, parses dates and amounts, and drops the
//! columns the engine does not model.

use csv::StringRecord;
use tracing::debug;

use crate::errors::LedgerError;
use crate::ledger::{Transaction, TransactionKind};

/// Header names the export must carry, matched case-sensitively.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Date",
    "Description",
    "Original Description",
    "Amount",
    "Transaction Type",
    "Category",
    "Account Name",
    "Labels",
    "Notes",
];

/// Date formats Mint has been observed to emit.
const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%m/%d/%y"];

/// One parsed CSV file: the header row plus every data record, in file order.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: StringRecord,
    pub records: Vec<StringRecord>,
}

impl RawTable {
    pub fn new(headers: StringRecord, records: Vec<StringRecord>) -> Self {
        Self { headers, records }
    }

    fn column(&self, name: &str) -> Result<usize, LedgerError> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| LedgerError::Schema(name.to_string()))
    }
}

/// Parses raw export rows into transactions, preserving row order.
///
/// Pure transform: every known prefix is stripped from each description in
/// sequence (each removing all occurrences), `Original Description`,
/// `Account Name`, `Labels`, and `Notes` are validated as present but not
/// carried forward, and each transaction gets a stable id equal to its row
/// position. Any missing column or malformed value fails the whole batch.
pub fn normalize(
    table: &RawTable,
    known_prefixes: &[String],
) -> Result<Vec<Transaction>, LedgerError> {
    for name in REQUIRED_COLUMNS {
        table.column(name)?;
    }
    let date_col = table.column("Date")?;
    let description_col = table.column("Description")?;
    let amount_col = table.column("Amount")?;
    let kind_col = table.column("Transaction Type")?;
    let category_col = table.column("Category")?;

    let mut transactions = Vec::with_capacity(table.records.len());
    for (row, record) in table.records.iter().enumerate() {
        let date_raw = field(record, row, date_col, "Date")?;
        let date = parse_date(date_raw, row)?;

        let mut description = field(record, row, description_col, "Description")?.to_string();
        for prefix in known_prefixes {
            description = description.replace(prefix.as_str(), "");
        }

        let amount_raw = field(record, row, amount_col, "Amount")?;
        let amount = parse_amount(amount_raw, row)?;

        let kind_raw = field(record, row, kind_col, "Transaction Type")?;
        let kind = TransactionKind::parse(kind_raw).ok_or_else(|| LedgerError::Parse {
            row,
            field: "Transaction Type",
            value: kind_raw.to_string(),
        })?;

        let category = field(record, row, category_col, "Category")?.to_string();

        transactions.push(Transaction::new(row, date, description, amount, kind, category));
    }

    debug!(rows = transactions.len(), "Normalized export rows.");
    Ok(transactions)
}

fn field<'r>(
    record: &'r StringRecord,
    row: usize,
    index: usize,
    name: &'static str,
) -> Result<&'r str, LedgerError> {
    record.get(index).ok_or(LedgerError::Parse {
        row,
        field: name,
        value: String::new(),
    })
}

fn parse_date(raw: &str, row: usize) -> Result<chrono::NaiveDate, LedgerError> {
    let trimmed = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    Err(LedgerError::Parse {
        row,
        field: "Date",
        value: raw.to_string(),
    })
}

fn parse_amount(raw: &str, row: usize) -> Result<f64, LedgerError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();
    cleaned.parse::<f64>().map_err(|_| LedgerError::Parse {
        row,
        field: "Amount",
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> StringRecord {
        StringRecord::from(REQUIRED_COLUMNS.to_vec())
    }

    fn record(
        date: &str,
        description: &str,
        amount: &str,
        kind: &str,
        category: &str,
    ) -> StringRecord {
        StringRecord::from(vec![
            date,
            description,
            "raw bank text",
            amount,
            kind,
            category,
            "Checking",
            "",
            "",
        ])
    }

    #[test]
    fn normalizes_rows_in_file_order() {
        let table = RawTable::new(
            headers(),
            vec![
                record("1/02/2024", "COFFEE SHOP", "4.50", "debit", "Dining"),
                record("1/01/2024", "GROCERIES", "62.10", "debit", "Groceries"),
            ],
        );
        let transactions = normalize(&table, &[]).unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].id, 0);
        assert_eq!(transactions[0].description, "COFFEE SHOP");
        assert_eq!(transactions[1].id, 1);
        assert_eq!(transactions[1].description, "GROCERIES");
    }

    #[test]
    fn strips_every_prefix_occurrence() {
        let table = RawTable::new(
            headers(),
            vec![record(
                "1/02/2024",
                "Debit Purchase Card 4845 COFFEE Debit Purchase Card 4845 SHOP",
                "4.50",
                "debit",
                "Dining",
            )],
        );
        let prefixes = vec!["Debit Purchase Card 4845".to_string()];
        let transactions = normalize(&table, &prefixes).unwrap();
        assert_eq!(transactions[0].description, " COFFEE  SHOP");
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let headers = StringRecord::from(vec![
            "Date",
            "Description",
            "Original Description",
            "Amount",
            "Transaction Type",
            "Category",
            "Account Name",
            "Labels",
        ]);
        let table = RawTable::new(headers, Vec::new());
        let err = normalize(&table, &[]).expect_err("Notes column missing");
        match err {
            LedgerError::Schema(column) => assert_eq!(column, "Notes"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn header_match_is_case_sensitive() {
        let headers = StringRecord::from(vec![
            "date",
            "Description",
            "Original Description",
            "Amount",
            "Transaction Type",
            "Category",
            "Account Name",
            "Labels",
            "Notes",
        ]);
        let table = RawTable::new(headers, Vec::new());
        assert!(matches!(
            normalize(&table, &[]),
            Err(LedgerError::Schema(column)) if column == "Date"
        ));
    }

    #[test]
    fn malformed_amount_reports_the_row() {
        let table = RawTable::new(
            headers(),
            vec![
                record("1/02/2024", "COFFEE SHOP", "4.50", "debit", "Dining"),
                record("1/03/2024", "BAD ROW", "four dollars", "debit", "Dining"),
            ],
        );
        let err = normalize(&table, &[]).expect_err("second row malformed");
        match err {
            LedgerError::Parse { row, field, value } => {
                assert_eq!(row, 1);
                assert_eq!(field, "Amount");
                assert_eq!(value, "four dollars");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_date_reports_the_row() {
        let table = RawTable::new(
            headers(),
            vec![record("someday", "COFFEE SHOP", "4.50", "debit", "Dining")],
        );
        assert!(matches!(
            normalize(&table, &[]),
            Err(LedgerError::Parse { row: 0, field: "Date", .. })
        ));
    }

    #[test]
    fn accepts_currency_symbols_and_iso_dates() {
        let table = RawTable::new(
            headers(),
            vec![record(
                "2024-01-05",
                "BIG PURCHASE",
                "$1,234.56",
                "DEBIT",
                "Shopping",
            )],
        );
        let transactions = normalize(&table, &[]).unwrap();
        assert_eq!(transactions[0].amount, 1234.56);
        assert_eq!(transactions[0].kind, TransactionKind::Debit);
        assert_eq!(
            transactions[0].date,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn empty_table_normalizes_to_no_transactions() {
        let table = RawTable::new(headers(), Vec::new());
        assert!(normalize(&table, &[]).unwrap().is_empty());
    }
}
