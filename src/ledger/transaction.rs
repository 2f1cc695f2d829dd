use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single normalized row from a transaction export.
///
/// Identity fields (`id`, `date`, `description`, `amount`, `kind`) never
/// change after construction. `ignored` is the only field the ledger
/// mutates; `category` is read-only to this crate and comes straight from
/// the export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Stable id assigned at build time, equal to the source row position.
    pub id: usize,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub ignored: bool,
}

impl Transaction {
    pub fn new(
        id: usize,
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date,
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            ignored: false,
        }
    }

    /// True when this transaction contributes to the counted debit total.
    pub fn is_counted_debit(&self) -> bool {
        self.kind == TransactionKind::Debit && !self.ignored
    }

    /// True when this transaction contributes to the counted credit total.
    pub fn is_counted_credit(&self) -> bool {
        self.kind == TransactionKind::Credit && !self.ignored
    }
}

/// Direction of a transaction, matching the export's lowercase literals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Debit,
    Credit,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Debit => "debit",
            TransactionKind::Credit => "credit",
        }
    }

    /// Parses the export's `Transaction Type` column, accepting any casing.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "debit" => Some(TransactionKind::Debit),
            "credit" => Some(TransactionKind::Credit),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_any_casing() {
        assert_eq!(TransactionKind::parse("debit"), Some(TransactionKind::Debit));
        assert_eq!(TransactionKind::parse("DEBIT"), Some(TransactionKind::Debit));
        assert_eq!(
            TransactionKind::parse(" Credit "),
            Some(TransactionKind::Credit)
        );
        assert_eq!(TransactionKind::parse("wire"), None);
    }

    #[test]
    fn kind_displays_lowercase_literal() {
        assert_eq!(TransactionKind::Debit.to_string(), "debit");
        assert_eq!(TransactionKind::Credit.to_string(), "credit");
    }
}
