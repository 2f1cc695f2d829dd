use serde::{Deserialize, Serialize};

/// Sum of transaction amounts for one category label.
///
/// Derived from the transaction sequence at build time and never mutated
/// directly. The sum includes ignored transactions: ignoring only affects
/// the counted debit/credit totals, not the category view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryAggregate {
    pub label: String,
    pub sum: f64,
}

impl CategoryAggregate {
    pub fn new(label: impl Into<String>, sum: f64) -> Self {
        Self {
            label: label.into(),
            sum,
        }
    }
}
