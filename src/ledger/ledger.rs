use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;

use crate::errors::LedgerError;
use crate::import::{self, RawTable};

use super::category::CategoryAggregate;
use super::classify::looks_like_transfer;
use super::transaction::Transaction;

/// The ordered transaction sequence for one loaded export plus its derived
/// category view.
///
/// The transaction vector is private: its order is the source-file order,
/// selections reference positions into it, and no operation may reorder it.
/// `toggle_ignore` is the only mutation; a new export builds a fresh ledger.
#[derive(Debug, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    aggregates: Vec<CategoryAggregate>,
}

/// Row coloring assigned by [`Ledger::highlights`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Counts toward the debit/credit totals.
    Counted,
    /// Excluded from the counted totals.
    Ignored,
    /// In the selected category and counted.
    SelectedCounted,
    /// In the selected category but ignored.
    SelectedIgnored,
    /// Not in the selected category.
    Neutral,
}

/// Which partition [`Ledger::highlights`] should compute.
#[derive(Debug, Clone, Copy)]
pub enum HighlightSelector<'a> {
    /// Two-way partition by the `ignored` flag.
    IgnoreState,
    /// Three-way partition around one category label.
    Category(&'a str),
}

impl Ledger {
    /// Builds a ledger from raw export rows: normalize, classify, aggregate.
    ///
    /// All-or-nothing: any schema or row error aborts construction and no
    /// partial ledger is produced.
    pub fn build(table: &RawTable, known_prefixes: &[String]) -> Result<Self, LedgerError> {
        let transactions = import::normalize(table, known_prefixes)?;
        Ok(Self::from_transactions(transactions))
    }

    /// Assembles a ledger from already-normalized transactions, seeding each
    /// `ignored` flag from the transfer heuristic.
    pub fn from_transactions(mut transactions: Vec<Transaction>) -> Self {
        for txn in &mut transactions {
            txn.ignored = looks_like_transfer(&txn.description);
        }
        let aggregates = aggregate_by_category(&transactions);
        info!(
            transactions = transactions.len(),
            categories = aggregates.len(),
            "Ledger built."
        );
        Self {
            transactions,
            aggregates,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Flips the `ignored` flag at `index` and returns the new value.
    ///
    /// Index validity is checked against this ledger, not any snapshot, so
    /// stale selections from a previous load surface as a recoverable
    /// [`LedgerError::Index`] and leave every flag unchanged.
    pub fn toggle_ignore(&mut self, index: usize) -> Result<bool, LedgerError> {
        let len = self.transactions.len();
        let txn = self
            .transactions
            .get_mut(index)
            .ok_or(LedgerError::Index { index, len })?;
        txn.ignored = !txn.ignored;
        Ok(txn.ignored)
    }

    /// Sum of non-ignored debit amounts, rounded half-to-even to 2 decimals.
    pub fn total_counted_debits(&self) -> f64 {
        round2(
            self.transactions
                .iter()
                .filter(|txn| txn.is_counted_debit())
                .map(|txn| txn.amount)
                .sum(),
        )
    }

    /// Sum of non-ignored credit amounts, rounded half-to-even to 2 decimals.
    pub fn total_counted_credits(&self) -> f64 {
        round2(
            self.transactions
                .iter()
                .filter(|txn| txn.is_counted_credit())
                .map(|txn| txn.amount)
                .sum(),
        )
    }

    /// Earliest and latest transaction dates, ignored rows included.
    pub fn date_range(&self) -> Result<(NaiveDate, NaiveDate), LedgerError> {
        let mut dates = self.transactions.iter().map(|txn| txn.date);
        let first = dates.next().ok_or(LedgerError::EmptyLedger)?;
        let (min, max) = dates.fold((first, first), |(min, max), date| {
            (min.min(date), max.max(date))
        });
        Ok((min, max))
    }

    /// Per-category sums, ascending by sum.
    ///
    /// Aggregates include ignored transactions, so this view is invariant
    /// under `toggle_ignore` and stays valid for the ledger's lifetime.
    pub fn category_breakdown(&self) -> &[CategoryAggregate] {
        &self.aggregates
    }

    /// Computes a row-color partition without mutating any state.
    pub fn highlights(&self, selector: HighlightSelector<'_>) -> Vec<(usize, Highlight)> {
        self.transactions
            .iter()
            .enumerate()
            .map(|(idx, txn)| {
                let highlight = match selector {
                    HighlightSelector::IgnoreState => {
                        if txn.ignored {
                            Highlight::Ignored
                        } else {
                            Highlight::Counted
                        }
                    }
                    HighlightSelector::Category(label) => {
                        if txn.category == label {
                            if txn.ignored {
                                Highlight::SelectedIgnored
                            } else {
                                Highlight::SelectedCounted
                            }
                        } else {
                            Highlight::Neutral
                        }
                    }
                };
                (idx, highlight)
            })
            .collect()
    }
}

/// Rounds a monetary value to two decimals, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn aggregate_by_category(transactions: &[Transaction]) -> Vec<CategoryAggregate> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for txn in transactions {
        *sums.entry(txn.category.as_str()).or_insert(0.0) += txn.amount;
    }
    let mut aggregates: Vec<CategoryAggregate> = sums
        .into_iter()
        .map(|(label, sum)| CategoryAggregate::new(label, round2(sum)))
        .collect();
    aggregates.sort_by(|a, b| a.sum.total_cmp(&b.sum).then_with(|| a.label.cmp(&b.label)));
    aggregates
}
