//! Transaction data aggregation for the summary figures and charts.
//!
//! Everything here is recomputed from the snapshot on every render; nothing
//! is cached between requests.

use std::collections::BTreeMap;

use time::Date;

use crate::transaction::{Transaction, TransactionType};

/// The totals per transaction type.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct Summary {
    pub revenue: f64,
    pub expense: f64,
    pub loss: f64,
}

impl Summary {
    fn add(&mut self, kind: TransactionType, value: f64) {
        match kind {
            TransactionType::Revenue => self.revenue += value,
            TransactionType::Expense => self.expense += value,
            TransactionType::Loss => self.loss += value,
        }
    }

    /// Revenue minus expenses and losses.
    pub fn result(&self) -> f64 {
        self.revenue - self.expense - self.loss
    }
}

/// Sums the transactions by type. An empty snapshot sums to zero.
pub(super) fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary::default();

    for transaction in transactions {
        summary.add(transaction.kind, transaction.value);
    }

    summary
}

/// Per-type totals for each month, with the months in ascending order.
///
/// The four vectors always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct MonthlySeries {
    /// Months formatted as "YYYY-MM".
    pub labels: Vec<String>,
    pub revenue: Vec<f64>,
    pub expense: Vec<f64>,
    pub loss: Vec<f64>,
}

/// The "YYYY-MM" bucket a date falls into.
fn month_key(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

/// Buckets the transactions by month and sums each type within a bucket.
pub(super) fn monthly_series(transactions: &[Transaction]) -> MonthlySeries {
    // Zero padded keys sort in calendar order.
    let mut buckets: BTreeMap<String, Summary> = BTreeMap::new();

    for transaction in transactions {
        buckets
            .entry(month_key(transaction.date))
            .or_default()
            .add(transaction.kind, transaction.value);
    }

    let mut series = MonthlySeries::default();

    for (label, summary) in buckets {
        series.labels.push(label);
        series.revenue.push(summary.revenue);
        series.expense.push(summary.expense);
        series.loss.push(summary.loss);
    }

    series
}

/// Loss totals per category.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct CategoryBreakdown {
    /// Categories in the order they first appear in the snapshot.
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Sums the losses by category, keeping first-occurrence order.
pub(super) fn losses_by_category(transactions: &[Transaction]) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();

    let losses = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionType::Loss);

    for transaction in losses {
        match breakdown
            .labels
            .iter()
            .position(|label| *label == transaction.category)
        {
            Some(index) => breakdown.values[index] += transaction.value,
            None => {
                breakdown.labels.push(transaction.category.clone());
                breakdown.values.push(transaction.value);
            }
        }
    }

    breakdown
}
