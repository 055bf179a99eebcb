//! Single-pass aggregation of transactions into category, payment-method,
//! and per-day partitions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::keywords::KeywordTable;
use crate::transaction::{PaymentMethod, Transaction};

/// Per-category accumulator.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryBucket {
    pub category: String,
    pub total: f64,
    pub count: usize,
    pub transactions: Vec<Transaction>,
}

/// Category buckets in first-seen order.
///
/// Insertion order is deliberately kept: it is what makes max-scans over
/// the buckets (top category) deterministic.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CategoryAnalysis {
    buckets: Vec<CategoryBucket>,
}

impl CategoryAnalysis {
    pub fn buckets(&self) -> &[CategoryBucket] {
        &self.buckets
    }

    pub fn get(&self, category: &str) -> Option<&CategoryBucket> {
        self.buckets.iter().find(|b| b.category == category)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sum of all bucket totals.
    pub fn grand_total(&self) -> f64 {
        self.buckets.iter().map(|b| b.total).sum()
    }

    /// Buckets sorted by descending total. Equal totals keep their
    /// first-seen relative order (stable sort).
    pub fn sorted_by_total(&self) -> Vec<&CategoryBucket> {
        let mut out: Vec<&CategoryBucket> = self.buckets.iter().collect();
        out.sort_by(|a, b| b.total.total_cmp(&a.total));
        out
    }

    fn add(&mut self, category: &str, txn: &Transaction) {
        let amount = txn.abs_amount();
        match self.buckets.iter_mut().find(|b| b.category == category) {
            Some(bucket) => {
                bucket.total += amount;
                bucket.count += 1;
                bucket.transactions.push(txn.clone());
            }
            None => self.buckets.push(CategoryBucket {
                category: category.to_string(),
                total: amount,
                count: 1,
                transactions: vec![txn.clone()],
            }),
        }
    }
}

/// Cash/online split of aggregated magnitudes.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct MethodTotals {
    pub cash: f64,
    pub online: f64,
}

impl MethodTotals {
    pub fn sum(&self) -> f64 {
        self.cash + self.online
    }
}

/// Method and per-day partitions of the same transaction list.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SpendingPatterns {
    pub by_method: MethodTotals,
    /// Keyed by the transaction's date truncated to day granularity,
    /// exactly as supplied (no timezone handling).
    pub by_day: BTreeMap<NaiveDate, f64>,
}

impl SpendingPatterns {
    pub fn day_total(&self) -> f64 {
        self.by_day.values().sum()
    }
}

/// Fold a transaction list into category and spending-pattern partitions.
///
/// Each transaction contributes `abs(amount)` exactly once to its
/// category, its payment method, and its day, so the three partition
/// totals agree. An empty list yields empty maps.
pub fn aggregate(
    table: &KeywordTable,
    transactions: &[Transaction],
) -> (CategoryAnalysis, SpendingPatterns) {
    let mut analysis = CategoryAnalysis::default();
    let mut patterns = SpendingPatterns::default();

    for txn in transactions {
        let category = table.categorize(&txn.description).to_string();
        analysis.add(&category, txn);

        let amount = txn.abs_amount();
        match txn.method() {
            PaymentMethod::Cash => patterns.by_method.cash += amount,
            PaymentMethod::Online => patterns.by_method.online += amount,
        }
        *patterns.by_day.entry(txn.date).or_insert(0.0) += amount;
    }

    (analysis, patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, day).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new("Grocery store [Cash]", -45.20, d(1)),
            Transaction::new("Uber ride downtown", -18.75, d(1)),
            Transaction::new("Movie night", -30.00, d(2)),
            Transaction::new("Mystery payment", -12.00, d(3)),
            Transaction::new("Salary deposit", 2500.00, d(3)),
        ]
    }

    #[test]
    fn test_partition_totals_agree() {
        let table = KeywordTable::default_table();
        let txns = sample();
        let (analysis, patterns) = aggregate(&table, &txns);

        let by_category = analysis.grand_total();
        let by_method = patterns.by_method.sum();
        let by_day = patterns.day_total();

        assert!((by_category - by_method).abs() < 1e-9);
        assert!((by_method - by_day).abs() < 1e-9);
        // magnitudes, so income counts too
        let expected = 45.20 + 18.75 + 30.00 + 12.00 + 2500.00;
        assert!((by_category - expected).abs() < 1e-9);
    }

    #[test]
    fn test_category_buckets() {
        let table = KeywordTable::default_table();
        let (analysis, _) = aggregate(&table, &sample());

        let food = analysis.get("food").unwrap();
        assert_eq!(food.count, 1);
        assert!((food.total - 45.20).abs() < 1e-9);

        let transport = analysis.get("transport").unwrap();
        assert_eq!(transport.count, 1);

        // salary + mystery payment both land in "other"
        let other = analysis.get("other").unwrap();
        assert_eq!(other.count, 2);
    }

    #[test]
    fn test_method_split_follows_cash_marker() {
        let table = KeywordTable::default_table();
        let (_, patterns) = aggregate(&table, &sample());
        assert!((patterns.by_method.cash - 45.20).abs() < 1e-9);
        assert!((patterns.by_method.online - (18.75 + 30.00 + 12.00 + 2500.00)).abs() < 1e-9);
    }

    #[test]
    fn test_by_day_keys() {
        let table = KeywordTable::default_table();
        let (_, patterns) = aggregate(&table, &sample());
        assert_eq!(patterns.by_day.len(), 3);
        assert!((patterns.by_day[&d(1)] - (45.20 + 18.75)).abs() < 1e-9);
        assert!((patterns.by_day[&d(3)] - (12.00 + 2500.00)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_list_yields_empty_maps() {
        let table = KeywordTable::default_table();
        let (analysis, patterns) = aggregate(&table, &[]);
        assert!(analysis.is_empty());
        assert!(patterns.by_day.is_empty());
        assert_eq!(patterns.by_method.sum(), 0.0);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let table = KeywordTable::default_table();
        let txns = sample();
        let first = aggregate(&table, &txns);
        let second = aggregate(&table, &txns);
        assert_eq!(first, second);
    }

    #[test]
    fn test_bucket_order_is_first_seen() {
        let table = KeywordTable::default_table();
        let (analysis, _) = aggregate(&table, &sample());
        let order: Vec<&str> = analysis
            .buckets()
            .iter()
            .map(|b| b.category.as_str())
            .collect();
        assert_eq!(order, vec!["food", "transport", "entertainment", "other"]);
    }
}
