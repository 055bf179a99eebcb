//! Pure metric functions over supplied totals and the category analysis.
//!
//! Ratio metrics return `None` when total income is zero: the ratio is
//! mathematically undefined there, and `None` is the documented sentinel
//! (callers render it as "n/a" rather than propagating NaN/inf).

use serde::Serialize;

use crate::analysis::{CategoryAnalysis, CategoryBucket};
use crate::transaction::Totals;

/// `(income - expense) / income * 100`, or `None` when income is zero.
pub fn savings_rate(totals: &Totals) -> Option<f64> {
    if totals.total_income == 0.0 {
        return None;
    }
    Some((totals.total_income - totals.total_expense) / totals.total_income * 100.0)
}

/// `expense / income * 100`, or `None` when income is zero.
pub fn expense_ratio(totals: &Totals) -> Option<f64> {
    if totals.total_income == 0.0 {
        return None;
    }
    Some(totals.total_expense / totals.total_income * 100.0)
}

pub fn net_balance(totals: &Totals) -> f64 {
    totals.total_income - totals.total_expense
}

/// Bucket with the largest total. Ties go to the earliest (first-seen)
/// bucket: the scan uses strict `>`, so a later equal total never
/// displaces an earlier one.
pub fn top_category(analysis: &CategoryAnalysis) -> Option<&CategoryBucket> {
    let mut best: Option<&CategoryBucket> = None;
    for bucket in analysis.buckets() {
        match best {
            Some(b) if bucket.total > b.total => best = Some(bucket),
            None => best = Some(bucket),
            _ => {}
        }
    }
    best
}

/// A bucket's share of the supplied expense total, or `None` when that
/// total is zero.
pub fn category_share(bucket_total: f64, total_expense: f64) -> Option<f64> {
    if total_expense == 0.0 {
        return None;
    }
    Some(bucket_total / total_expense * 100.0)
}

/// Qualitative savings-rate bands. Cut-points are exact and exclusive on
/// the lower side: exactly 20.0 is VeryGood, 19.99 is Good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SavingsGrade {
    NeedsImprovement,
    Good,
    VeryGood,
    Excellent,
}

impl SavingsGrade {
    pub fn from_rate(rate: f64) -> Self {
        if rate < 10.0 {
            SavingsGrade::NeedsImprovement
        } else if rate < 20.0 {
            SavingsGrade::Good
        } else if rate < 30.0 {
            SavingsGrade::VeryGood
        } else {
            SavingsGrade::Excellent
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SavingsGrade::NeedsImprovement => "needs improvement",
            SavingsGrade::Good => "good",
            SavingsGrade::VeryGood => "very good",
            SavingsGrade::Excellent => "excellent",
        }
    }
}

/// Expense-ratio bands used by the budget health template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExpenseGrade {
    Excellent,
    Good,
    High,
}

impl ExpenseGrade {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 70.0 {
            ExpenseGrade::Excellent
        } else if ratio < 90.0 {
            ExpenseGrade::Good
        } else {
            ExpenseGrade::High
        }
    }
}
