//! The read-only analysis context every reply is derived from.

use serde_json::json;

use fintel_core::{CategoryAnalysis, KeywordTable, SpendingPatterns, Totals, Transaction, aggregate};

/// Aggregated view of one session's data. Built once at startup and
/// treated as immutable afterwards; every template and insight is a pure
/// function of this value.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    pub totals: Totals,
    pub analysis: CategoryAnalysis,
    pub patterns: SpendingPatterns,
    pub transaction_count: usize,
}

impl AnalysisContext {
    pub fn build(table: &KeywordTable, transactions: &[Transaction], totals: Totals) -> Self {
        let (analysis, patterns) = aggregate(table, transactions);
        Self {
            totals,
            analysis,
            patterns,
            transaction_count: transactions.len(),
        }
    }

    /// Financial-context block attached to remote completion requests.
    pub fn context_block(&self) -> String {
        let categories: serde_json::Value = self
            .analysis
            .buckets()
            .iter()
            .map(|b| (b.category.clone(), json!({"total": b.total, "count": b.count})))
            .collect::<serde_json::Map<_, _>>()
            .into();

        format!(
            "Financial Context:\n\
             - Total Income: ${:.2}\n\
             - Total Expenses: ${:.2}\n\
             - Cash Income: ${:.2}\n\
             - Cash Expenses: ${:.2}\n\
             - Online Income: ${:.2}\n\
             - Online Expenses: ${:.2}\n\
             - Categories: {}",
            self.totals.total_income,
            self.totals.total_expense,
            self.totals.cash_income,
            self.totals.cash_expense,
            self.totals.online_income,
            self.totals.online_expense,
            categories
        )
    }
}
