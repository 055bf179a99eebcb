//! Short insight summaries (one or two lines each) derived from the
//! analysis context. Used by the `analyze` command's insight cards.

use fintel_core::metrics::{
    SavingsGrade, category_share, expense_ratio, net_balance, savings_rate,
};

use crate::context::AnalysisContext;

/// The four insight card texts.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightCards {
    pub spending_trend: String,
    pub top_category: String,
    pub budget_health: String,
    pub recommendation: String,
}

impl InsightCards {
    pub fn build(ctx: &AnalysisContext) -> Self {
        Self {
            spending_trend: spending_trend(ctx),
            top_category: top_category_card(ctx),
            budget_health: budget_health_card(ctx),
            recommendation: recommendation(ctx),
        }
    }
}

fn fmt_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{r:.1}%"),
        None => "n/a".to_string(),
    }
}

pub fn spending_trend(ctx: &AnalysisContext) -> String {
    if ctx.totals.total_expense == 0.0 {
        return "No spending data available".to_string();
    }

    let rate = savings_rate(&ctx.totals);
    if let Some(top) = ctx.analysis.sorted_by_total().first() {
        if let Some(share) = category_share(top.total, ctx.totals.total_expense) {
            return format!(
                "{} dominates spending ({share:.1}%). Savings rate: {}",
                top.category,
                fmt_rate(rate)
            );
        }
    }

    match rate {
        Some(r) if r > 20.0 => format!("Savings rate: {r:.1}%. Excellent control"),
        Some(r) => format!("Savings rate: {r:.1}%. Consider reducing expenses"),
        None => "Savings rate: n/a (no income recorded)".to_string(),
    }
}

pub fn top_category_card(ctx: &AnalysisContext) -> String {
    match ctx.analysis.sorted_by_total().first() {
        Some(top) => format!(
            "{}: ${:.2} ({} transactions)",
            top.category, top.total, top.count
        ),
        None => "No transaction categories identified".to_string(),
    }
}

pub fn budget_health_card(ctx: &AnalysisContext) -> String {
    let balance = net_balance(&ctx.totals);
    let ratio = fmt_rate(expense_ratio(&ctx.totals));

    if balance > 1000.0 {
        format!("Strong positive flow: +${balance:.2}. Expense ratio: {ratio}")
    } else if balance > 0.0 {
        format!("Positive balance: +${balance:.2}. Expense ratio: {ratio}")
    } else {
        format!("Negative flow: -${:.2}. Expense ratio: {ratio}", balance.abs())
    }
}

pub fn recommendation(ctx: &AnalysisContext) -> String {
    let top = ctx.analysis.sorted_by_total().first().map(|b| b.category.clone());

    match savings_rate(&ctx.totals).map(SavingsGrade::from_rate) {
        None => "No income recorded. Add income data to get savings guidance.".to_string(),
        Some(SavingsGrade::NeedsImprovement) => {
            "Start with 10% automatic savings. Review discretionary spending.".to_string()
        }
        Some(SavingsGrade::Good) => match top {
            Some(cat) => format!("Increase savings to 20%. Consider reducing {cat} expenses."),
            None => "Increase savings to 20%.".to_string(),
        },
        Some(SavingsGrade::VeryGood | SavingsGrade::Excellent) => {
            "Excellent savings! Consider investment options and an emergency fund.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fintel_core::{KeywordTable, Totals, Transaction};

    fn ctx(income: f64, expense: f64, txns: Vec<Transaction>) -> AnalysisContext {
        let table = KeywordTable::default_table();
        AnalysisContext::build(
            &table,
            &txns,
            Totals {
                total_income: income,
                total_expense: expense,
                ..Totals::default()
            },
        )
    }

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
    }

    #[test]
    fn test_spending_trend_no_data() {
        let c = ctx(1000.0, 0.0, vec![]);
        assert_eq!(spending_trend(&c), "No spending data available");
    }

    #[test]
    fn test_spending_trend_with_top_category() {
        let c = ctx(
            4000.0,
            3200.0,
            vec![Transaction::new("Grocery run", -3200.0, d())],
        );
        let card = spending_trend(&c);
        assert!(card.contains("food dominates spending (100.0%)"));
        assert!(card.contains("Savings rate: 20.0%"));
    }

    #[test]
    fn test_top_category_card() {
        let c = ctx(0.0, 0.0, vec![]);
        assert_eq!(top_category_card(&c), "No transaction categories identified");

        let c = ctx(
            0.0,
            0.0,
            vec![
                Transaction::new("Grocery run", -40.0, d()),
                Transaction::new("Taxi", -90.0, d()),
            ],
        );
        assert_eq!(top_category_card(&c), "transport: $90.00 (1 transactions)");
    }

    #[test]
    fn test_budget_health_bands() {
        assert!(budget_health_card(&ctx(5000.0, 3000.0, vec![])).starts_with("Strong positive flow: +$2000.00"));
        assert!(budget_health_card(&ctx(3500.0, 3000.0, vec![])).starts_with("Positive balance: +$500.00"));
        assert!(budget_health_card(&ctx(2000.0, 3000.0, vec![])).starts_with("Negative flow: -$1000.00"));
    }

    #[test]
    fn test_recommendation_bands() {
        assert!(recommendation(&ctx(1000.0, 950.0, vec![])).starts_with("Start with 10%"));
        let mid = recommendation(&ctx(
            1000.0,
            850.0,
            vec![Transaction::new("Grocery run", -850.0, d())],
        ));
        assert_eq!(mid, "Increase savings to 20%. Consider reducing food expenses.");
        assert!(recommendation(&ctx(1000.0, 700.0, vec![])).starts_with("Excellent savings!"));
        assert!(recommendation(&ctx(0.0, 700.0, vec![])).starts_with("No income recorded"));
    }
}
