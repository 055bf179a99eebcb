//! Canned analysis templates: pure functions of the analysis context.
//!
//! These are the always-available local replies. They render undefined
//! ratios (zero recorded income) as "n/a" instead of propagating NaN.

use fintel_core::metrics::{
    ExpenseGrade, category_share, expense_ratio, net_balance, savings_rate, top_category,
};

use crate::context::AnalysisContext;
use crate::intents::Intent;

/// Produce the local reply for a query: dispatch on the detected intent,
/// or fall through to the default overview.
pub fn local_reply(query: &str, ctx: &AnalysisContext) -> String {
    match Intent::detect(query) {
        Some(Intent::Spending) => spending_analysis(ctx),
        Some(Intent::Income) => income_analysis(ctx),
        Some(Intent::Budget) => budget_health(ctx),
        Some(Intent::PaymentMethods) => payment_methods(ctx),
        Some(Intent::Advice) => advice(ctx),
        None => default_response(ctx),
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}%"),
        None => "n/a".to_string(),
    }
}

pub fn spending_analysis(ctx: &AnalysisContext) -> String {
    let totals = &ctx.totals;
    let rate = savings_rate(totals);

    let mut out = String::from("Spending analysis\n\n");
    out.push_str(&format!("Total expenses: ${:.2}\n", totals.total_expense));
    out.push_str(&format!("Savings rate: {}\n", fmt_pct(rate)));

    let top3: Vec<String> = ctx
        .analysis
        .sorted_by_total()
        .into_iter()
        .take(3)
        .map(|b| format!("{} (${:.2})", b.category, b.total))
        .collect();
    if !top3.is_empty() {
        out.push_str(&format!("Top categories: {}\n", top3.join(", ")));
    }

    if let Some(top) = top_category(&ctx.analysis) {
        let share = fmt_pct(category_share(top.total, totals.total_expense));
        out.push_str(&format!(
            "Highest spending: {} - ${:.2} ({share} of total)\n",
            top.category, top.total
        ));
    }

    let cash_share = fmt_pct(category_share(ctx.patterns.by_method.cash, totals.total_expense));
    let online_share = fmt_pct(category_share(ctx.patterns.by_method.online, totals.total_expense));
    out.push_str(&format!("Payment methods: cash {cash_share} | digital {online_share}\n\n"));

    match rate {
        None => out.push_str("No income recorded, so the savings rate is undefined."),
        Some(r) if r < 20.0 => out.push_str(
            "Budget alert: savings rate below 20%. Focus on reducing discretionary spending.",
        ),
        Some(r) if r > 30.0 => {
            out.push_str("Excellent: strong savings rate. Consider investment opportunities.")
        }
        Some(_) => out.push_str("Good progress: maintain current spending discipline."),
    }

    out
}

pub fn income_analysis(ctx: &AnalysisContext) -> String {
    let totals = &ctx.totals;
    let cash_share = fmt_pct(category_share(totals.cash_income, totals.total_income));
    let online_share = fmt_pct(category_share(totals.online_income, totals.total_income));

    let mut out = String::from("Income analysis\n\n");
    out.push_str(&format!("Total income: ${:.2}\n", totals.total_income));
    out.push_str(&format!("Cash income: ${:.2} ({cash_share})\n", totals.cash_income));
    out.push_str(&format!("Online income: ${:.2} ({online_share})\n\n", totals.online_income));

    if totals.cash_income > totals.online_income {
        out.push_str(
            "Pattern: you earn more through cash transactions. \
             This might be freelance work, tips, or a cash-based business.",
        );
    } else {
        out.push_str(
            "Pattern: you earn more through digital channels. \
             This suggests stable employment or an online business.",
        );
    }

    out
}

pub fn budget_health(ctx: &AnalysisContext) -> String {
    let totals = &ctx.totals;
    let balance = net_balance(totals);
    let ratio = expense_ratio(totals);

    let mut out = String::from("Budget health check\n\n");
    out.push_str(&format!("Net balance: ${balance:.2}\n"));
    out.push_str(&format!("Expense ratio: {}\n\n", fmt_pct(ratio)));

    if balance > 0.0 {
        out.push_str("Status: you're in the green with a positive cash flow.\n");
    } else {
        out.push_str("Status: you're spending more than you earn. Consider reducing expenses.\n");
    }

    match ratio.map(ExpenseGrade::from_ratio) {
        None => out.push_str(
            "Recommendation: no income recorded, so the expense ratio is undefined.",
        ),
        Some(ExpenseGrade::Excellent) => out.push_str(
            "Recommendation: excellent expense management: you're spending less than 70% of your income.",
        ),
        Some(ExpenseGrade::Good) => out.push_str(
            "Recommendation: good expense control. Consider finding ways to save more.",
        ),
        Some(ExpenseGrade::High) => out.push_str(
            "Recommendation: high expense ratio. Focus on reducing non-essential spending.",
        ),
    }

    out
}

pub fn payment_methods(ctx: &AnalysisContext) -> String {
    let totals = &ctx.totals;
    let cash_flow = totals.cash_income - totals.cash_expense;
    let online_flow = totals.online_income - totals.online_expense;

    let mut out = String::from("Payment method analysis\n\n");
    out.push_str(&format!("Cash flow: ${cash_flow:.2}\n"));
    out.push_str(&format!("Digital flow: ${online_flow:.2}\n\n"));

    if cash_flow.abs() > online_flow.abs() {
        out.push_str("Insight: cash transactions have the bigger impact on your finances.\n");
    } else {
        out.push_str("Insight: digital transactions dominate your financial activity.\n");
    }
    out.push_str("Tip: track cash expenses as carefully as digital ones; they're the easiest to lose sight of.");

    out
}

pub fn advice(ctx: &AnalysisContext) -> String {
    let rate = savings_rate(&ctx.totals);

    let mut out = String::from("Personalized financial advice\n\n");
    match rate {
        Some(r) if r > 30.0 => {
            out.push_str("Excellent work: you're saving over 30% of your income.\n");
            out.push_str("Consider investing your savings for long-term growth.\n");
        }
        Some(r) if r > 15.0 => {
            out.push_str("Good progress: you're building a solid savings foundation.\n");
            out.push_str("Try to increase your savings rate by 5% each month.\n");
        }
        Some(_) => {
            out.push_str("Focus area: building your savings should be a priority.\n");
            out.push_str("Start with a 10% savings goal and gradually increase.\n");
        }
        None => {
            out.push_str("No income recorded, so savings-rate advice is unavailable.\n");
        }
    }

    out.push_str(
        "\nQuick wins:\n\
         - Review recurring subscriptions\n\
         - Set up automatic savings transfers\n\
         - Track all expenses for 30 days\n\
         - Build an emergency fund (3-6 months of expenses)",
    );

    out
}

pub fn default_response(ctx: &AnalysisContext) -> String {
    let mut out = String::from("I can help you analyze your financial data. ");
    if ctx.transaction_count > 0 {
        out.push_str(&format!(
            "I've analyzed {} transactions across {} categories. ",
            ctx.transaction_count,
            ctx.analysis.len()
        ));
    }
    out.push_str(
        "You can ask me about:\n\n\
         - Spending patterns and categories\n\
         - Income analysis\n\
         - Budget health and savings rate\n\
         - Payment methods (cash vs digital)\n\
         - Financial recommendations\n\n\
         What would you like to know?",
    );
    out
}

// Greeting shown for a fresh transcript.
pub const GREETING: &str = "Hello! I'm your financial assistant. I can analyze your transactions, \
provide spending insights, and help you understand your financial patterns. \
Ask me anything about your finances!";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fintel_core::{KeywordTable, Totals, Transaction};

    fn ctx() -> AnalysisContext {
        let d = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let table = KeywordTable::default_table();
        let txns = vec![
            Transaction::new("Grocery store [Cash]", -800.0, d),
            Transaction::new("Uber rides", -400.0, d),
            Transaction::new("Online store order", -2000.0, d),
        ];
        let totals = Totals {
            total_income: 4000.0,
            total_expense: 3200.0,
            cash_income: 500.0,
            cash_expense: 800.0,
            online_income: 3500.0,
            online_expense: 2400.0,
        };
        AnalysisContext::build(&table, &txns, totals)
    }

    fn zero_income_ctx() -> AnalysisContext {
        let table = KeywordTable::default_table();
        AnalysisContext::build(
            &table,
            &[],
            Totals {
                total_expense: 500.0,
                ..Totals::default()
            },
        )
    }

    #[test]
    fn test_spending_query_routes_to_spending_template() {
        let reply = local_reply("How's my spending?", &ctx());
        assert!(reply.starts_with("Spending analysis"));
        assert!(reply.contains("Total expenses: $3200.00"));
        assert!(reply.contains("Savings rate: 20.0%"));
    }

    #[test]
    fn test_spending_top_category_and_shares() {
        let reply = spending_analysis(&ctx());
        // shopping ($2000) leads, then food ($800), then transport ($400)
        assert!(reply.contains("Top categories: shopping ($2000.00), food ($800.00), transport ($400.00)"));
        assert!(reply.contains("Highest spending: shopping - $2000.00 (62.5% of total)"));
        assert!(reply.contains("cash 25.0% | digital 75.0%"));
    }

    #[test]
    fn test_unknown_query_routes_to_default_with_all_topics() {
        let reply = local_reply("asdkjasd", &ctx());
        assert!(reply.contains("3 transactions across 3 categories"));
        for topic in [
            "Spending patterns and categories",
            "Income analysis",
            "Budget health and savings rate",
            "Payment methods (cash vs digital)",
            "Financial recommendations",
        ] {
            assert!(reply.contains(topic), "missing topic: {topic}");
        }
    }

    #[test]
    fn test_default_with_no_transactions_omits_counts() {
        let reply = default_response(&zero_income_ctx());
        assert!(!reply.contains("analyzed"));
        assert!(reply.contains("What would you like to know?"));
    }

    #[test]
    fn test_budget_template() {
        let reply = budget_health(&ctx());
        assert!(reply.contains("Net balance: $800.00"));
        assert!(reply.contains("Expense ratio: 80.0%"));
        assert!(reply.contains("in the green"));
        assert!(reply.contains("good expense control"));
    }

    #[test]
    fn test_income_template_pattern_line() {
        let reply = income_analysis(&ctx());
        assert!(reply.contains("Cash income: $500.00 (12.5%)"));
        assert!(reply.contains("digital channels"));
    }

    #[test]
    fn test_payment_methods_template() {
        let reply = payment_methods(&ctx());
        assert!(reply.contains("Cash flow: $-300.00"));
        assert!(reply.contains("Digital flow: $1100.00"));
        assert!(reply.contains("digital transactions dominate"));
    }

    #[test]
    fn test_zero_income_renders_na_everywhere() {
        let c = zero_income_ctx();
        assert!(spending_analysis(&c).contains("Savings rate: n/a"));
        assert!(budget_health(&c).contains("Expense ratio: n/a"));
        assert!(advice(&c).contains("savings-rate advice is unavailable"));
    }

    #[test]
    fn test_advice_bands() {
        let reply = advice(&ctx()); // rate 20 → "good progress" band (>15)
        assert!(reply.contains("Good progress"));
        assert!(reply.contains("Quick wins"));
    }
}
