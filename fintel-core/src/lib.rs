//! fintel-core: transaction model, keyword categorizer, aggregator, and
//! metric calculator for the fintel assistant.

pub mod analysis;
pub mod keywords;
pub mod metrics;
pub mod transaction;

pub use analysis::{CategoryAnalysis, CategoryBucket, MethodTotals, SpendingPatterns, aggregate};
pub use keywords::{CategoryRule, KeywordTable, OTHER_CATEGORY};
pub use metrics::{ExpenseGrade, SavingsGrade};
pub use transaction::{PaymentMethod, Totals, Transaction};
