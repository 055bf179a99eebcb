//! Transaction and totals types shared across the workspace.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Literal marker that flags a cash transaction in its description.
pub const CASH_MARKER: &str = "[Cash]";

/// A single transaction as supplied by the caller.
///
/// Loaded once and treated as read-only for the rest of the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Human-readable description (also carries the `[Cash]` marker)
    pub description: String,
    /// Signed amount; aggregation uses the magnitude only
    pub amount: f64,
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(description: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
        }
    }

    /// Magnitude used for all aggregation.
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    /// Payment method inferred from the `[Cash]` description marker.
    pub fn method(&self) -> PaymentMethod {
        if self.description.contains(CASH_MARKER) {
            PaymentMethod::Cash
        } else {
            PaymentMethod::Online
        }
    }
}

/// Cash vs. online partition of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "online")]
    Online,
}

/// Externally supplied scalar totals.
///
/// These are trusted inputs from the caller and are never recomputed from
/// the transaction list. They can therefore disagree with the detailed
/// list (e.g. totals covering transactions the list omits); callers own
/// that consistency, not this crate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    #[serde(default)]
    pub total_income: f64,
    #[serde(default)]
    pub total_expense: f64,
    #[serde(default)]
    pub cash_income: f64,
    #[serde(default)]
    pub cash_expense: f64,
    #[serde(default)]
    pub online_income: f64,
    #[serde(default)]
    pub online_expense: f64,
}
