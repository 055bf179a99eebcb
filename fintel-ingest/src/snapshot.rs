//! JSON snapshot files: the caller-supplied transaction list plus the
//! six scalar totals.
//!
//! The totals are read as-is and never recomputed from the list; nothing
//! here checks that the two agree.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fintel_core::{Totals, Transaction};

/// One session's worth of input data.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(flatten)]
    pub totals: Totals,
}

/// Load a snapshot file. Unlike configuration, a missing or malformed
/// data file is a hard error: there is nothing sensible to analyze
/// without it.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "transactions": [
            {"description": "Grocery store [Cash]", "amount": -45.2, "date": "2026-05-01"},
            {"description": "Salary deposit", "amount": 2500.0, "date": "2026-05-03"}
        ],
        "total_income": 2500.0,
        "total_expense": 45.2,
        "cash_income": 0.0,
        "cash_expense": 45.2,
        "online_income": 2500.0,
        "online_expense": 0.0
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snap: Snapshot = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(snap.transactions.len(), 2);
        assert_eq!(snap.totals.total_income, 2500.0);
        assert_eq!(snap.totals.cash_expense, 45.2);
    }

    #[test]
    fn test_missing_totals_default_to_zero() {
        let snap: Snapshot =
            serde_json::from_str(r#"{"transactions": []}"#).unwrap();
        assert!(snap.transactions.is_empty());
        assert_eq!(snap.totals, Totals::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(SAMPLE.as_bytes()).unwrap();
        let snap = load_snapshot(f.path()).unwrap();
        assert_eq!(snap.transactions[0].description, "Grocery store [Cash]");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"not json").unwrap();
        assert!(load_snapshot(f.path()).is_err());
    }
}
