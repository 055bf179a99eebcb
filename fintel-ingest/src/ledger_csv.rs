//! Parse plain ledger CSV exports into typed transactions.
//!
//! Expected layout:
//!   date,description,amount
//!   2026-05-01,Grocery store [Cash],-45.20
//!
//! Rows with an unparseable date or amount are skipped rather than
//! failing the whole file.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use fintel_core::Transaction;

pub fn parse_ledger_csv(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    parse_records(rdr)
}

fn parse_records<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Vec<Transaction>> {
    let mut txns = Vec::new();

    for result in rdr.records() {
        let record = result?;

        let date_str = record.get(0).unwrap_or("").trim();
        let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => continue,
        };

        let description = record.get(1).unwrap_or("").trim().to_string();

        let amount: f64 = match record.get(2).unwrap_or("").trim().replace(',', "").parse() {
            Ok(a) => a,
            Err(_) => continue,
        };

        txns.push(Transaction::new(description, amount, date));
    }

    Ok(txns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(data: &str) -> Vec<Transaction> {
        let rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(data.as_bytes());
        parse_records(rdr).unwrap()
    }

    #[test]
    fn test_parse_basic() {
        let txns = parse_str(
            "date,description,amount\n\
             2026-05-01,Grocery store [Cash],-45.20\n\
             2026-05-03,Salary deposit,\"2,500.00\"\n",
        );
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].description, "Grocery store [Cash]");
        assert_eq!(txns[0].amount, -45.20);
        assert_eq!(txns[1].amount, 2500.00);
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let txns = parse_str(
            "date,description,amount\n\
             not-a-date,Grocery store,-45.20\n\
             2026-05-02,Coffee,abc\n\
             2026-05-03,Taxi home,-18.00\n",
        );
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "Taxi home");
    }

    #[test]
    fn test_empty_file() {
        let txns = parse_str("date,description,amount\n");
        assert!(txns.is_empty());
    }
}
