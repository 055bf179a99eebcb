//! fintel-ingest: loading transaction data into the analysis engine
//! (JSON snapshots and plain ledger CSV exports).

pub mod ledger_csv;
pub mod snapshot;

pub use ledger_csv::parse_ledger_csv;
pub use snapshot::{Snapshot, load_snapshot};
