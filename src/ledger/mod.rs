//! Durable history of threshold decisions.
//!
//! The ledger is a single JSON document:
//!
//! ```json
//! {"threshold_history": [ ... ], "adjustments_applied": 3}
//! ```
//!
//! Entries are only ever appended (or, with a retention cap, dropped from
//! the front). Statistics are recomputed from the file on every request.

pub mod statistics;
pub mod store;

pub use statistics::{LedgerStatistics, StatisticsReport};
pub use store::{DecisionLedger, LedgerFile, LEDGER_FILE_NAME, LOCK_FILE_NAME};
