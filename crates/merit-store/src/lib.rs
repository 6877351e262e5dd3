//! Storage interfaces and in-memory backends.
//!
//! Reports, trades, and valuation snapshots are durable rows in the full
//! platform; schema management lives outside this subsystem. The traits here
//! are the seam: the service and its tests run on the in-memory backends,
//! and a shared datastore can be swapped in behind the same interfaces.

pub mod error;
pub mod reports;
pub mod subjects;
pub mod tokens;
pub mod trades;

pub use error::{StoreError, StoreResult};
pub use reports::{InMemoryReportStore, ReportStore};
pub use subjects::{InMemorySubjectStore, SubjectStore};
pub use tokens::{InMemoryTokenDirectory, TokenDirectory};
pub use trades::{InMemoryTradeStore, TradeStore};
