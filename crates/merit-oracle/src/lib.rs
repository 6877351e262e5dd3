//! Oracle consensus for merit.
//!
//! Reports about a subject enter as pending claims and are settled by a
//! small roster of oracle reporters. Submission counts as the submitter's
//! own approval; further reporters vote the report up or down until it
//! either reaches the confirmation quorum or can no longer reach it. The
//! pending -> confirmed transition is the only place a subject revaluation
//! is triggered.

pub mod config;
pub mod consensus;
pub mod error;
pub mod valuator;

pub use config::{ConsensusConfig, ValuatorConfig};
pub use consensus::{ConsensusEngine, ReportSubmission};
pub use error::{OracleError, OracleResult};
pub use valuator::{SentimentValuator, Valuator};
