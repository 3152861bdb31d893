//! IAMGuardian - multi-cloud IAM audit and remediation tracking
//!
//! Scans cloud identity configurations for security weaknesses, persists the
//! resulting findings, and scores them against compliance frameworks.
//!
//! # Modules
//!
//! - `models` - the normalized `Finding` record and its closed enumerations
//! - `scanner` - per-provider scanners producing findings
//! - `storage` - durable keyed persistence with upsert semantics
//! - `analyzer` - pure aggregation: statistics, compliance scores, priorities
//! - `report` - terminal rendering of the above
//!
//! # Example
//!
//! ```rust,no_run
//! use iamguardian::scanner::{AwsScanner, Scanner};
//! use iamguardian::storage::{LocalStorage, Storage};
//! use iamguardian::analyzer::compute_stats;
//!
//! # fn main() -> anyhow::Result<()> {
//! let storage = LocalStorage::open("./data/findings.json")?;
//! storage.save_findings(AwsScanner::mock().scan()?)?;
//!
//! let stats = compute_stats(&storage.get_all_findings()?);
//! println!("{} findings, {} pending", stats.total, stats.pending);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod models;
pub mod report;
pub mod scanner;
pub mod storage;

// Re-export commonly used types
pub use models::{Category, Cloud, Finding, Severity};
pub use scanner::Scanner;
pub use storage::{LocalStorage, Storage};
