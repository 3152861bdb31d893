//! Finding persistence
//!
//! The `Storage` trait is the only persistence boundary the core exposes.
//! `LocalStorage` keeps everything in a single JSON file; a hosted backend
//! can be added later by implementing the same trait.

mod local;

pub use local::LocalStorage;

use crate::models::{Cloud, Finding, Severity};

/// Errors from the storage layer
///
/// I/O and parse failures are fatal; there is no partial recovery. "Not
/// found" is never an error here, it surfaces as `None` / `false` from the
/// trait methods.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access findings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse findings file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize findings: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

/// Contract every findings store satisfies
///
/// All writes are upserts keyed by `finding_id`: last write for an id wins
/// and no history is kept.
pub trait Storage {
    /// Insert or replace a single finding
    fn save_finding(&self, finding: Finding) -> Result<(), StorageError>;

    /// Bulk upsert; later entries in the input override earlier ones sharing
    /// an id, and stored findings absent from the input are untouched
    fn save_findings(&self, findings: Vec<Finding>) -> Result<(), StorageError>;

    /// Look up a finding by id; `None` when absent
    fn get_finding(&self, finding_id: &str) -> Result<Option<Finding>, StorageError>;

    /// Every stored finding, in on-disk order
    fn get_all_findings(&self) -> Result<Vec<Finding>, StorageError>;

    /// Findings with exactly the given severity, relative order preserved
    fn get_findings_by_severity(&self, severity: Severity) -> Result<Vec<Finding>, StorageError>;

    /// Findings from the given cloud, relative order preserved
    fn get_findings_by_cloud(&self, cloud: Cloud) -> Result<Vec<Finding>, StorageError>;

    /// Mark a finding remediated, stamping `remediated_at` with the current
    /// time. Returns false (and changes nothing) when the id is absent.
    fn mark_as_remediated(&self, finding_id: &str) -> Result<bool, StorageError>;

    /// Remove a finding by id. Returns false when the id is absent.
    fn delete_finding(&self, finding_id: &str) -> Result<bool, StorageError>;

    /// Number of stored findings
    fn count(&self) -> Result<usize, StorageError>;
}
