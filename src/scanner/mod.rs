//! IAM scanners - one per cloud provider
//!
//! Every scanner implements the same contract: `scan()` returns the complete
//! list of findings for its provider or fails as a whole. There is no
//! partial-result mode, which keeps an orchestrator free to run providers
//! independently and discard only the one that failed.

mod aws;
mod azure;
mod gcp;

pub use aws::AwsScanner;
pub use azure::AzureScanner;
pub use gcp::GcpScanner;

use anyhow::Result;

use crate::models::Finding;

/// Contract every IAM scanner satisfies
pub trait Scanner {
    /// Provider identifier ("aws", "azure", "gcp")
    fn cloud_name(&self) -> &'static str;

    /// Run the scan and return all findings for this provider
    ///
    /// Either the full finding list comes back or the scan fails; callers
    /// never see a partially scanned provider.
    fn scan(&self) -> Result<Vec<Finding>>;
}
