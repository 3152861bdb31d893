//! GCP IAM scanner
//!
//! Not implemented yet. Planned checks: service accounts with roles/owner or
//! roles/editor, service account keys older than 90 days, unapplied IAM
//! Recommender suggestions.

use anyhow::Result;

use crate::models::Finding;

use super::Scanner;

/// Scanner for Google Cloud Platform IAM
#[derive(Debug, Clone, Default)]
pub struct GcpScanner;

impl GcpScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Scanner for GcpScanner {
    fn cloud_name(&self) -> &'static str {
        "gcp"
    }

    fn scan(&self) -> Result<Vec<Finding>> {
        // Pending integration with the GCP IAM APIs.
        Ok(Vec::new())
    }
}
