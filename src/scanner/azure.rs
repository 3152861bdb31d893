//! Azure IAM scanner
//!
//! Not implemented yet. Planned checks: service principals holding Owner or
//! Contributor at subscription scope, accounts without MFA (Microsoft Graph),
//! excessive role assignments.

use anyhow::Result;

use crate::models::Finding;

use super::Scanner;

/// Scanner for Microsoft Azure IAM
#[derive(Debug, Clone, Default)]
pub struct AzureScanner;

impl AzureScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Scanner for AzureScanner {
    fn cloud_name(&self) -> &'static str {
        "azure"
    }

    fn scan(&self) -> Result<Vec<Finding>> {
        // Pending integration with the Azure authorization APIs.
        Ok(Vec::new())
    }
}
