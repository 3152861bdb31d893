//! Local JSON file storage for findings
//!
//! Every operation reads the whole file, works on the in-memory list and,
//! for mutations, rewrites the whole file. That is fine at the scale this
//! tool targets (well under a thousand findings) and keeps the on-disk
//! format trivially inspectable.
//!
//! Known limitation: there is no locking around the read-modify-write
//! cycle. Two processes mutating the same file concurrently race, and the
//! rewrite that lands last silently discards the other one. Single-writer
//! usage is assumed.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use crate::models::{Cloud, Finding, Severity};

use super::{Storage, StorageError};

/// Findings store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct LocalStorage {
    file_path: PathBuf,
}

impl LocalStorage {
    /// Open a store at the given path, creating the parent directory if
    /// needed. The file itself is created lazily on first write.
    pub fn open(file_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let file_path = file_path.as_ref().to_path_buf();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                    path: parent.display().to_string(),
                    source: e,
                })?;
            }
        }
        Ok(Self { file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load(&self) -> Result<Vec<Finding>, StorageError> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.file_path).map_err(|e| StorageError::Io {
            path: self.file_path.display().to_string(),
            source: e,
        })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| StorageError::Parse {
            path: self.file_path.display().to_string(),
            source: e,
        })
    }

    fn save(&self, findings: &[Finding]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(findings)
            .map_err(|e| StorageError::Serialize { source: e })?;
        fs::write(&self.file_path, content).map_err(|e| StorageError::Io {
            path: self.file_path.display().to_string(),
            source: e,
        })?;
        debug!(
            "wrote {} findings to {}",
            findings.len(),
            self.file_path.display()
        );
        Ok(())
    }
}

impl Storage for LocalStorage {
    fn save_finding(&self, finding: Finding) -> Result<(), StorageError> {
        let mut findings = self.load()?;
        findings.retain(|f| f.finding_id != finding.finding_id);
        findings.push(finding);
        self.save(&findings)
    }

    fn save_findings(&self, new_findings: Vec<Finding>) -> Result<(), StorageError> {
        let mut findings = self.load()?;
        for finding in new_findings {
            match findings
                .iter_mut()
                .find(|f| f.finding_id == finding.finding_id)
            {
                Some(existing) => *existing = finding,
                None => findings.push(finding),
            }
        }
        self.save(&findings)
    }

    fn get_finding(&self, finding_id: &str) -> Result<Option<Finding>, StorageError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|f| f.finding_id == finding_id))
    }

    fn get_all_findings(&self) -> Result<Vec<Finding>, StorageError> {
        self.load()
    }

    fn get_findings_by_severity(&self, severity: Severity) -> Result<Vec<Finding>, StorageError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|f| f.severity == severity)
            .collect())
    }

    fn get_findings_by_cloud(&self, cloud: Cloud) -> Result<Vec<Finding>, StorageError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|f| f.cloud == cloud)
            .collect())
    }

    fn mark_as_remediated(&self, finding_id: &str) -> Result<bool, StorageError> {
        let mut findings = self.load()?;
        match findings.iter_mut().find(|f| f.finding_id == finding_id) {
            Some(finding) => {
                finding.remediated = true;
                finding.remediated_at = Some(Utc::now());
                self.save(&findings)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_finding(&self, finding_id: &str) -> Result<bool, StorageError> {
        let mut findings = self.load()?;
        let before = findings.len();
        findings.retain(|f| f.finding_id != finding_id);
        if findings.len() == before {
            return Ok(false);
        }
        self.save(&findings)?;
        Ok(true)
    }

    fn count(&self) -> Result<usize, StorageError> {
        Ok(self.load()?.len())
    }
}
