//! Aggregate statistics over a finding snapshot

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Category, Cloud, Finding, Severity};

/// Tallies over a finding snapshot
///
/// The breakdown maps only contain values actually observed in the input;
/// a severity or cloud with zero findings has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FindingStats {
    pub total: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_cloud: BTreeMap<Cloud, usize>,
    pub by_category: BTreeMap<Category, usize>,
    pub remediated: usize,
    pub pending: usize,
}

/// Count findings by severity, cloud and category, plus remediation totals
///
/// An empty snapshot yields the zeroed struct, never an error.
pub fn compute_stats(findings: &[Finding]) -> FindingStats {
    let mut stats = FindingStats {
        total: findings.len(),
        ..Default::default()
    };

    for finding in findings {
        *stats.by_severity.entry(finding.severity).or_default() += 1;
        *stats.by_cloud.entry(finding.cloud).or_default() += 1;
        *stats.by_category.entry(finding.category).or_default() += 1;
        if finding.remediated {
            stats.remediated += 1;
        }
    }
    stats.pending = stats.total - stats.remediated;
    stats
}

/// Unremediated findings of severity high or critical, input order preserved
///
/// These are the findings that need action now. A plain filter, not a
/// ranking.
pub fn get_high_priority_findings(findings: &[Finding]) -> Vec<Finding> {
    findings
        .iter()
        .filter(|f| f.severity >= Severity::High && !f.remediated)
        .cloned()
        .collect()
}
