//! Compliance scoring per regulatory framework
//!
//! A finding maps to zero or more control identifiers per framework
//! (ISO 27001, NIST CSF, SOC 2). Scoring fans a finding out to every control
//! it lists and reports the remediated share per control and overall.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Finding;

/// Framework names the scorer recognizes
pub const FRAMEWORKS: [&str; 3] = ["iso27001", "nist_csf", "soc2"];

/// Per-control tally within a compliance report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ControlStatus {
    /// Findings mapped to this control
    pub total: usize,
    /// Of those, how many are remediated
    pub remediated: usize,
    /// Ids of the findings mapped to this control
    pub findings: Vec<String>,
}

/// Compliance score for one framework over a finding snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    pub framework: String,
    /// Remediated share of all control mappings, percent with one decimal.
    /// Exactly 100.0 when no finding maps to the framework.
    pub score: f64,
    pub controls: BTreeMap<String, ControlStatus>,
    pub total_issues: usize,
    pub total_remediated: usize,
}

/// Score a snapshot against one compliance framework
///
/// Every control identifier a finding lists for the framework counts once,
/// so one finding can raise several controls. A framework name outside
/// [`FRAMEWORKS`] matches no mapping and yields the vacuous 100.0 report
/// rather than an error; strict validation is left to the caller's input
/// boundary.
pub fn compute_compliance_score(findings: &[Finding], framework: &str) -> ComplianceReport {
    let mut controls: BTreeMap<String, ControlStatus> = BTreeMap::new();

    for finding in findings {
        let mapping = &finding.compliance_mapping;
        let control_list = match framework {
            "iso27001" => &mapping.iso27001,
            "nist_csf" => &mapping.nist_csf,
            "soc2" => &mapping.soc2,
            _ => continue,
        };

        for control in control_list {
            let status = controls.entry(control.clone()).or_default();
            status.total += 1;
            if finding.remediated {
                status.remediated += 1;
            }
            status.findings.push(finding.finding_id.clone());
        }
    }

    let total_issues: usize = controls.values().map(|c| c.total).sum();
    let total_remediated: usize = controls.values().map(|c| c.remediated).sum();
    let score = if total_issues > 0 {
        let raw = total_remediated as f64 / total_issues as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    } else {
        100.0
    };

    ComplianceReport {
        framework: framework.to_string(),
        score,
        controls,
        total_issues,
        total_remediated,
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Category, Cloud, ComplianceMapping, ResourceType, Severity};
    use crate::scanner::{AwsScanner, Scanner};

    use super::*;

    fn finding(id: &str, iso: &[&str], remediated: bool) -> Finding {
        let mut f = Finding::new(
            id,
            Cloud::Aws,
            ResourceType::IamRole,
            format!("arn:aws:iam::123456789012:role/{id}"),
            Severity::High,
            Category::ExcessivePermissions,
            "Role has AdministratorAccess policy attached",
        )
        .with_compliance(ComplianceMapping::new(iso, &[], &[]));
        f.remediated = remediated;
        f
    }

    #[test]
    fn empty_snapshot_is_vacuously_compliant() {
        let report = compute_compliance_score(&[], "soc2");

        assert_eq!(report.score, 100.0);
        assert_eq!(report.total_issues, 0);
        assert_eq!(report.total_remediated, 0);
        assert!(report.controls.is_empty());
    }

    #[test]
    fn unknown_framework_is_silently_vacuous() {
        let findings = AwsScanner::mock().scan().unwrap();
        let report = compute_compliance_score(&findings, "pci_dss");

        assert_eq!(report.framework, "pci_dss");
        assert_eq!(report.score, 100.0);
        assert_eq!(report.total_issues, 0);
        assert!(report.controls.is_empty());
    }

    #[test]
    fn finding_fans_out_to_every_listed_control() {
        let findings = vec![finding("f-1", &["A.5.15", "A.5.18", "A.8.2"], false)];
        let report = compute_compliance_score(&findings, "iso27001");

        assert_eq!(report.controls.len(), 3);
        assert_eq!(report.total_issues, 3);
        assert_eq!(report.controls["A.5.15"].findings, ["f-1"]);
    }

    #[test]
    fn aws_mock_set_covers_expected_iso_controls() {
        let findings = AwsScanner::mock().scan().unwrap();
        let report = compute_compliance_score(&findings, "iso27001");

        for control in ["A.5.15", "A.5.17", "A.5.18"] {
            assert!(report.controls.contains_key(control), "missing {control}");
        }
        assert!(report.score >= 0.0 && report.score <= 100.0);
        // Nothing remediated yet
        assert_eq!(report.score, 0.0);
        assert_eq!(report.total_remediated, 0);
    }

    #[test]
    fn score_is_rounded_to_one_decimal() {
        let findings = vec![
            finding("f-1", &["A.5.15"], true),
            finding("f-2", &["A.5.15"], false),
            finding("f-3", &["A.5.15"], false),
        ];
        let report = compute_compliance_score(&findings, "iso27001");

        // 1/3 remediated -> 33.333... -> 33.3
        assert_eq!(report.score, 33.3);
        assert_eq!(report.total_issues, 3);
        assert_eq!(report.total_remediated, 1);
    }

    #[test]
    fn per_control_tallies_track_remediation() {
        let findings = vec![
            finding("f-1", &["A.5.15", "A.5.17"], true),
            finding("f-2", &["A.5.15"], false),
        ];
        let report = compute_compliance_score(&findings, "iso27001");

        assert_eq!(report.controls["A.5.15"].total, 2);
        assert_eq!(report.controls["A.5.15"].remediated, 1);
        assert_eq!(report.controls["A.5.17"].total, 1);
        assert_eq!(report.controls["A.5.17"].remediated, 1);
        // 2 of 3 mappings remediated -> 66.7
        assert_eq!(report.score, 66.7);
    }

    #[test]
    fn duplicate_control_ids_count_twice() {
        let findings = vec![finding("f-1", &["A.5.15", "A.5.15"], false)];
        let report = compute_compliance_score(&findings, "iso27001");

        assert_eq!(report.controls["A.5.15"].total, 2);
        assert_eq!(report.controls["A.5.15"].findings, ["f-1", "f-1"]);
    }
}
