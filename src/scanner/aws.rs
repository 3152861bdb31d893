//! AWS IAM scanner
//!
//! Detects permission problems in an AWS account: over-privileged roles and
//! policies, users without MFA, stale access keys, dormant accounts, open
//! trust policies, privilege-escalation paths and shared credentials.
//!
//! Live scanning against the AWS APIs is not wired up yet; mock mode returns
//! a realistic fixed data set covering every finding category.

use anyhow::{bail, Result};
use tracing::debug;

use crate::models::{
    Category, Cloud, ComplianceMapping, Finding, Recommendation, ResourceType, Severity,
};

use super::Scanner;

/// Scanner for Amazon Web Services IAM
#[derive(Debug, Clone)]
pub struct AwsScanner {
    mock: bool,
}

impl AwsScanner {
    pub fn new(mock: bool) -> Self {
        Self { mock }
    }

    /// Scanner that returns the fixed mock data set
    pub fn mock() -> Self {
        Self::new(true)
    }

    /// Eight findings one would expect in a badly configured AWS account,
    /// covering all seven categories (excessive permissions appears twice).
    fn mock_findings(&self) -> Vec<Finding> {
        vec![
            Finding::new(
                "f-aws-001",
                Cloud::Aws,
                ResourceType::IamRole,
                "arn:aws:iam::123456789012:role/AdminRole",
                Severity::High,
                Category::ExcessivePermissions,
                "Role has AdministratorAccess policy attached",
            )
            .with_principals(&["user/dev-user-1", "user/dev-user-2"])
            .with_compliance(ComplianceMapping::new(
                &["A.5.15", "A.5.18"],
                &["PR.AC-4", "PR.AC-6"],
                &["CC6.1", "CC6.3"],
            ))
            .with_recommendation(
                Recommendation::new(
                    "Reduce permissions to the minimum required. \
                     This role currently has full administrator access.",
                )
                .with_code_fix(
                    "aws iam detach-role-policy --role-name AdminRole \
                     --policy-arn arn:aws:iam::aws:policy/AdministratorAccess",
                ),
            ),
            Finding::new(
                "f-aws-002",
                Cloud::Aws,
                ResourceType::IamUser,
                "arn:aws:iam::123456789012:user/old-contractor",
                Severity::Medium,
                Category::DormantAccount,
                "User has not logged in for 120 days",
            )
            .with_principals(&["user/old-contractor"])
            .with_compliance(ComplianceMapping::new(
                &["A.5.16", "A.5.18"],
                &["PR.AC-1", "PR.AC-6"],
                &["CC6.1", "CC6.2"],
            ))
            .with_recommendation(
                Recommendation::new(
                    "Disable this dormant account. The user has not \
                     signed in for 120 days.",
                )
                .with_code_fix("aws iam delete-login-profile --user-name old-contractor")
                .with_risk("low")
                .auto_remediable(true),
            ),
            Finding::new(
                "f-aws-003",
                Cloud::Aws,
                ResourceType::IamUser,
                "arn:aws:iam::123456789012:user/dev-user-1",
                Severity::High,
                Category::NoMfa,
                "User does not have MFA enabled",
            )
            .with_principals(&["user/dev-user-1"])
            .with_compliance(ComplianceMapping::new(
                &["A.5.17"],
                &["PR.AC-7"],
                &["CC6.1"],
            ))
            .with_recommendation(
                Recommendation::new(
                    "Enable multi-factor authentication. Without MFA the \
                     account is exposed to credential theft.",
                )
                .with_risk("low"),
            ),
            Finding::new(
                "f-aws-004",
                Cloud::Aws,
                ResourceType::AccessKey,
                "arn:aws:iam::123456789012:user/deploy-bot/access-key/AKIA1234567890ABCDEF",
                Severity::Medium,
                Category::OldAccessKey,
                "Access key is 185 days old (threshold: 90 days)",
            )
            .with_principals(&["user/deploy-bot"])
            .with_compliance(ComplianceMapping::new(
                &["A.5.17"],
                &["PR.AC-1"],
                &["CC6.1", "CC6.6"],
            ))
            .with_recommendation(
                Recommendation::new(
                    "Rotate this access key. Keys older than 90 days \
                     increase the exposure window.",
                )
                .with_code_fix(
                    "aws iam create-access-key --user-name deploy-bot && \
                     aws iam delete-access-key --user-name deploy-bot \
                     --access-key-id AKIA1234567890ABCDEF",
                )
                .auto_remediable(true),
            ),
            Finding::new(
                "f-aws-005",
                Cloud::Aws,
                ResourceType::IamPolicy,
                "arn:aws:iam::123456789012:policy/LegacyFullAccess",
                Severity::Critical,
                Category::ExcessivePermissions,
                "Custom policy allows Action:* on Resource:* (equivalent to admin access)",
            )
            .with_principals(&["role/legacy-app-role", "user/qa-engineer"])
            .with_compliance(ComplianceMapping::new(
                &["A.5.15", "A.5.18", "A.8.2"],
                &["PR.AC-4", "PR.AC-6"],
                &["CC6.1", "CC6.3"],
            ))
            .with_recommendation(
                Recommendation::new(
                    "Replace this wildcard policy with specific permissions. \
                     Action:* on Resource:* grants the same access as \
                     AdministratorAccess.",
                )
                .with_code_fix(
                    "aws iam create-policy-version \
                     --policy-arn arn:aws:iam::123456789012:policy/LegacyFullAccess \
                     --policy-document file://restricted-policy.json --set-as-default",
                )
                .with_risk("high"),
            ),
            Finding::new(
                "f-aws-006",
                Cloud::Aws,
                ResourceType::IamRole,
                "arn:aws:iam::123456789012:role/DevOpsRole",
                Severity::High,
                Category::PrivilegeEscalation,
                "Role can pass any IAM role to any service (iam:PassRole on \
                 Resource:*), enabling privilege escalation",
            )
            .with_principals(&["user/devops-lead", "user/devops-jr"])
            .with_compliance(ComplianceMapping::new(
                &["A.5.15", "A.5.18"],
                &["PR.AC-4"],
                &["CC6.1", "CC6.3"],
            ))
            .with_recommendation(
                Recommendation::new(
                    "Restrict iam:PassRole to specific roles. An unrestricted \
                     PassRole lets a principal escalate by attaching any role \
                     to a service it controls.",
                )
                .with_terraform_fix(
                    "resource \"aws_iam_policy\" \"restricted_passrole\" {\n\
                     \x20 statement {\n\
                     \x20   actions   = [\"iam:PassRole\"]\n\
                     \x20   resources = [\n\
                     \x20     \"arn:aws:iam::123456789012:role/AllowedRole1\",\n\
                     \x20     \"arn:aws:iam::123456789012:role/AllowedRole2\",\n\
                     \x20   ]\n\
                     \x20 }\n\
                     }",
                ),
            ),
            Finding::new(
                "f-aws-007",
                Cloud::Aws,
                ResourceType::IamUser,
                "arn:aws:iam::123456789012:user/shared-ci-user",
                Severity::Medium,
                Category::SharedCredentials,
                "IAM user access key is used by 3 different CI/CD pipelines \
                 (detected via CloudTrail source IP analysis)",
            )
            .with_principals(&[
                "service/github-actions",
                "service/jenkins",
                "service/gitlab-ci",
            ])
            .with_compliance(ComplianceMapping::new(
                &["A.5.17", "A.5.18"],
                &["PR.AC-1", "PR.AC-3"],
                &["CC6.1", "CC6.2"],
            ))
            .with_recommendation(
                Recommendation::new(
                    "Create a dedicated IAM user per CI/CD service. Shared \
                     credentials break traceability and widen the blast \
                     radius of a compromise.",
                )
                .with_code_fix(
                    "aws iam create-user --user-name github-actions-ci && \
                     aws iam create-user --user-name jenkins-ci && \
                     aws iam create-user --user-name gitlab-ci",
                ),
            ),
            Finding::new(
                "f-aws-008",
                Cloud::Aws,
                ResourceType::IamRole,
                "arn:aws:iam::123456789012:role/PublicLambdaRole",
                Severity::Critical,
                Category::PublicAccess,
                "Role trust policy allows assumption from any AWS account \
                 (Principal: {\"AWS\": \"*\"})",
            )
            .with_principals(&["role/PublicLambdaRole"])
            .with_compliance(ComplianceMapping::new(
                &["A.5.15", "A.5.18", "A.8.2"],
                &["PR.AC-3", "PR.AC-4"],
                &["CC6.1", "CC6.6"],
            ))
            .with_recommendation(
                Recommendation::new(
                    "Restrict the trust policy to specific accounts. A \
                     Principal of * lets any AWS account assume this role.",
                )
                .with_code_fix(
                    "aws iam update-assume-role-policy --role-name PublicLambdaRole \
                     --policy-document file://restricted-trust-policy.json",
                )
                .with_risk("low"),
            ),
        ]
    }
}

impl Scanner for AwsScanner {
    fn cloud_name(&self) -> &'static str {
        "aws"
    }

    fn scan(&self) -> Result<Vec<Finding>> {
        if !self.mock {
            bail!("live AWS scanning is not implemented yet; run with --mock");
        }
        let findings = self.mock_findings();
        debug!("AWS mock scan produced {} findings", findings.len());
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn mock_scan_returns_eight_findings() {
        let findings = AwsScanner::mock().scan().unwrap();
        assert_eq!(findings.len(), 8);
        assert!(findings.iter().all(|f| f.cloud == Cloud::Aws));
        assert!(findings.iter().all(|f| !f.remediated));
    }

    #[test]
    fn mock_finding_ids_are_unique() {
        let findings = AwsScanner::mock().scan().unwrap();
        let mut ids: Vec<_> = findings.iter().map(|f| f.finding_id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn mock_severity_distribution() {
        let findings = AwsScanner::mock().scan().unwrap();
        let mut counts: BTreeMap<Severity, usize> = BTreeMap::new();
        for f in &findings {
            *counts.entry(f.severity).or_default() += 1;
        }

        assert_eq!(counts.get(&Severity::Critical), Some(&2));
        assert_eq!(counts.get(&Severity::High), Some(&3));
        assert_eq!(counts.get(&Severity::Medium), Some(&3));
        assert_eq!(counts.get(&Severity::Low), None);
    }

    #[test]
    fn mock_covers_every_category() {
        let findings = AwsScanner::mock().scan().unwrap();
        let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
        for f in &findings {
            *counts.entry(f.category).or_default() += 1;
        }

        assert_eq!(counts.len(), 7);
        assert_eq!(counts.get(&Category::ExcessivePermissions), Some(&2));
        assert!(counts
            .iter()
            .filter(|(c, _)| **c != Category::ExcessivePermissions)
            .all(|(_, n)| *n == 1));
    }

    #[test]
    fn mock_findings_map_to_compliance_controls() {
        let findings = AwsScanner::mock().scan().unwrap();
        assert!(findings
            .iter()
            .all(|f| !f.compliance_mapping.iso27001.is_empty()));
        assert!(findings
            .iter()
            .all(|f| !f.compliance_mapping.nist_csf.is_empty()));
        assert!(findings.iter().all(|f| !f.compliance_mapping.soc2.is_empty()));
    }

    #[test]
    fn live_mode_fails_until_implemented() {
        let err = AwsScanner::new(false).scan().unwrap_err();
        assert!(err.to_string().contains("--mock"));
    }
}
