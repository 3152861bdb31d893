//! Finding - IAM security issue data structures
//!
//! Defines the normalized record produced by every scanner, regardless of
//! cloud provider. A `Finding` is one detected IAM weakness on one resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cloud provider a finding originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cloud {
    Aws,
    Azure,
    Gcp,
}

impl Cloud {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cloud::Aws => "aws",
            Cloud::Azure => "azure",
            Cloud::Gcp => "gcp",
        }
    }
}

impl std::fmt::Display for Cloud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level for security findings, ordered lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of IAM weakness detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Permissions broader than the workload needs
    ExcessivePermissions,
    /// No activity on the account for over 90 days
    DormantAccount,
    /// Multi-factor authentication not enabled
    NoMfa,
    /// Access key older than 90 days
    OldAccessKey,
    /// Resource reachable from outside the account
    PublicAccess,
    /// Path to higher privileges exists
    PrivilegeEscalation,
    /// Same credentials used by multiple services
    SharedCredentials,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ExcessivePermissions => "excessive_permissions",
            Category::DormantAccount => "dormant_account",
            Category::NoMfa => "no_mfa",
            Category::OldAccessKey => "old_access_key",
            Category::PublicAccess => "public_access",
            Category::PrivilegeEscalation => "privilege_escalation",
            Category::SharedCredentials => "shared_credentials",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type of IAM resource a finding is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    IamUser,
    IamRole,
    IamPolicy,
    IamGroup,
    /// GCP service identity
    ServiceAccount,
    /// Azure application identity
    ServicePrincipal,
    AccessKey,
}

/// Control identifiers a finding maps to, per compliance framework
///
/// Each list may be empty and duplicates are preserved; the analyzer counts
/// every listed control when scoring a framework.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceMapping {
    /// ISO 27001:2022 controls (e.g. "A.5.15", "A.5.18")
    #[serde(default)]
    pub iso27001: Vec<String>,
    /// NIST CSF 2.0 functions (e.g. "PR.AC-4", "PR.AC-6")
    #[serde(default)]
    pub nist_csf: Vec<String>,
    /// SOC 2 criteria (e.g. "CC6.1", "CC6.3")
    #[serde(default)]
    pub soc2: Vec<String>,
}

impl ComplianceMapping {
    pub fn new(iso27001: &[&str], nist_csf: &[&str], soc2: &[&str]) -> Self {
        Self {
            iso27001: iso27001.iter().map(|s| s.to_string()).collect(),
            nist_csf: nist_csf.iter().map(|s| s.to_string()).collect(),
            soc2: soc2.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Remediation guidance attached to a finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// What to do about the finding
    pub summary: String,
    /// CLI command that applies the fix (aws / az / gcloud)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_fix: Option<String>,
    /// Terraform snippet that applies the fix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terraform_fix: Option<String>,
    /// Risk of applying the fix (free-form: low/medium/high)
    #[serde(default = "default_risk")]
    pub risk_of_fix: String,
    /// Whether the fix can be applied without human review
    #[serde(default)]
    pub auto_remediable: bool,
}

fn default_risk() -> String {
    "medium".to_string()
}

impl Recommendation {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            code_fix: None,
            terraform_fix: None,
            risk_of_fix: default_risk(),
            auto_remediable: false,
        }
    }

    pub fn with_code_fix(mut self, code_fix: impl Into<String>) -> Self {
        self.code_fix = Some(code_fix.into());
        self
    }

    pub fn with_terraform_fix(mut self, terraform_fix: impl Into<String>) -> Self {
        self.terraform_fix = Some(terraform_fix.into());
        self
    }

    pub fn with_risk(mut self, risk: impl Into<String>) -> Self {
        self.risk_of_fix = risk.into();
        self
    }

    pub fn auto_remediable(mut self, auto: bool) -> Self {
        self.auto_remediable = auto;
        self
    }
}

/// A detected IAM security issue on a specific cloud resource
///
/// Findings are created by scanners, upserted into storage keyed by
/// `finding_id`, and aggregated by the analyzer. The only in-place mutation
/// storage performs is marking a finding remediated.
///
/// Note: the `remediated` / `remediated_at` pairing is maintained by the
/// storage mutation path, not by construction. Building a finding with
/// `remediated == true` and no `remediated_at` is possible; callers are
/// expected to go through `Storage::mark_as_remediated` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Unique id within a store (e.g. "f-aws-001")
    pub finding_id: String,
    /// Cloud the resource lives in
    pub cloud: Cloud,
    /// Detection time, defaults to now when absent from input
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Type of the affected IAM resource
    pub resource_type: ResourceType,
    /// Cloud-native identifier (AWS ARN, Azure resource id, GCP path)
    pub resource_id: String,
    /// How bad it is
    pub severity: Severity,
    /// What kind of weakness it is
    pub category: Category,
    /// Human-readable description of the issue
    pub description: String,
    /// Principals affected by the issue
    #[serde(default)]
    pub affected_principals: Vec<String>,
    /// Controls this finding maps to, per framework
    #[serde(default)]
    pub compliance_mapping: ComplianceMapping,
    /// Remediation guidance, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
    /// Whether the issue has been fixed
    #[serde(default)]
    pub remediated: bool,
    /// When it was fixed; set together with `remediated` by storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediated_at: Option<DateTime<Utc>>,
}

impl Finding {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        finding_id: impl Into<String>,
        cloud: Cloud,
        resource_type: ResourceType,
        resource_id: impl Into<String>,
        severity: Severity,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            finding_id: finding_id.into(),
            cloud,
            timestamp: Utc::now(),
            resource_type,
            resource_id: resource_id.into(),
            severity,
            category,
            description: description.into(),
            affected_principals: Vec::new(),
            compliance_mapping: ComplianceMapping::default(),
            recommendation: None,
            remediated: false,
            remediated_at: None,
        }
    }

    pub fn with_principals(mut self, principals: &[&str]) -> Self {
        self.affected_principals = principals.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_compliance(mut self, mapping: ComplianceMapping) -> Self {
        self.compliance_mapping = mapping;
        self
    }

    pub fn with_recommendation(mut self, recommendation: Recommendation) -> Self {
        self.recommendation = Some(recommendation);
        self
    }
}
