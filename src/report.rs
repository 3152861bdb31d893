//! Terminal rendering for findings, statistics and compliance reports

use colored::Colorize;

use crate::analyzer::{ComplianceReport, FindingStats};
use crate::models::{Finding, Severity};

/// Severity label colored for terminal output
pub fn severity_label(severity: Severity) -> String {
    let label = format!("{:8}", severity.as_str().to_uppercase());
    match severity {
        Severity::Critical => label.red().bold().to_string(),
        Severity::High => label.red().to_string(),
        Severity::Medium => label.yellow().to_string(),
        Severity::Low => label.blue().to_string(),
    }
}

/// Print one finding with its remediation guidance
pub fn print_finding(finding: &Finding) {
    let status = if finding.remediated {
        "remediated".green().to_string()
    } else {
        "pending".yellow().to_string()
    };
    println!(
        "  [{}] {} ({}, {})",
        severity_label(finding.severity),
        finding.finding_id.bold(),
        finding.cloud,
        status
    );
    println!("    {}", finding.description);
    println!("    Resource: {}", finding.resource_id.cyan());
    if let Some(rec) = &finding.recommendation {
        println!("    Fix: {}", rec.summary.green());
        if let Some(cmd) = &rec.code_fix {
            println!("         {}", cmd.dimmed());
        }
    }
    println!();
}

/// Print a list of findings followed by a count line
pub fn print_findings(findings: &[Finding]) {
    if findings.is_empty() {
        println!("{}", "No findings.".green());
        return;
    }
    for finding in findings {
        print_finding(finding);
    }
    println!(
        "{} finding{}",
        findings.len(),
        if findings.len() == 1 { "" } else { "s" }
    );
}

impl FindingStats {
    /// Print the tallies as formatted text
    pub fn print_text(&self) {
        println!("{}", "Finding Statistics".bold());
        println!("  Total: {}", self.total);
        println!(
            "  Remediated: {}   Pending: {}",
            self.remediated.to_string().green(),
            self.pending.to_string().yellow()
        );

        if !self.by_severity.is_empty() {
            println!("  By severity:");
            for (severity, count) in self.by_severity.iter().rev() {
                println!("    {} {}", severity_label(*severity), count);
            }
        }
        if !self.by_cloud.is_empty() {
            println!("  By cloud:");
            for (cloud, count) in &self.by_cloud {
                println!("    {:8} {}", cloud.as_str(), count);
            }
        }
        if !self.by_category.is_empty() {
            println!("  By category:");
            for (category, count) in &self.by_category {
                println!("    {:24} {}", category.as_str(), count);
            }
        }
    }
}

impl ComplianceReport {
    /// Print the per-control breakdown and the overall score
    pub fn print_text(&self) {
        println!("{} {}", "Compliance report:".bold(), self.framework);

        let score = format!("{:.1}%", self.score);
        let score_display = if self.score >= 90.0 {
            score.green().to_string()
        } else if self.score >= 50.0 {
            score.yellow().to_string()
        } else {
            score.red().to_string()
        };
        println!(
            "  Score: {}  ({} of {} control mappings remediated)",
            score_display, self.total_remediated, self.total_issues
        );

        if self.controls.is_empty() {
            println!("  No findings map to this framework.");
            return;
        }
        println!("  Controls:");
        for (control, status) in &self.controls {
            println!(
                "    {:10} {}/{} remediated  [{}]",
                control,
                status.remediated,
                status.total,
                status.findings.join(", ").dimmed()
            );
        }
    }
}
