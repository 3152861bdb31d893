//! Finding analysis - aggregate statistics and compliance scoring
//!
//! Pure functions over an in-memory finding snapshot. Nothing here touches
//! storage or mutates its input, so callers can run these concurrently on
//! snapshots they obtained themselves.

mod compliance;
mod stats;

pub use compliance::{compute_compliance_score, ComplianceReport, ControlStatus};
pub use stats::{compute_stats, get_high_priority_findings, FindingStats};
