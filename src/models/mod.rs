//! Data model shared by scanners, storage and the analyzer

mod finding;

pub use finding::{
    Category, Cloud, ComplianceMapping, Finding, Recommendation, ResourceType, Severity,
};
