//! End-to-end workflow: scan, persist, aggregate, remediate

use tempfile::tempdir;

use iamguardian::analyzer::{
    compute_compliance_score, compute_stats, get_high_priority_findings,
};
use iamguardian::models::Severity;
use iamguardian::scanner::{AwsScanner, Scanner};
use iamguardian::storage::{LocalStorage, Storage};

#[test]
fn scan_save_and_aggregate() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::open(dir.path().join("findings.json")).unwrap();

    let findings = AwsScanner::mock().scan().unwrap();
    storage.save_findings(findings).unwrap();
    assert_eq!(storage.count().unwrap(), 8);

    let snapshot = storage.get_all_findings().unwrap();
    let stats = compute_stats(&snapshot);
    assert_eq!(stats.total, 8);
    assert_eq!(stats.pending, 8);
    assert_eq!(stats.by_severity[&Severity::Critical], 2);

    let priority = get_high_priority_findings(&snapshot);
    assert_eq!(priority.len(), 5);
}

#[test]
fn rescan_does_not_duplicate() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::open(dir.path().join("findings.json")).unwrap();

    let scanner = AwsScanner::mock();
    storage.save_findings(scanner.scan().unwrap()).unwrap();
    storage.save_findings(scanner.scan().unwrap()).unwrap();

    assert_eq!(storage.count().unwrap(), 8);
}

#[test]
fn remediation_moves_the_compliance_score() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::open(dir.path().join("findings.json")).unwrap();

    storage
        .save_findings(AwsScanner::mock().scan().unwrap())
        .unwrap();

    let before = compute_compliance_score(&storage.get_all_findings().unwrap(), "iso27001");
    assert_eq!(before.score, 0.0);
    assert!(before.total_issues > 0);

    assert!(storage.mark_as_remediated("f-aws-001").unwrap());
    assert!(storage.mark_as_remediated("f-aws-003").unwrap());

    let after = compute_compliance_score(&storage.get_all_findings().unwrap(), "iso27001");
    assert!(after.score > before.score);
    assert_eq!(after.total_issues, before.total_issues);
    assert_eq!(
        after.total_remediated,
        // f-aws-001 lists A.5.15 and A.5.18, f-aws-003 lists A.5.17
        3
    );

    let stats = compute_stats(&storage.get_all_findings().unwrap());
    assert_eq!(stats.remediated, 2);
    assert_eq!(stats.pending, 6);
}

#[test]
fn remediated_findings_leave_the_priority_list() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::open(dir.path().join("findings.json")).unwrap();

    storage
        .save_findings(AwsScanner::mock().scan().unwrap())
        .unwrap();

    // f-aws-005 is critical
    assert!(storage.mark_as_remediated("f-aws-005").unwrap());

    let priority = get_high_priority_findings(&storage.get_all_findings().unwrap());
    assert_eq!(priority.len(), 4);
    assert!(priority.iter().all(|f| f.finding_id != "f-aws-005"));
}

#[test]
fn delete_shrinks_the_store_by_one() {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::open(dir.path().join("findings.json")).unwrap();

    storage
        .save_findings(AwsScanner::mock().scan().unwrap())
        .unwrap();

    assert!(storage.delete_finding("f-aws-002").unwrap());
    assert!(storage.get_finding("f-aws-002").unwrap().is_none());
    assert_eq!(storage.count().unwrap(), 7);
}

#[test]
fn store_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("findings.json");

    {
        let storage = LocalStorage::open(&path).unwrap();
        storage
            .save_findings(AwsScanner::mock().scan().unwrap())
            .unwrap();
        storage.mark_as_remediated("f-aws-004").unwrap();
    }

    let reopened = LocalStorage::open(&path).unwrap();
    assert_eq!(reopened.count().unwrap(), 8);
    let f = reopened.get_finding("f-aws-004").unwrap().unwrap();
    assert!(f.remediated);
    assert!(f.remediated_at.is_some());
}
