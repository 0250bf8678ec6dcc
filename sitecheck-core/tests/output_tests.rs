// Tests for result files and the text report

use sitecheck_core::output::{generate_check_report, save_records, save_results};
use sitecheck_scanner::{CheckResults, StatusHistogram, StatusRecord};
use std::fs;
use tempfile::TempDir;

fn sample_results() -> CheckResults {
    let all = vec![
        StatusRecord::new("https://a.test/", 200),
        StatusRecord::new("https://b.test/", 404),
        StatusRecord::new("https://c.test/", 301),
    ];
    let non_success = vec![
        StatusRecord::new("https://b.test/", 404),
        StatusRecord::new("https://c.test/", 301),
        StatusRecord::new("https://down.test/", 500),
    ];
    let mut histogram = StatusHistogram::new();
    for status in [200, 404, 301, 500] {
        histogram.record(status);
    }

    CheckResults {
        all,
        non_success,
        histogram,
        processed: 4,
        total: 4,
    }
}

#[test]
fn test_save_records_writes_pretty_json_array() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let file = dir.path().join("errors.json");
    let records = vec![StatusRecord::new("https://b.test/", 404)];

    save_records(&file, &records)?;

    let content = fs::read_to_string(&file)?;
    assert!(content.contains('\n'), "output should be pretty-printed");
    let value: serde_json::Value = serde_json::from_str(&content)?;
    assert_eq!(
        value,
        serde_json::json!([{ "url": "https://b.test/", "status": 404 }])
    );

    Ok(())
}

#[test]
fn test_save_empty_list() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let file = dir.path().join("empty.json");

    save_records(&file, &[])?;

    let parsed: Vec<StatusRecord> = serde_json::from_str(&fs::read_to_string(&file)?)?;
    assert!(parsed.is_empty());
    Ok(())
}

#[test]
fn test_save_results_writes_both_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let errors = dir.path().join("errors.json");
    let all = dir.path().join("results.json");
    let results = sample_results();

    save_results(&results, &errors, &all)?;

    let saved_errors: Vec<StatusRecord> = serde_json::from_str(&fs::read_to_string(&errors)?)?;
    let saved_all: Vec<StatusRecord> = serde_json::from_str(&fs::read_to_string(&all)?)?;
    assert_eq!(saved_errors, results.non_success);
    assert_eq!(saved_all, results.all);
    Ok(())
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("nope").join("errors.json");

    assert!(save_records(&file, &[]).is_err());
}

#[test]
fn test_report_summary_and_groups() {
    let report = generate_check_report(&sample_results());

    assert!(report.contains("URLs processed: 4/4"));
    assert!(report.contains("OK (200): 1"));
    assert!(report.contains("Not OK: 3"));
    assert!(report.contains("[301] Redirect (1 URLs)"));
    assert!(report.contains("[404] Client Error (1 URLs)"));
    assert!(report.contains("[500] Server Error (1 URLs)"));
    assert!(report.contains("  https://down.test/"));
    assert!(!report.contains("  https://a.test/\n"));
}

#[test]
fn test_report_groups_in_status_order() {
    let report = generate_check_report(&sample_results());

    let redirect = report.find("[301] Redirect").unwrap();
    let client = report.find("[404] Client Error").unwrap();
    let server = report.find("[500] Server Error").unwrap();
    assert!(redirect < client && client < server);
}
