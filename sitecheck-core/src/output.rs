// Result persistence and the end-of-run text report

use crate::error::Result;
use sitecheck_scanner::{CheckResults, StatusRecord};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEFAULT_ERRORS_FILE: &str = "errors.json";
pub const DEFAULT_RESULTS_FILE: &str = "results.json";

/// Write records as a pretty-printed JSON array of `{ "url", "status" }`.
pub fn save_records(path: &Path, records: &[StatusRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    info!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// Save the non-2xx list and the full list side by side.
pub fn save_results(results: &CheckResults, errors_path: &Path, results_path: &Path) -> Result<()> {
    save_records(errors_path, &results.non_success)?;
    save_records(results_path, &results.all)?;
    Ok(())
}

/// Summary of a finished run: totals, the status histogram, and every non-OK
/// URL grouped by status.
pub fn generate_check_report(results: &CheckResults) -> String {
    let mut report = String::new();

    report.push_str("\n═══════════════════════════════════════════════════════════════════════════════\n");
    report.push_str("                              CHECK RESULTS\n");
    report.push_str("═══════════════════════════════════════════════════════════════════════════════\n\n");

    report.push_str(&format!("URLs processed: {}/{}\n", results.processed, results.total));
    report.push_str(&format!(
        "OK (200): {}\n",
        results.histogram.get(200)
    ));
    report.push_str(&format!("Not OK: {}\n\n", results.non_success.len()));

    report.push_str("Statuses:\n");
    for (status, count) in results.histogram.iter() {
        report.push_str(&format!("  [{}] {}\n", status, count));
    }
    report.push('\n');

    let mut by_status: BTreeMap<u16, Vec<&StatusRecord>> = BTreeMap::new();
    for record in &results.non_success {
        by_status.entry(record.status).or_default().push(record);
    }

    for (status, records) in by_status {
        let label = match status {
            200..=299 => format!("[{}] Success", status),
            300..=399 => format!("[{}] Redirect", status),
            400..=499 => format!("[{}] Client Error", status),
            500..=599 => format!("[{}] Server Error", status),
            _ => format!("[{}]", status),
        };
        report.push_str(&format!("{} ({} URLs)\n", label, records.len()));
        report.push_str("───────────────────────────────────────────────────────────────────────────────\n");
        for record in records {
            report.push_str(&format!("  {}\n", record.url));
        }
        report.push('\n');
    }

    report.push_str("═══════════════════════════════════════════════════════════════════════════════\n");

    report
}
