//! Conflict report rendering
//!
//! Two output shapes over the same records: one CSV table per guest for
//! spreadsheet use, and a single JSON document mirroring every field for
//! programmatic consumption. Writers never reorder records; the analyzer's
//! emission order is the report order.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::analysis::AnalysisReport;
use crate::error::Result;

/// CSV header shared by every per-guest table.
const CSV_HEADER: [&str; 4] = ["mod_identifier", "kind", "host_value", "guest_value"];

/// Write one `conflicts_<guest>.csv` per guest that has conflicts.
///
/// Guests with a clean comparison get no file. Returns the paths written.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or a file
/// cannot be written.
pub fn write_csv(report: &AnalysisReport, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let mut written = Vec::new();

    for (guest, conflicts) in &report.guests {
        if conflicts.is_empty() {
            continue;
        }

        let path = out_dir.join(format!("conflicts_{guest}.csv"));
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;

        writer.write_record(CSV_HEADER)?;
        for conflict in conflicts {
            writer.write_record([
                conflict.mod_id.as_str(),
                conflict.kind.as_str(),
                conflict.host_value.as_deref().unwrap_or(""),
                conflict.guest_value.as_deref().unwrap_or(""),
            ])?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;

        written.push(path);
    }

    Ok(written)
}

/// Write the whole report as one pretty-printed `report.json`.
///
/// # Errors
///
/// Returns an error if the output directory or file cannot be written.
pub fn write_json(report: &AnalysisReport, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let path = out_dir.join("report.json");
    let file = File::create(&path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, report)
        .with_context(|| format!("Failed to serialize report to {}", path.display()))?;

    Ok(path)
}

/// Human-readable run summary for the console.
#[must_use]
pub fn render_summary(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push_str("\n=== Conflict Summary ===\n");
    output.push_str(&format!("Host: {}\n", report.host));

    for (guest, conflicts) in &report.guests {
        if conflicts.is_empty() {
            output.push_str(&format!("  {guest}: ok\n"));
        } else {
            output.push_str(&format!("  {guest}: {} conflict(s)\n", conflicts.len()));
        }
    }

    if report.is_clean() {
        output.push_str("\nStatus: ✓ All players match the host\n");
    } else {
        output.push_str(&format!(
            "\nStatus: ✗ {} conflict(s) across {} guest(s)\n",
            report.total_conflicts(),
            report.guests.values().filter(|c| !c.is_empty()).count()
        ));
    }

    output
}
