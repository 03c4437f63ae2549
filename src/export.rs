use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::common::format::{days_between, format_date, qualify_acct};
use crate::finder::{AnalysisResults, InactiveAccount};

pub const CSV_HEADER: [&str; 5] = [
    "Username",
    "Display Name",
    "Last Post Date",
    "Days Inactive",
    "Profile URL",
];

const UNKNOWN: &str = "Unknown";

/// What an export call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, rows: usize },
    /// Nothing inactive; no file was created
    Empty,
}

/// Write the inactive accounts of `results` to a CSV file at `path`.
///
/// Rows follow the report order (oldest post first). With no inactive
/// accounts the file is not touched at all.
pub fn export_csv(results: &AnalysisResults, instance: &str, path: &Path) -> Result<ExportOutcome> {
    let inactive = results.sorted_inactive();
    if inactive.is_empty() {
        return Ok(ExportOutcome::Empty);
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let rows = write_csv(file, &inactive, instance, results.analyzed_at)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    tracing::info!(path = %path.display(), rows, "exported CSV");
    Ok(ExportOutcome::Written {
        path: path.to_path_buf(),
        rows,
    })
}

/// Write header plus one row per account; returns the row count
pub fn write_csv<W: Write>(
    writer: W,
    items: &[&InactiveAccount],
    instance: &str,
    now: DateTime<Utc>,
) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;

    for item in items {
        let account = &item.account;
        let (last_post, days) = match item.last_post_date {
            Some(date) => (format_date(date), days_between(date, now).to_string()),
            None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
        };

        csv.write_record([
            qualify_acct(&account.acct, instance).as_str(),
            account.display_name.as_str(),
            last_post.as_str(),
            days.as_str(),
            account.url.as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(items.len())
}
