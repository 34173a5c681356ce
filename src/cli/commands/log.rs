use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use colored::Colorize;

use crate::adapters::audit::text_audit_log::TextAuditLog;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::{Result, RosterError};
use crate::core::models::audit_entry::AuditRecord;
use crate::core::traits::audit::AuditLog;

/// Execute the `roster log` command.
///
/// Displays the audit trail with optional date and count filters, as a
/// readable listing or as one JSON object per line.
pub fn execute(
    since: Option<&str>,
    last: Option<usize>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let logger = TextAuditLog::new(config.audit.log_file.clone());

    let since_dt = since.map(parse_since).transpose()?;
    let records = logger.query(since_dt)?;

    if records.is_empty() {
        if json {
            return Ok(());
        }
        output::header("roster log");
        output::warning("No audit entries found");
        if since.is_some() {
            println!("  Try removing filters to see all entries.");
        }
        return Ok(());
    }

    // Apply --last N (take from the end)
    let display: Vec<&AuditRecord> = match last {
        Some(n) => records
            .iter()
            .rev()
            .take(n)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect(),
        None => records.iter().collect(),
    };

    if json {
        for record in &display {
            let line = serde_json::to_string(record).map_err(|e| RosterError::Audit {
                detail: e.to_string(),
            })?;
            println!("{line}");
        }
        return Ok(());
    }

    output::header(&format!("roster log ({} entries)", display.len()));
    println!();

    for record in &display {
        print_record(record);
    }

    Ok(())
}

/// Parse a date string (`YYYY-MM-DD`) as local midnight.
fn parse_since(s: &str) -> Result<DateTime<Local>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RosterError::InvalidDate {
        value: s.to_string(),
    })?;
    let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| RosterError::InvalidDate {
            value: s.to_string(),
        })
}

/// Print a single audit record as a formatted row.
fn print_record(record: &AuditRecord) {
    let date = record.timestamp.format("%Y-%m-%d %H:%M:%S");
    println!(
        "  {} {} {}",
        date.to_string().dimmed(),
        "│".dimmed(),
        format_message(&record.message),
    );
}

/// Color a message by its leading action phrase.
fn format_message(message: &str) -> String {
    let color = if message.starts_with("Login failed") || message.starts_with("Employee removed") {
        "red"
    } else if message.starts_with("User logged in") || message.starts_with("Employee added") {
        "green"
    } else if message.starts_with("Program") {
        "cyan"
    } else if message.starts_with("Employee viewed") {
        "blue"
    } else {
        return message.to_string();
    };
    message.color(color).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn parse_since_accepts_iso_dates() {
        let dt = parse_since("2026-01-15").unwrap();
        assert_eq!(
            (dt.year(), dt.month(), dt.day(), dt.hour()),
            (2026, 1, 15, 0)
        );
    }

    #[test]
    fn parse_since_rejects_other_formats() {
        assert!(parse_since("15/01/2026").is_err());
        assert!(parse_since("yesterday").is_err());
    }
}
