use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use regex::Regex;

use crate::core::errors::{Result, RosterError};
use crate::core::models::audit_entry::{APP_NAME, AuditEntry, AuditRecord};
use crate::core::traits::audit::AuditLog;

/// Audit logger that appends one bracketed, human-readable line per entry:
///
/// ```text
/// [2026-01-15 09:30:00] [EmployeeManagementApp] Employee added Employee: Ada Lovelace, 36
/// ```
///
/// Every call opens the file, appends exactly one line, and lets RAII
/// close the handle before returning, including on the failure path.
/// There is no long-lived handle and no shared state, so the signal
/// handler can hold its own clone over the same path.
#[derive(Clone)]
pub struct TextAuditLog {
    log_path: PathBuf,
}

/// Matches `[timestamp] [application] message`.
static LINE_RE: OnceLock<Regex> = OnceLock::new();

fn line_re() -> &'static Regex {
    LINE_RE.get_or_init(|| {
        Regex::new(r"^\[(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\] \[([^\]]*)\] (.*)$")
            .expect("audit line pattern is valid")
    })
}

impl TextAuditLog {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Return the file path this log appends to.
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Render an entry as its on-disk line, without the trailing newline.
    fn render(entry: &AuditEntry) -> String {
        let mut line = format!(
            "[{}] [{}] {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            APP_NAME,
            entry.action
        );
        if let Some(employee) = &entry.subject {
            line.push_str(&format!(
                " Employee: {} {}, {}",
                employee.name, employee.last_name, employee.age
            ));
        }
        line
    }

    /// Parse one log line back into its read model.
    fn parse_line(line: &str, line_number: usize) -> Result<AuditRecord> {
        let captures = line_re()
            .captures(line)
            .ok_or_else(|| RosterError::Audit {
                detail: format!("Malformed audit entry at line {line_number}"),
            })?;

        let naive = NaiveDateTime::parse_from_str(&captures[1], "%Y-%m-%d %H:%M:%S")
            .map_err(|e| RosterError::Audit {
                detail: format!("Bad timestamp at line {line_number}: {e}"),
            })?;
        let timestamp: DateTime<Local> =
            Local
                .from_local_datetime(&naive)
                .earliest()
                .ok_or_else(|| RosterError::Audit {
                    detail: format!("Unrepresentable local time at line {line_number}"),
                })?;

        Ok(AuditRecord {
            timestamp,
            message: captures[3].to_string(),
        })
    }
}

impl AuditLog for TextAuditLog {
    fn record(&self, entry: &AuditEntry) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = self.log_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| RosterError::Audit {
                detail: format!("Cannot open audit log at {}: {e}", self.log_path.display()),
            })?;

        writeln!(file, "{}", Self::render(entry)).map_err(|e| RosterError::Audit {
            detail: format!("Failed to write audit entry: {e}"),
        })?;

        Ok(())
    }

    fn query(&self, since: Option<DateTime<Local>>) -> Result<Vec<AuditRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.log_path).map_err(|e| RosterError::Audit {
            detail: format!("Cannot read audit log: {e}"),
        })?;

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| RosterError::Audit {
                detail: format!("Error reading audit log line {}: {e}", idx + 1),
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let record = Self::parse_line(&line, idx + 1)?;

            if let Some(cutoff) = since
                && record.timestamp < cutoff
            {
                continue;
            }

            records.push(record);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::audit_entry::AuditAction;
    use crate::core::models::employee::Employee;
    use tempfile::TempDir;

    fn logger_in(dir: &TempDir) -> TextAuditLog {
        TextAuditLog::new(dir.path().join("audit_log.csv"))
    }

    fn fixed_entry(action: AuditAction, subject: Option<Employee>) -> AuditEntry {
        AuditEntry {
            timestamp: Local.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap(),
            action,
            subject,
        }
    }

    #[test]
    fn renders_the_documented_line_format() {
        let tmp = TempDir::new().unwrap();
        let logger = logger_in(&tmp);
        let entry = fixed_entry(
            AuditAction::EmployeeAdded,
            Some(Employee::new("Ada", "Lovelace", 36)),
        );

        logger.record(&entry).unwrap();

        let content = fs::read_to_string(logger.path()).unwrap();
        assert_eq!(
            content,
            "[2026-01-15 09:30:00] [EmployeeManagementApp] Employee added Employee: Ada Lovelace, 36\n"
        );
    }

    #[test]
    fn subjectless_entries_have_no_employee_suffix() {
        let tmp = TempDir::new().unwrap();
        let logger = logger_in(&tmp);

        logger
            .record(&fixed_entry(AuditAction::ProgramStarted, None))
            .unwrap();

        let content = fs::read_to_string(logger.path()).unwrap();
        assert_eq!(
            content,
            "[2026-01-15 09:30:00] [EmployeeManagementApp] Program started\n"
        );
    }

    #[test]
    fn record_appends_instead_of_overwriting() {
        let tmp = TempDir::new().unwrap();
        let logger = logger_in(&tmp);

        logger
            .record(&AuditEntry::new(AuditAction::ProgramStarted))
            .unwrap();
        logger
            .record(&AuditEntry::new(AuditAction::EmployeeViewed))
            .unwrap();
        logger
            .record(&AuditEntry::new(AuditAction::ProgramExited))
            .unwrap();

        let records = logger.query(None).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].message, "Program started");
        assert_eq!(records[2].message, "Program exited");
    }

    #[test]
    fn record_creates_the_file_and_parent_directory() {
        let tmp = TempDir::new().unwrap();
        let nested = TextAuditLog::new(tmp.path().join("logs/audit_log.csv"));

        nested
            .record(&AuditEntry::new(AuditAction::ProgramStarted))
            .unwrap();

        assert!(nested.path().exists());
    }

    #[test]
    fn query_round_trips_the_rendered_line() {
        let tmp = TempDir::new().unwrap();
        let logger = logger_in(&tmp);
        let entry = fixed_entry(
            AuditAction::EmployeeRemoved,
            Some(Employee::new("Alan", "Turing", 41)),
        );

        logger.record(&entry).unwrap();
        let records = logger.query(None).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, entry.timestamp);
        assert_eq!(records[0].message, "Employee removed Employee: Alan Turing, 41");
    }

    #[test]
    fn query_missing_file_returns_empty() {
        let logger = TextAuditLog::new(PathBuf::from("/nonexistent/audit_log.csv"));
        assert!(logger.query(None).unwrap().is_empty());
    }

    #[test]
    fn query_filters_by_since() {
        let tmp = TempDir::new().unwrap();
        let logger = logger_in(&tmp);

        let old = AuditEntry {
            timestamp: Local.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            action: AuditAction::ProgramStarted,
            subject: None,
        };
        let recent = AuditEntry {
            timestamp: Local.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
            action: AuditAction::ProgramExited,
            subject: None,
        };
        logger.record(&old).unwrap();
        logger.record(&recent).unwrap();

        let cutoff = Local.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let records = logger.query(Some(cutoff)).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "Program exited");
    }

    #[test]
    fn query_reports_malformed_lines_with_their_number() {
        let tmp = TempDir::new().unwrap();
        let logger = logger_in(&tmp);
        logger
            .record(&AuditEntry::new(AuditAction::ProgramStarted))
            .unwrap();
        fs::write(
            logger.path(),
            fs::read_to_string(logger.path()).unwrap() + "not an audit line\n",
        )
        .unwrap();

        let err = logger.query(None).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn query_skips_blank_lines() {
        let tmp = TempDir::new().unwrap();
        let logger = logger_in(&tmp);
        logger
            .record(&AuditEntry::new(AuditAction::ProgramStarted))
            .unwrap();
        fs::write(
            logger.path(),
            fs::read_to_string(logger.path()).unwrap() + "\n\n",
        )
        .unwrap();

        assert_eq!(logger.query(None).unwrap().len(), 1);
    }
}
