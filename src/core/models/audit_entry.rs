use chrono::{DateTime, Local};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::core::models::employee::Employee;

/// Application name stamped into every audit line.
pub const APP_NAME: &str = "EmployeeManagementApp";

/// Actions that get recorded in the audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditAction {
    ProgramStarted,
    LoginSucceeded {
        username: String,
    },
    /// Failed logins record a truncated SHA-256 fingerprint of the
    /// supplied password, never the password itself.
    LoginFailed {
        username: String,
        password_digest: String,
    },
    EmployeeAdded,
    EmployeeRemoved,
    EmployeeViewed,
    ProgramExited,
    ProgramShutdown,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::ProgramStarted => write!(f, "Program started"),
            AuditAction::LoginSucceeded { username } => {
                write!(f, "User logged in with username: {username}")
            }
            AuditAction::LoginFailed {
                username,
                password_digest,
            } => write!(
                f,
                "Login failed for username: {username}, password digest: {password_digest}"
            ),
            AuditAction::EmployeeAdded => write!(f, "Employee added"),
            AuditAction::EmployeeRemoved => write!(f, "Employee removed"),
            AuditAction::EmployeeViewed => write!(f, "Employee viewed"),
            AuditAction::ProgramExited => write!(f, "Program exited"),
            AuditAction::ProgramShutdown => write!(f, "Program shutdown"),
        }
    }
}

/// A single entry as written to the audit log.
///
/// The timestamp is the wall clock at the moment the action happened;
/// constructors capture it so callers cannot backdate entries.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub timestamp: DateTime<Local>,
    pub action: AuditAction,
    pub subject: Option<Employee>,
}

impl AuditEntry {
    /// An entry with no subject record (session lifecycle, view).
    pub fn new(action: AuditAction) -> Self {
        Self {
            timestamp: Local::now(),
            action,
            subject: None,
        }
    }

    /// An entry referencing the employee the action touched.
    pub fn with_subject(action: AuditAction, subject: Employee) -> Self {
        Self {
            timestamp: Local::now(),
            action,
            subject: Some(subject),
        }
    }

    /// A failed-login entry. The raw password is reduced to a
    /// non-reversible fingerprint before it ever leaves this call.
    pub fn login_failed(username: &str, password: &str) -> Self {
        Self::new(AuditAction::LoginFailed {
            username: username.to_string(),
            password_digest: password_fingerprint(password),
        })
    }
}

/// Truncated SHA-256 hex digest of a password, for audit lines that must
/// record that a value was wrong without recording the value.
fn password_fingerprint(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let hex = format!("{:x}", hasher.finalize());
    hex[..12].to_string()
}

/// The read model for one parsed audit line: what `roster log` shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    pub timestamp: DateTime<Local>,
    pub message: String,
}
