use std::path::PathBuf;

/// All domain errors for roster.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Invalid username or password")]
    AuthenticationFailed,

    #[error(
        "Parse error in {path}: {detail}\n\n  \
         Expected format: name,lastName,age (one record per line).\n  \
         Embedded commas in fields are not supported."
    )]
    Parse { path: PathBuf, detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Audit log error: {detail}")]
    Audit { detail: String },

    #[error("Invalid date '{value}': expected YYYY-MM-DD, e.g. 2026-01-15")]
    InvalidDate { value: String },

    #[error("Failed to install shutdown handler: {detail}")]
    ShutdownHook { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RosterError>;
