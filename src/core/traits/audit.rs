use crate::core::errors::Result;
use crate::core::models::audit_entry::{AuditEntry, AuditRecord};

/// Port for recording and querying audit events.
///
/// Appends are fallible so callers can decide what a failed append
/// means; the session treats audit failures as warnings, never as
/// reasons to abort the operation that triggered them.
pub trait AuditLog: Send + Sync {
    /// Append an entry to the audit log.
    fn record(&self, entry: &AuditEntry) -> Result<()>;

    /// Query all entries, optionally limited to those at or after `since`.
    fn query(
        &self,
        since: Option<chrono::DateTime<chrono::Local>>,
    ) -> Result<Vec<AuditRecord>>;
}
