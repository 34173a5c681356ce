use crate::core::errors::Result;
use crate::core::models::employee::Employee;

/// Port for persisting the roster between sessions.
///
/// The no-file policy belongs to the caller: `load` on a missing target
/// is an error, and the session checks `exists` first instead of
/// invoking it.
pub trait EmployeeStore: Send + Sync {
    /// Read every record from the backing store.
    fn load(&self) -> Result<Vec<Employee>>;

    /// Overwrite the backing store with the given records.
    fn save(&self, employees: &[Employee]) -> Result<()>;

    /// Whether the backing target currently exists.
    fn exists(&self) -> bool;
}
