use std::collections::HashMap;

use crate::core::models::audit_entry::{AuditAction, AuditEntry};
use crate::core::models::employee::Employee;
use crate::core::traits::audit::AuditLog;

/// The in-memory roster for the active session, keyed by last name.
///
/// Mutations emit their audit entries through the injected `AuditLog`.
/// A failed append never fails the store operation; how failures
/// surface is the injected port's policy, not this service's.
pub struct EmployeeService<A: AuditLog> {
    employees: HashMap<String, Employee>,
    audit: A,
}

impl<A: AuditLog> EmployeeService<A> {
    pub fn new(audit: A) -> Self {
        Self {
            employees: HashMap::new(),
            audit,
        }
    }

    /// Insert or silently replace the record at `employee.last_name`.
    pub fn add(&mut self, employee: Employee) {
        self.employees
            .insert(employee.last_name.clone(), employee.clone());
        self.record_audit(AuditEntry::with_subject(
            AuditAction::EmployeeAdded,
            employee,
        ));
    }

    /// Delete the record at `last_name`, returning it if it was present.
    /// A miss is a no-op and emits nothing.
    pub fn remove(&mut self, last_name: &str) -> Option<Employee> {
        let removed = self.employees.remove(last_name);
        if let Some(employee) = &removed {
            self.record_audit(AuditEntry::with_subject(
                AuditAction::EmployeeRemoved,
                employee.clone(),
            ));
        }
        removed
    }

    /// Every current record, in the map's natural (unspecified) order.
    pub fn list_all(&self) -> Vec<Employee> {
        self.employees.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    fn record_audit(&self, entry: AuditEntry) {
        // The mutation has already happened and stands either way.
        let _ = self.audit.record(&entry);
    }
}
