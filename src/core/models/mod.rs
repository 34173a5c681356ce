pub mod audit_entry;
pub mod employee;
