use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, RosterError};
use crate::core::models::employee::Employee;
use crate::core::traits::storage::EmployeeStore;

/// Flat-file store: one `name,lastName,age` line per record.
///
/// The format has no header, no quoting, and no escaping; an embedded
/// comma in a field is an accepted limitation of the format, not
/// something this adapter tries to repair. Fields beyond the third are
/// ignored on load.
#[derive(Clone)]
pub struct CsvEmployeeStore {
    path: PathBuf,
}

impl CsvEmployeeStore {
    /// Create a store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Return the file path this store reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a single `name,lastName,age` line.
    fn parse_line(&self, line: &str, line_number: usize) -> Result<Employee> {
        let fields: Vec<&str> = line.split(',').collect();

        if fields.len() < 3 {
            return Err(RosterError::Parse {
                path: self.path.clone(),
                detail: format!(
                    "line {line_number}: expected 3 comma-separated fields, got {}",
                    fields.len()
                ),
            });
        }

        let age: i32 = fields[2].parse().map_err(|_| RosterError::Parse {
            path: self.path.clone(),
            detail: format!("line {line_number}: age is not an integer: '{}'", fields[2]),
        })?;

        Ok(Employee::new(fields[0], fields[1], age))
    }

    /// Serialize all records back to the file format.
    fn serialize(employees: &[Employee]) -> String {
        let mut out = String::new();
        for employee in employees {
            out.push_str(&format!(
                "{},{},{}\n",
                employee.name, employee.last_name, employee.age
            ));
        }
        out
    }
}

impl EmployeeStore for CsvEmployeeStore {
    fn load(&self) -> Result<Vec<Employee>> {
        let content = fs::read_to_string(&self.path)?;

        content
            .lines()
            .enumerate()
            .map(|(idx, line)| self.parse_line(line, idx + 1))
            .collect()
    }

    fn save(&self, employees: &[Employee]) -> Result<()> {
        fs::write(&self.path, Self::serialize(employees))?;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}
