/// A single personnel record: the unit stored, persisted, and audited.
///
/// `last_name` doubles as the unique key in the roster: two records
/// sharing a last name are indistinguishable to the store, and the
/// second silently overwrites the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub name: String,
    pub last_name: String,
    /// Parsed as a signed integer; range is deliberately not validated.
    pub age: i32,
}

impl Employee {
    pub fn new(name: impl Into<String>, last_name: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            last_name: last_name.into(),
            age,
        }
    }
}

impl std::fmt::Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}, age {}", self.name, self.last_name, self.age)
    }
}
