use crate::config::Id;
use crate::errors::ValidationError;
use std::fmt;

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 120;

/// Identity shared by everybody the park keeps records of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: Id,
    pub name: String,
    age: u32,
}

pub fn check_age(age: i64) -> Result<u32, ValidationError> {
    if age >= MIN_AGE as i64 && age <= MAX_AGE as i64 {
        Ok(age as u32)
    } else {
        Err(ValidationError::new(format!(
            "age must be between {}-{}, got {}",
            MIN_AGE, MAX_AGE, age
        )))
    }
}

pub fn check_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(format!("{} is required", field)));
    }

    Ok(())
}

/// Characters that would split a record when written as a CSV line.
pub const CSV_SEPARATORS: &[char] = &[',', '\n', '\r'];

/// A required value that is also written to the history archive verbatim.
pub fn check_csv_field(field: &str, value: &str) -> Result<(), ValidationError> {
    check_required(field, value)?;

    if value.contains(CSV_SEPARATORS) {
        return Err(ValidationError::new(format!(
            "{} must not contain commas or line breaks",
            field
        )));
    }

    Ok(())
}

impl Person {
    pub fn new<I: Into<Id>, N: Into<String>>(id: I, name: N, age: i64) -> Result<Person, ValidationError> {
        let id = id.into();
        let name = name.into();

        check_csv_field("id", &id)?;
        check_csv_field("name", &name)?;

        Ok(Person {
            id,
            name,
            age: check_age(age)?,
        })
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Out of range values are rejected and the current age is kept.
    pub fn set_age(&mut self, age: i64) -> Result<(), ValidationError> {
        self.age = check_age(age)?;

        Ok(())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ID:{}, Name:{}, age:{}", self.id, self.name, self.age)
    }
}
