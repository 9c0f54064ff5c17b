use crate::errors::{LineError, ValidationError};
use crate::park::person::{check_csv_field, Person};
use std::cmp::Ordering;
use std::fmt;

pub const CSV_FIELDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visitor {
    pub person: Person,
    pub ticket_type: String,
    pub visit_date: String,
}

impl Visitor {
    pub fn new(person: Person, ticket_type: &str, visit_date: &str) -> Result<Visitor, ValidationError> {
        check_csv_field("ticket type", ticket_type)?;
        check_csv_field("visit date", visit_date)?;

        Ok(Visitor {
            person,
            ticket_type: ticket_type.to_string(),
            visit_date: visit_date.to_string(),
        })
    }

    pub fn id(&self) -> &str {
        &self.person.id
    }

    pub fn name(&self) -> &str {
        &self.person.name
    }

    pub fn age(&self) -> u32 {
        self.person.age()
    }

    /// `id,name,age,ticketType,visitDate`, no quoting.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.id(),
            self.name(),
            self.age(),
            self.ticket_type,
            self.visit_date
        )
    }

    pub fn from_csv_line(line: &str) -> Result<Visitor, LineError> {
        let parts: Vec<&str> = line.trim_end_matches(&['\r', '\n'][..]).split(',').collect();

        if parts.len() != CSV_FIELDS {
            return Err(LineError::FieldCount(parts.len()));
        }

        let age = parts[2]
            .parse::<i64>()
            .map_err(|_| LineError::InvalidAge(parts[2].to_string()))?;

        let person = Person::new(parts[0], parts[1], age)?;

        Ok(Visitor::new(person, parts[3], parts[4])?)
    }

    pub fn sort_key(&self) -> (u32, String) {
        (self.age(), self.name().to_lowercase())
    }
}

/// Age ascending, then name ignoring case.
pub fn by_age_then_name(a: &Visitor, b: &Visitor) -> Ordering {
    a.sort_key().cmp(&b.sort_key())
}

impl fmt::Display for Visitor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ID: {} | Name: {} | Age: {} | Ticket: {} | Date: {}",
            self.id(),
            self.name(),
            self.age(),
            self.ticket_type,
            self.visit_date
        )
    }
}
