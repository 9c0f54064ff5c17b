use crate::errors::ValidationError;
use crate::park::person::{check_required, Person};
use std::fmt;

/// Ride operator. Only an available operator lets a ride run a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub person: Person,
    pub role: String,
    available: bool,
}

impl Employee {
    pub fn new(person: Person, role: &str, available: bool) -> Result<Employee, ValidationError> {
        check_required("role", role)?;

        Ok(Employee {
            person,
            role: role.to_string(),
            available,
        })
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.person,
            self.role,
            if self.available { "Available" } else { "Unavailable" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_availability() {
        let mut employee = Employee::new(Person::new("E1", "Jo", 40).unwrap(), "Ride Operator", true).unwrap();

        assert_eq!(employee.to_string(), "ID:E1, Name:Jo, age:40,Ride Operator,Available");

        employee.set_available(false);
        assert!(employee.to_string().ends_with(",Unavailable"));
    }

    #[test]
    fn requires_role() {
        assert!(Employee::new(Person::new("E1", "Jo", 40).unwrap(), "", true).is_err());
    }
}
