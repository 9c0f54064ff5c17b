pub mod archive;
pub mod employee;
pub mod history;
pub mod person;
pub mod queue;
pub mod ride;
pub mod visitor;

pub use self::employee::Employee;
pub use self::person::Person;
pub use self::ride::{CycleReport, Ride};
pub use self::visitor::Visitor;
