use crate::park::visitor::{by_age_then_name, Visitor};
use std::slice;

/// Everybody who rode, in boarding order. Entries are only ever appended or
/// reordered, never removed one by one.
#[derive(Debug, Default)]
pub struct RideHistory {
    visitors: Vec<Visitor>,
}

impl RideHistory {
    pub fn new() -> RideHistory {
        RideHistory {
            visitors: Vec::new(),
        }
    }

    pub fn add(&mut self, visitor: Visitor) {
        self.visitors.push(visitor);
    }

    pub fn extend<I: IntoIterator<Item = Visitor>>(&mut self, visitors: I) {
        self.visitors.extend(visitors);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.visitors.iter().any(|visitor| visitor.id() == id)
    }

    pub fn count(&self) -> usize {
        self.visitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<Visitor> {
        self.visitors.iter()
    }

    pub fn sort(&mut self) {
        // stable, so equal keys keep boarding order
        self.visitors.sort_by(by_age_then_name);
    }
}
