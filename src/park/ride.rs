use crate::config::Id;
use crate::errors::RideError;
use crate::park::archive::{self, ImportReport};
use crate::park::employee::Employee;
use crate::park::history::RideHistory;
use crate::park::queue::WaitingQueue;
use crate::park::visitor::Visitor;
use failure::Error;
use std::cmp::min;
use std::fmt;
use std::path::Path;
use std::{collections::vec_deque, slice};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub boarded: u32,
    pub capacity: u32,
    pub cycles_run: u32,
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "riders boarded: {} (max capacity: {}), total cycles operated: {}",
            self.boarded, self.capacity, self.cycles_run
        )
    }
}

/// 1. Ride when asked to `run_one_cycle`
///     * If there is no operator or the operator is not available
///         * Refuse with `NoAvailableOperator`, nothing changes
///     * Else if the waiting queue is empty
///         * Refuse with `EmptyQueue`, nothing changes
///     * Else
///         1) Move people from the head of the queue to the history until
///            `max_rider` boarded or the queue is empty
///         2) Increment `cycles_run` by one
///         3) Report boarded, capacity and `cycles_run`
///
/// Every other operation either fully applies or leaves the ride as it was.
#[derive(Debug)]
pub struct Ride {
    pub id: Id,
    pub name: String,
    operator: Option<Employee>,
    max_rider: u32,
    cycles_run: u32,
    queue: WaitingQueue,
    history: RideHistory,
}

fn clamp_capacity(ride: &str, max_rider: u32) -> u32 {
    if max_rider < 1 {
        warn!(ride, max_rider, "capacity must be at least 1, using 1");
        return 1;
    }

    max_rider
}

impl Ride {
    pub fn new<I: Into<Id>, N: Into<String>>(id: I, name: N, operator: Option<Employee>, max_rider: u32) -> Ride {
        let name = name.into();
        let max_rider = clamp_capacity(&name, max_rider);

        Ride {
            id: id.into(),
            name,
            operator,
            max_rider,
            cycles_run: 0,
            queue: WaitingQueue::new(),
            history: RideHistory::new(),
        }
    }

    pub fn operator(&self) -> Option<&Employee> {
        self.operator.as_ref()
    }

    pub fn operator_mut(&mut self) -> Option<&mut Employee> {
        self.operator.as_mut()
    }

    pub fn set_operator(&mut self, operator: Option<Employee>) {
        self.operator = operator;
    }

    pub fn max_rider(&self) -> u32 {
        self.max_rider
    }

    pub fn set_max_rider(&mut self, max_rider: u32) {
        self.max_rider = clamp_capacity(&self.name, max_rider);
    }

    pub fn cycles_run(&self) -> u32 {
        self.cycles_run
    }

    fn empty_queue(&self) -> RideError {
        RideError::EmptyQueue {
            ride: self.name.clone(),
        }
    }

    fn empty_history(&self) -> RideError {
        RideError::EmptyHistory {
            ride: self.name.clone(),
        }
    }

    pub fn enqueue_visitor(&mut self, visitor: Visitor) {
        info!(ride = %self.name, visitor = visitor.name(), "added visitor to queue");

        self.queue.enqueue(visitor);
    }

    pub fn dequeue_visitor(&mut self) -> Result<Visitor, RideError> {
        match self.queue.dequeue() {
            Some(visitor) => {
                info!(ride = %self.name, visitor = visitor.name(), "removed visitor from queue");
                Ok(visitor)
            }
            None => {
                warn!(ride = %self.name, "cannot remove visitor, queue is empty");
                Err(self.empty_queue())
            }
        }
    }

    pub fn list_queue(&self) -> vec_deque::Iter<Visitor> {
        self.queue.list()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn add_to_history(&mut self, visitor: Visitor) {
        info!(ride = %self.name, visitor = visitor.name(), "added visitor to history");

        self.history.add(visitor);
    }

    pub fn contains_in_history(&self, id: &str) -> bool {
        let found = self.history.contains(id);

        info!(ride = %self.name, id, found, "checked history");

        found
    }

    pub fn history_count(&self) -> usize {
        self.history.count()
    }

    pub fn history(&self) -> slice::Iter<Visitor> {
        self.history.iter()
    }

    pub fn sort_history(&mut self) -> Result<(), RideError> {
        if self.history.is_empty() {
            warn!(ride = %self.name, "cannot sort, history is empty");
            return Err(self.empty_history());
        }

        self.history.sort();

        info!(ride = %self.name, "history sorted by age then name");

        Ok(())
    }

    pub fn run_one_cycle(&mut self) -> Result<CycleReport, RideError> {
        match &self.operator {
            Some(operator) if operator.is_available() => {}
            _ => {
                warn!(ride = %self.name, "cannot start cycle, no available operator");
                return Err(RideError::NoAvailableOperator {
                    ride: self.name.clone(),
                });
            }
        }

        if self.queue.is_empty() {
            warn!(ride = %self.name, "cannot start cycle, queue is empty");
            return Err(self.empty_queue());
        }

        let riders_to_move = min(self.max_rider as usize, self.queue.len());

        for _ in 0..riders_to_move {
            if let Some(rider) = self.queue.dequeue() {
                debug!(ride = %self.name, rider = rider.name(), "boarding");
                self.history.add(rider);
            }
        }

        self.cycles_run += 1;

        let report = CycleReport {
            boarded: riders_to_move as u32,
            capacity: self.max_rider,
            cycles_run: self.cycles_run,
        };

        info!(ride = %self.name, boarded = report.boarded, cycles_run = report.cycles_run, "cycle completed");

        Ok(report)
    }

    pub fn export_history<P: AsRef<Path>>(&self, path: P) -> Result<usize, Error> {
        let path = path.as_ref();

        if self.history.is_empty() {
            warn!(ride = %self.name, "cannot export, history is empty");
            return Err(self.empty_history().into());
        }

        let written = archive::write_visitors(path, self.history.iter())?;

        info!(ride = %self.name, path = %path.display(), written, "exported history");

        Ok(written)
    }

    /// Appends every valid line of `path` to the history.
    pub fn import_history<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportReport, Error> {
        let path = path.as_ref();
        let report = archive::read_visitors(path)?;

        for skipped in report.skipped.iter() {
            warn!(ride = %self.name, line_no = skipped.line_no, line = %skipped.line, error = %skipped.error, "skipping invalid line");
        }

        self.history.extend(report.visitors.iter().cloned());

        info!(ride = %self.name, imported = report.imported(), "import completed");

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::park::person::Person;

    fn visitor(id: &str) -> Visitor {
        Visitor::new(Person::new(id, "Guest", 20).unwrap(), "Single Day", "2024-01-01").unwrap()
    }

    fn operator(available: bool) -> Employee {
        Employee::new(Person::new("E1", "Jo", 40).unwrap(), "Ride Operator", available).unwrap()
    }

    fn ride(capacity: u32, queued: &[&str]) -> Ride {
        let mut ride = Ride::new("R1", "Coaster", Some(operator(true)), capacity);

        for id in queued {
            ride.enqueue_visitor(visitor(id));
        }

        ride
    }

    #[test]
    fn boards_up_to_capacity() {
        let mut ride = ride(2, &["V1", "V2", "V3"]);

        let report = ride.run_one_cycle().unwrap();

        assert_eq!(
            report,
            CycleReport {
                boarded: 2,
                capacity: 2,
                cycles_run: 1
            }
        );
        let boarded: Vec<_> = ride.history().map(|v| v.id()).collect();
        assert_eq!(boarded, vec!["V1", "V2"]);
        let waiting: Vec<_> = ride.list_queue().map(|v| v.id()).collect();
        assert_eq!(waiting, vec!["V3"]);
    }

    #[test]
    fn short_queue_still_counts_a_cycle() {
        let mut ride = ride(5, &["V1"]);

        assert_eq!(ride.run_one_cycle().unwrap().boarded, 1);
        assert_eq!(ride.cycles_run(), 1);
        assert_eq!(ride.queue_len(), 0);
    }

    #[test]
    fn operator_is_checked_before_queue() {
        let mut ride = Ride::new("R1", "Coaster", None, 2);
        assert!(ride.operator().is_none());

        assert_eq!(
            ride.run_one_cycle(),
            Err(RideError::NoAvailableOperator {
                ride: "Coaster".to_string()
            })
        );

        ride.set_operator(Some(operator(false)));
        assert_eq!(ride.operator().map(|o| o.is_available()), Some(false));
        ride.enqueue_visitor(visitor("V1"));
        assert!(ride.run_one_cycle().is_err());
        assert_eq!(ride.queue_len(), 1);
        assert_eq!(ride.cycles_run(), 0);

        ride.operator_mut().unwrap().set_available(true);
        assert!(ride.run_one_cycle().is_ok());
    }

    #[test]
    fn empty_queue_refuses_cycle() {
        let mut ride = ride(2, &[]);

        assert_eq!(
            ride.run_one_cycle(),
            Err(RideError::EmptyQueue {
                ride: "Coaster".to_string()
            })
        );
        assert_eq!(ride.cycles_run(), 0);
    }

    #[test]
    fn capacity_is_clamped() {
        let mut ride = ride(0, &[]);
        assert_eq!(ride.max_rider(), 1);

        ride.set_max_rider(4);
        assert_eq!(ride.max_rider(), 4);
        ride.set_max_rider(0);
        assert_eq!(ride.max_rider(), 1);
    }

    #[test]
    fn dequeue_on_empty_queue_is_refused() {
        let mut ride = ride(2, &["V1"]);

        assert_eq!(ride.dequeue_visitor().unwrap().id(), "V1");
        assert!(ride.dequeue_visitor().is_err());
        assert_eq!(ride.queue_len(), 0);
    }

    #[test]
    fn empty_history_cannot_be_sorted_or_exported() {
        let mut ride = ride(2, &[]);

        assert!(ride.sort_history().is_err());

        let error = ride.export_history("unused.csv").unwrap_err();
        assert!(error.downcast_ref::<RideError>().is_some());
        assert!(!Path::new("unused.csv").exists());
    }
}
