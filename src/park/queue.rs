use crate::park::visitor::Visitor;
use std::collections::vec_deque::{self, VecDeque};

/// Visitors waiting to board, served first come first served.
#[derive(Debug, Default)]
pub struct WaitingQueue {
    visitors: VecDeque<Visitor>,
}

impl WaitingQueue {
    pub fn new() -> WaitingQueue {
        WaitingQueue {
            visitors: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, visitor: Visitor) {
        self.visitors.push_back(visitor);
    }

    pub fn dequeue(&mut self) -> Option<Visitor> {
        self.visitors.pop_front()
    }

    /// Current contents, head first. Calling it again restarts the walk.
    pub fn list(&self) -> vec_deque::Iter<Visitor> {
        self.visitors.iter()
    }

    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}
