// ============================================================================
// Timer Job Queue
// ============================================================================

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Instant;

use crate::descriptor::ElementId;

/// Job types scheduled for a reveal transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobType {
    /// Delay window elapsed, interpolation begins
    Start,
    /// Duration elapsed, element reaches its destination state
    Complete,
}

/// A scheduled timer callback.
///
/// `epoch` identifies the registration and `transition` the transition within
/// it; a job whose pair no longer matches the live element is stale and must
/// be dropped without effect.
#[derive(Clone, Debug)]
pub struct Job {
    pub element: ElementId,
    pub epoch: u64,
    pub transition: u64,
    pub job_type: JobType,
    pub deadline: Instant,
    seq: u64,
}

impl Job {
    /// Order of insertion into the queue; breaks deadline ties
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for Job {}

impl PartialOrd for Job {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Job {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Min-heap of pending jobs, earliest deadline first
#[derive(Debug, Default)]
pub struct JobQueue {
    heap: BinaryHeap<Reverse<Job>>,
    next_seq: u64,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a job
    pub fn push_job(
        &mut self,
        element: ElementId,
        epoch: u64,
        transition: u64,
        job_type: JobType,
        deadline: Instant,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Job {
            element,
            epoch,
            transition,
            job_type,
            deadline,
            seq,
        }));
    }

    /// Pop every job due at or before `now`, in deadline order
    pub fn drain_due(&mut self, now: Instant) -> Vec<Job> {
        let mut due = Vec::new();
        while let Some(Reverse(job)) = self.heap.peek() {
            if job.deadline > now {
                break;
            }
            if let Some(Reverse(job)) = self.heap.pop() {
                due.push(job);
            }
        }
        due
    }

    /// Drop all jobs for an element, returning how many were removed
    pub fn cancel_element(&mut self, element: &ElementId) -> usize {
        let before = self.heap.len();
        self.heap.retain(|Reverse(job)| &job.element != element);
        before - self.heap.len()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse(job)| job.deadline)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
