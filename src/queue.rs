//! Priority level queues.
//!
//! A [`LevelQueue`] is one tier of the feedback queue: a bounded "ready"
//! FIFO holding the processes currently eligible to run, an unbounded
//! "waiting" backlog behind it, and the time-slicing policy for the tier
//! (FCFS when the quantum is 0, Round-Robin otherwise).

use std::collections::VecDeque;

use crate::error::QueueError;
use crate::process::{ProcessState, ProcessTable};
use crate::types::{Pid, Ticks};

/// FIFO with a fixed capacity declared at construction.
///
/// `push` refuses entries beyond the capacity instead of growing; the
/// refusal is surfaced as [`QueueError::CapacityExceeded`] so misuse is
/// observable rather than silently absorbed.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Self {
        BoundedQueue {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) -> Result<(), QueueError> {
        if self.items.len() >= self.capacity {
            return Err(QueueError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.items.push_back(item);
        Ok(())
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// One priority tier of the feedback queue.
///
/// Processes are referenced by [`Pid`]; all state mutation goes through
/// the [`ProcessTable`] owned by the scheduler.
pub struct LevelQueue {
    ready: BoundedQueue<Pid>,
    waiting: VecDeque<Pid>,
    quantum: Ticks,
    remaining_quantum: Ticks,
    serve_budget: Ticks,
}

impl LevelQueue {
    /// A level admitting up to `capacity` concurrently-ready processes.
    /// `quantum == 0` marks the level FCFS; otherwise the front process
    /// is capped at `quantum` ticks per continuation. `serve_budget` is
    /// the total time the level is granted per scheduling pass.
    pub fn new(capacity: usize, quantum: Ticks, serve_budget: Ticks) -> Self {
        LevelQueue {
            ready: BoundedQueue::new(capacity),
            waiting: VecDeque::new(),
            quantum,
            remaining_quantum: quantum,
            serve_budget,
        }
    }

    pub fn is_fcfs(&self) -> bool {
        self.quantum == 0
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }

    /// Quantum left for the current ready-front process.
    pub fn remaining_quantum(&self) -> Ticks {
        self.remaining_quantum
    }

    pub fn serve_budget(&self) -> Ticks {
        self.serve_budget
    }

    pub fn capacity(&self) -> usize {
        self.ready.capacity()
    }

    pub fn ready_len(&self) -> usize {
        self.ready.len()
    }

    pub fn waiting_len(&self) -> usize {
        self.waiting.len()
    }

    /// Admit a process into the waiting backlog, then promote as capacity
    /// allows.
    pub fn enqueue(&mut self, pid: Pid, table: &mut ProcessTable) {
        table.get_mut(pid).set_state(ProcessState::Waiting);
        self.waiting.push_back(pid);
        self.ready_processes(table);
    }

    /// Promote waiting processes into free ready slots. Idempotent.
    pub fn ready_processes(&mut self, table: &mut ProcessTable) {
        while !self.ready.is_full() {
            let Some(pid) = self.waiting.pop_front() else {
                break;
            };
            table.get_mut(pid).set_state(ProcessState::Ready);
            self.ready
                .push(pid)
                .expect("ready slot free after is_full check");
        }
    }

    /// Remove and return the ready-front, resetting the quantum for the
    /// next front and backfilling the vacated slot.
    pub fn dequeue(&mut self, table: &mut ProcessTable) -> Result<Pid, QueueError> {
        let pid = self.ready.pop_front().ok_or(QueueError::EmptyAccess)?;
        self.remaining_quantum = self.quantum;
        self.ready_processes(table);
        Ok(pid)
    }

    /// The current ready-front. Never attempts a backfill; callers must
    /// check emptiness first.
    pub fn front(&self) -> Result<Pid, QueueError> {
        self.ready.front().copied().ok_or(QueueError::EmptyAccess)
    }

    pub fn waiting_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Report ready-queue emptiness, refilling from the waiting backlog
    /// first (lazy refill).
    pub fn ready_empty(&mut self, table: &mut ProcessTable) -> bool {
        if !self.waiting_empty() {
            self.ready_processes(table);
        }
        self.ready.is_empty()
    }

    /// Whether the level holds no work at all.
    pub fn is_empty(&mut self, table: &mut ProcessTable) -> bool {
        self.waiting_empty() && self.ready_empty(table)
    }

    /// Execute the ready-front for up to `exec_time` ticks.
    ///
    /// On a Round-Robin level the grant is first truncated to the
    /// remaining quantum; the cut-off excess, plus whatever the process
    /// hands back by finishing early, is returned as saved time for the
    /// caller to redirect to the next front. A front that completes is
    /// retired from the level immediately and is never eligible for
    /// relocation.
    ///
    /// Invariant: consumed + returned saved time == `exec_time`.
    pub fn execute_front(
        &mut self,
        table: &mut ProcessTable,
        exec_time: Ticks,
    ) -> Result<Ticks, QueueError> {
        let pid = self.front()?;
        let mut exec_time = exec_time;
        let mut saved: Ticks = 0;

        if !self.is_fcfs() && self.remaining_quantum < exec_time {
            saved += exec_time - self.remaining_quantum;
            exec_time = self.remaining_quantum;
        }

        saved += table.get_mut(pid).execute(exec_time);

        if !self.is_fcfs() {
            self.remaining_quantum -= exec_time;
        }

        if table.get(pid).is_done() {
            self.dequeue(table)?;
            self.ready_processes(table);
        }

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_queue_push_pop() {
        let mut q: BoundedQueue<u32> = BoundedQueue::new(2);
        q.push(1).unwrap();
        q.push(2).unwrap();
        assert!(q.is_full());
        assert_eq!(q.pop_front(), Some(1));
        assert_eq!(q.front(), Some(&2));
    }

    #[test]
    fn test_bounded_queue_refuses_overflow() {
        let mut q: BoundedQueue<u32> = BoundedQueue::new(1);
        q.push(1).unwrap();
        assert_eq!(q.push(2), Err(QueueError::CapacityExceeded { capacity: 1 }));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_zero_capacity_queue() {
        let mut q: BoundedQueue<u32> = BoundedQueue::new(0);
        assert!(q.is_full());
        assert_eq!(q.push(1), Err(QueueError::CapacityExceeded { capacity: 0 }));
    }
}
