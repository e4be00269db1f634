//! Process model: state machine, clamped execution, and audit history.
//!
//! A process is a unit of simulated work. Its history is an append-only
//! event log recorded purely for observation; scheduling decisions never
//! read it.

use std::collections::HashMap;

use crate::types::{Pid, Ticks};

/// The state a simulated process can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Queued in a level's waiting backlog, not yet eligible to run.
    Waiting,
    /// Occupies a ready slot, eligible to run.
    Ready,
    /// Consuming CPU time (transient, held only inside `execute`).
    Running,
    /// All burst time consumed. A done process is never re-enqueued.
    Done,
}

/// One entry in a process's audit history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessEvent {
    /// The process was created with the given burst time.
    Created { burst: Ticks },
    /// The process was admitted into the scheduler.
    Admitted,
    /// One execution slice consumed `amount` ticks.
    Executed { amount: Ticks },
    /// The process consumed its full burst.
    Completed,
}

/// A simulated process.
pub struct Process {
    pid: Pid,
    burst: Ticks,
    remaining: Ticks,
    state: ProcessState,
    history: Vec<ProcessEvent>,
}

impl Process {
    /// Create a process requiring `burst` ticks of CPU time.
    ///
    /// # Panics
    /// Panics if `burst` is 0.
    pub fn new(pid: Pid, burst: Ticks) -> Self {
        assert!(burst > 0, "process burst must be positive");
        Process {
            pid,
            burst,
            remaining: burst,
            state: ProcessState::Waiting,
            history: vec![ProcessEvent::Created { burst }],
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Total CPU time this process requires.
    pub fn burst(&self) -> Ticks {
        self.burst
    }

    /// CPU time still owed. Non-increasing over the process's lifetime.
    pub fn remaining(&self) -> Ticks {
        self.remaining
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ProcessState::Done
    }

    pub(crate) fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    pub(crate) fn record(&mut self, event: ProcessEvent) {
        self.history.push(event);
    }

    /// Execute for up to `exec_time` ticks.
    ///
    /// Consumes `min(exec_time, remaining)` from the remaining time,
    /// records the slice, and transitions to `Done` when the burst is
    /// fully consumed, else back to `Ready`. Returns the leftover
    /// `exec_time - consumed`. Never fails; over-grants are clamped.
    pub fn execute(&mut self, exec_time: Ticks) -> Ticks {
        self.state = ProcessState::Running;

        let consumed = exec_time.min(self.remaining);
        self.remaining -= consumed;
        self.history.push(ProcessEvent::Executed { amount: consumed });

        if self.remaining == 0 {
            self.state = ProcessState::Done;
            self.history.push(ProcessEvent::Completed);
        } else {
            self.state = ProcessState::Ready;
        }

        exec_time - consumed
    }

    /// The audit history, in the order events occurred.
    pub fn history(&self) -> &[ProcessEvent] {
        &self.history
    }

    /// Render the history as human-readable lines for external reporting.
    pub fn history_lines(&self) -> Vec<String> {
        let id = self.pid.0;
        self.history
            .iter()
            .map(|event| match event {
                ProcessEvent::Created { burst } => {
                    format!("process {id} created with burst time {burst}")
                }
                ProcessEvent::Admitted => format!("process {id} added to the system"),
                ProcessEvent::Executed { amount } => {
                    format!("process {id} executed for {amount} ticks")
                }
                ProcessEvent::Completed => format!("process {id} finished executing"),
            })
            .collect()
    }
}

/// Owning arena for every admitted process.
///
/// The table is the single authority for process state and lifetime;
/// levels hold only [`Pid`] handles into it.
#[derive(Default)]
pub struct ProcessTable {
    procs: Vec<Process>,
    index: HashMap<Pid, usize>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a process.
    ///
    /// # Panics
    /// Panics if a process with the same id is already registered.
    pub fn insert(&mut self, process: Process) -> Pid {
        let pid = process.pid();
        assert!(
            !self.index.contains_key(&pid),
            "duplicate process id {}",
            pid.0
        );
        self.index.insert(pid, self.procs.len());
        self.procs.push(process);
        pid
    }

    /// # Panics
    /// Panics on an unknown id.
    pub fn get(&self, pid: Pid) -> &Process {
        let idx = *self
            .index
            .get(&pid)
            .unwrap_or_else(|| panic!("unknown process id {}", pid.0));
        &self.procs[idx]
    }

    /// # Panics
    /// Panics on an unknown id.
    pub fn get_mut(&mut self, pid: Pid) -> &mut Process {
        let idx = *self
            .index
            .get(&pid)
            .unwrap_or_else(|| panic!("unknown process id {}", pid.0));
        &mut self.procs[idx]
    }

    /// Every process ever admitted, in admission order.
    pub fn all(&self) -> &[Process] {
        &self.procs
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }
}
