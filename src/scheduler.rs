//! The feedback scheduler.
//!
//! Owns the ordered priority levels and the process arena, and drives the
//! multi-level feedback algorithm: each outer pass sweeps the levels in
//! priority order, granting each its serve budget; time a front process
//! does not absorb (quantum cap or early completion) flows to the next
//! front within the same pass; a process whose quantum expires without
//! completing is relocated to an adjacent level.

use tracing::{debug, info};

use crate::process::{Process, ProcessEvent, ProcessState, ProcessTable};
use crate::queue::LevelQueue;
use crate::types::{Pid, Ticks, XorShift32};

/// Fixed odd constant separating the scheduler's PRNG stream from a
/// factory seeded with the same run seed.
const RELOCATION_STREAM: u32 = 0x9E37_79B9;

/// A multi-level feedback queue scheduler.
///
/// Level 0 is the highest priority; `add_queue` appends levels in
/// decreasing priority order. Newly admitted work always enters level 0.
pub struct Scheduler {
    levels: Vec<LevelQueue>,
    table: ProcessTable,
    rng: XorShift32,
}

impl Scheduler {
    /// Create a scheduler with no levels. `seed` drives the relocation
    /// direction draws at interior levels; two schedulers with the same
    /// seed and workload behave identically.
    pub fn new(seed: u32) -> Self {
        Scheduler {
            levels: Vec::new(),
            table: ProcessTable::new(),
            rng: XorShift32::new(seed ^ RELOCATION_STREAM),
        }
    }

    /// Append a level at the end of the priority order (lowest current
    /// priority). `quantum == 0` marks the level FCFS.
    pub fn add_queue(&mut self, capacity: usize, quantum: Ticks, serve_budget: Ticks) {
        self.levels.push(LevelQueue::new(capacity, quantum, serve_budget));
    }

    pub fn nr_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, index: usize) -> &LevelQueue {
        &self.levels[index]
    }

    /// Admit a process into the highest-priority level and record it in
    /// the registry.
    ///
    /// # Panics
    /// Panics if no levels have been configured.
    pub fn add_process(&mut self, process: Process) -> Pid {
        assert!(
            !self.levels.is_empty(),
            "scheduler has no levels configured"
        );
        let pid = self.table.insert(process);
        self.table.get_mut(pid).record(ProcessEvent::Admitted);
        debug!(pid = pid.0, "process admitted at level 0");
        self.levels[0].enqueue(pid, &mut self.table);
        pid
    }

    /// True iff every level's ready and waiting queues are empty.
    pub fn is_scheduling_done(&mut self) -> bool {
        let Self { levels, table, .. } = self;
        levels.iter_mut().all(|level| level.is_empty(table))
    }

    /// Run the feedback loop until every level is empty.
    ///
    /// Termination rests on each process's remaining time strictly
    /// decreasing under execution; on return every admitted process is
    /// done.
    pub fn run(&mut self) {
        let mut passes: u64 = 0;
        while !self.is_scheduling_done() {
            passes += 1;
            for index in 0..self.levels.len() {
                self.serve_level(index);
            }
        }
        info!(
            passes,
            processes = self.table.len(),
            total_executed = self.total_executed(),
            "scheduling complete"
        );
    }

    /// Serve one level for its configured budget within the current pass.
    ///
    /// The inner loop ends once a front process absorbs the entire
    /// remaining budget without finishing early and without being
    /// quantum-capped (saved time reaches 0), or the level drains.
    fn serve_level(&mut self, index: usize) {
        if self.levels[index].is_empty(&mut self.table) {
            return;
        }

        let mut budget = self.levels[index].serve_budget();
        while budget > 0 {
            if self.levels[index].is_empty(&mut self.table) {
                break;
            }

            let saved = if self.levels[index].is_fcfs() {
                match self.levels[index].execute_front(&mut self.table, budget) {
                    Ok(saved) => saved,
                    Err(_) => break,
                }
            } else {
                // Capture the front before executing: the relocation
                // check below applies to the process that just ran, even
                // if execute_front retired it and promoted a successor.
                let front = match self.levels[index].front() {
                    Ok(pid) => pid,
                    Err(_) => break,
                };
                let saved = match self.levels[index].execute_front(&mut self.table, budget) {
                    Ok(saved) => saved,
                    Err(_) => break,
                };
                if self.table.get(front).state() == ProcessState::Ready
                    && self.levels[index].remaining_quantum() == 0
                {
                    if let Ok(expired) = self.levels[index].dequeue(&mut self.table) {
                        self.relocate(expired, index);
                    }
                }
                saved
            };

            debug!(level = index, budget, saved, "served level front");
            budget = saved;
        }
    }

    /// Move a quantum-expired process to an adjacent level.
    ///
    /// The top level demotes, the bottom level promotes, and interior
    /// levels pick a direction at random. A single configured level has
    /// no adjacent destination; the process re-enters the same level.
    fn relocate(&mut self, pid: Pid, from: usize) {
        let last = self.levels.len() - 1;
        let dest = if last == 0 {
            from
        } else if from == 0 {
            1
        } else if from == last {
            last - 1
        } else if self.rng.next_bool() {
            from - 1
        } else {
            from + 1
        };
        debug!(pid = pid.0, from, dest, "quantum expired, relocating");
        self.levels[dest].enqueue(pid, &mut self.table);
    }

    /// Every process ever admitted, in admission order, including done
    /// ones.
    pub fn processes(&self) -> &[Process] {
        self.table.all()
    }

    /// Total ticks of CPU time consumed across all admitted processes.
    pub fn total_executed(&self) -> Ticks {
        self.table
            .all()
            .iter()
            .map(|p| p.burst() - p.remaining())
            .sum()
    }
}
