//! Random-burst process source.

use crate::process::Process;
use crate::types::{Pid, Ticks, XorShift32};

/// Default burst range, the classic 1–100 tick workload.
pub const DEFAULT_BURST_RANGE: (Ticks, Ticks) = (1, 100);

/// Creates processes with sequential ids and uniform random burst times.
///
/// An explicit value owned by the harness: two factories with the same
/// seed and range produce identical process streams.
pub struct ProcessFactory {
    next_pid: u32,
    rng: XorShift32,
    burst_min: Ticks,
    burst_max: Ticks,
}

impl ProcessFactory {
    pub fn new(seed: u32) -> Self {
        Self::with_burst_range(seed, DEFAULT_BURST_RANGE.0, DEFAULT_BURST_RANGE.1)
    }

    /// # Panics
    /// Panics if `min` is 0 or the range is inverted.
    pub fn with_burst_range(seed: u32, min: Ticks, max: Ticks) -> Self {
        assert!(min > 0, "burst times must be positive");
        assert!(min <= max, "inverted burst range: {min}..={max}");
        ProcessFactory {
            next_pid: 1,
            rng: XorShift32::new(seed),
            burst_min: min,
            burst_max: max,
        }
    }

    /// Create one process with the next id and a random burst.
    pub fn create(&mut self) -> Process {
        let burst = self.rng.next_range(self.burst_min, self.burst_max);
        self.create_with_burst(burst)
    }

    /// Create one process with an explicit burst (workloads that list
    /// their bursts rather than drawing them).
    pub fn create_with_burst(&mut self, burst: Ticks) -> Process {
        let pid = Pid(self.next_pid);
        self.next_pid += 1;
        Process::new(pid, burst)
    }

    pub fn create_batch(&mut self, n: usize) -> Vec<Process> {
        (0..n).map(|_| self.create()).collect()
    }
}
