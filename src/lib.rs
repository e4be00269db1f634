//! mlfq_sim - Deterministic simulator for a multi-level feedback queue
//! (MLFQ) CPU scheduler.
//!
//! Processes carry an integer burst of required CPU time and flow through
//! an ordered sequence of priority levels. Each level admits a bounded
//! number of ready processes, slices their execution FCFS or Round-Robin,
//! and hands unabsorbed time to the next process in the same pass; a
//! process whose quantum expires without completing is relocated to an
//! adjacent level. All time is discrete ticks; all randomness comes from
//! a single u32 seed.
//!
//! # Architecture
//!
//! - **Scheduler**: drives the per-pass budgeted service loop and the
//!   feedback relocation between levels
//! - **LevelQueue**: one priority tier — bounded ready FIFO, unbounded
//!   waiting backlog, quantum-capped front execution
//! - **Process**: unit of work with a state machine and audit history
//! - **ProcessFactory**: sequential-id, random-burst process source
//! - **Workloads**: JSON descriptions of full simulations
//!
//! # Usage
//!
//! ```rust
//! use mlfq_sim::{ProcessFactory, Scheduler};
//!
//! let mut scheduler = Scheduler::new(42);
//! scheduler.add_queue(2, 8, 32); // capacity, quantum, serve budget
//! scheduler.add_queue(4, 0, 64); // quantum 0 = FCFS
//!
//! let mut factory = ProcessFactory::new(42);
//! for process in factory.create_batch(5) {
//!     scheduler.add_process(process);
//! }
//!
//! scheduler.run();
//! assert!(scheduler.processes().iter().all(|p| p.is_done()));
//! ```

pub mod error;
pub mod factory;
pub mod process;
pub mod queue;
pub mod scheduler;
pub mod types;
pub mod workload;

// Re-export the main public types for convenience.
pub use error::QueueError;
pub use factory::ProcessFactory;
pub use process::{Process, ProcessEvent, ProcessState, ProcessTable};
pub use queue::{BoundedQueue, LevelQueue};
pub use scheduler::Scheduler;
pub use types::{Pid, Ticks, XorShift32};
pub use workload::{LevelSpec, ProcessesSpec, WorkloadError, WorkloadSpec};
