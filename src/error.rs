//! Error types for the level/queue API surface.

use thiserror::Error;

/// Misuse guards for the queue surface.
///
/// Neither variant is reachable through the scheduler's own control flow
/// (emptiness is always checked before front access, and admission always
/// routes through the unbounded waiting backlog); they exist as a contract
/// for correct standalone use of [`LevelQueue`](crate::queue::LevelQueue)
/// and [`BoundedQueue`](crate::queue::BoundedQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The ready queue has no front element.
    #[error("ready queue is empty, cannot access front element")]
    EmptyAccess,

    /// A push was refused because the bounded queue is at its declared
    /// capacity.
    #[error("queue is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
}
