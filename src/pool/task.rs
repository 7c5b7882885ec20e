//! Unit of work flowing through the pool.

/// A task submitted to the worker pool.
///
/// Tasks are moved, never shared: the producer owns a task until it is
/// queued, then exactly one worker owns it, then the collector.
#[derive(Debug, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub processed: bool,
}

impl Task {
    /// Create an unprocessed task.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            processed: false,
        }
    }

    /// Mark the task as processed.
    pub fn complete(mut self) -> Self {
        self.processed = true;
        self
    }
}
