//! Pool worker.
//!
//! # States
//! ```text
//! Idle → Processing → Idle → … → Terminated
//! ```
//! - Idle → Processing: a task was received
//! - Processing → Idle: the completed task was pushed to the result queue
//! - Idle → Terminated: the task queue is closed and drained, or the result
//!   queue lost its reader

use std::time::Duration;

use crate::pool::task::Task;
use crate::queue::{QueueReceiver, QueueSender};

/// Worker lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Processing,
    Terminated,
}

impl WorkerState {
    /// Whether `next` is a legal successor of this state.
    pub fn can_transition_to(self, next: WorkerState) -> bool {
        matches!(
            (self, next),
            (WorkerState::Idle, WorkerState::Processing)
                | (WorkerState::Processing, WorkerState::Idle)
                | (WorkerState::Idle, WorkerState::Terminated)
                | (WorkerState::Processing, WorkerState::Terminated)
        )
    }
}

/// A stateless worker identified by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Worker {
    id: usize,
}

impl Worker {
    pub fn new(id: usize) -> Self {
        Self { id }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Drain `tasks` until it is closed, pushing each completed task onto
    /// `results`.
    ///
    /// Returns the number of tasks this worker delivered.
    pub async fn run(
        self,
        tasks: QueueReceiver<Task>,
        results: QueueSender<Task>,
        work_delay: Duration,
    ) -> usize {
        let mut state = WorkerState::Idle;
        let mut delivered = 0;

        tracing::info!(worker_id = self.id, "Worker started and waiting for tasks");

        while let Some(task) = tasks.recv().await {
            state = self.transition(state, WorkerState::Processing);
            tracing::info!(worker_id = self.id, task_id = task.id, "Worker processing task");

            let task = self.process(task, work_delay).await;
            tracing::info!(worker_id = self.id, task_id = task.id, "Worker finished task");

            if let Err(e) = results.send(task).await {
                let task = e.into_inner();
                tracing::error!(
                    worker_id = self.id,
                    task_id = task.id,
                    "Result queue has no reader, worker stopping"
                );
                break;
            }
            delivered += 1;
            state = self.transition(state, WorkerState::Idle);
        }

        self.transition(state, WorkerState::Terminated);
        tracing::info!(
            worker_id = self.id,
            delivered,
            "Worker has finished all tasks and is shutting down"
        );
        delivered
    }

    async fn process(&self, task: Task, work_delay: Duration) -> Task {
        if !work_delay.is_zero() {
            tokio::time::sleep(work_delay).await;
        }
        task.complete()
    }

    fn transition(&self, from: WorkerState, to: WorkerState) -> WorkerState {
        debug_assert!(
            from.can_transition_to(to),
            "illegal worker transition {:?} -> {:?}",
            from,
            to
        );
        tracing::trace!(worker_id = self.id, from = ?from, to = ?to, "Worker state change");
        to
    }
}
