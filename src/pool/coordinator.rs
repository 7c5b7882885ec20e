//! Pool coordinator: starts workers, feeds the task queue, collects results.
//!
//! # Responsibilities
//! - Launch a fixed number of workers sharing one task and one result queue
//! - Feed submitted tasks in order
//! - Close the task queue and collect exactly one result per submitted task
//!
//! # Design Decisions
//! - Submissions run on a feeder task so a full result queue can never stall
//!   the producer while the collector is waiting
//! - Successive feeders are chained, keeping submission order across calls
//! - Result order is whatever the workers produce; only the count is fixed

use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::PoolConfig;
use crate::pool::task::Task;
use crate::pool::worker::Worker;
use crate::queue::{bounded, QueueReceiver, QueueSender};

/// Errors that can occur while running the pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The pool was configured without workers.
    #[error("worker pool needs at least one worker")]
    NoWorkers,

    /// Every worker exited before the task with this id could be queued.
    #[error("task queue closed before task {0} was sent")]
    TaskQueueClosed(u64),

    /// The result queue closed before every task reported back.
    #[error("collected {received} of {expected} results before the result queue closed")]
    Incomplete { expected: usize, received: usize },

    /// A worker or feeder task panicked or was cancelled.
    #[error("pool task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A fixed-size pool of workers.
pub struct WorkerPool {
    tasks: QueueSender<Task>,
    results: QueueReceiver<Task>,
    workers: Vec<JoinHandle<usize>>,
    feeder: Option<JoinHandle<Result<(), PoolError>>>,
    submitted: usize,
    submit_interval: Duration,
}

impl WorkerPool {
    /// Start `config.workers` workers. Must be called inside a Tokio runtime.
    pub fn start(config: &PoolConfig) -> Result<Self, PoolError> {
        if config.workers == 0 {
            return Err(PoolError::NoWorkers);
        }

        let (task_tx, task_rx) = bounded(config.queue_capacity);
        let (result_tx, result_rx) = bounded(config.result_capacity);
        let work_delay = config.work_delay();

        let workers = (1..=config.workers)
            .map(|id| {
                let worker = Worker::new(id);
                tokio::spawn(worker.run(task_rx.clone(), result_tx.clone(), work_delay))
            })
            .collect();

        tracing::info!(
            workers = config.workers,
            queue_capacity = config.queue_capacity,
            result_capacity = config.result_capacity,
            "Worker pool started"
        );

        Ok(Self {
            tasks: task_tx,
            results: result_rx,
            workers,
            feeder: None,
            submitted: 0,
            submit_interval: config.submit_interval(),
        })
    }

    /// Number of running workers.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Number of tasks submitted so far.
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Queue `tasks` in iteration order.
    pub fn submit<I>(&mut self, tasks: I)
    where
        I: IntoIterator<Item = Task>,
    {
        let tasks: Vec<Task> = tasks.into_iter().collect();
        self.submitted += tasks.len();

        let sender = self.tasks.clone();
        let previous = self.feeder.take();
        let interval = self.submit_interval;

        self.feeder = Some(tokio::spawn(async move {
            if let Some(previous) = previous {
                previous.await??;
            }

            tracing::info!(count = tasks.len(), "Sending tasks to workers");
            for (i, task) in tasks.into_iter().enumerate() {
                if i > 0 && !interval.is_zero() {
                    tokio::time::sleep(interval).await;
                }
                tracing::info!(task_id = task.id, "Sending task to workers");
                sender
                    .send(task)
                    .await
                    .map_err(|e| PoolError::TaskQueueClosed(e.into_inner().id))?;
            }
            sender.close();
            Ok::<(), PoolError>(())
        }));
    }

    /// Close the task queue and wait for one result per submitted task.
    pub async fn close_and_collect(self) -> Result<Vec<Task>, PoolError> {
        let WorkerPool {
            tasks,
            results,
            workers,
            feeder,
            submitted,
            ..
        } = self;

        // Feeders hold their own handles; the queue closes once they finish.
        tasks.close();

        tracing::info!(expected = submitted, "Collecting results from workers");
        let mut collected = Vec::with_capacity(submitted);
        while collected.len() < submitted {
            match results.recv().await {
                Some(task) => {
                    tracing::info!(task_id = task.id, "Task has been processed by a worker");
                    collected.push(task);
                }
                None => break,
            }
        }

        if let Some(feeder) = feeder {
            feeder.await??;
        }
        for handle in workers {
            handle.await?;
        }

        if collected.len() != submitted {
            return Err(PoolError::Incomplete {
                expected: submitted,
                received: collected.len(),
            });
        }

        tracing::info!(tasks = submitted, "All tasks completed");
        Ok(collected)
    }

    /// Submit `tasks`, then close and collect.
    pub async fn run<I>(mut self, tasks: I) -> Result<Vec<Task>, PoolError>
    where
        I: IntoIterator<Item = Task>,
    {
        self.submit(tasks);
        self.close_and_collect().await
    }
}
