//! Bounded worker pool.
//!
//! # Data Flow
//! ```text
//! submit(tasks)
//!     → feeder task (in order, optional pacing)
//!     → task queue (bounded)
//!     → N workers (worker.rs: Idle ↔ Processing → Terminated)
//!     → result queue (bounded)
//!     → close_and_collect (exactly one receive per submitted task)
//! ```
//!
//! # Design Decisions
//! - Tasks never fail: processing is infallible, so the collector's
//!   fixed-count loop always completes
//! - Closing the task queue is the only termination signal workers need
//! - No locks around tasks; ownership moves through the queues

pub mod coordinator;
pub mod task;
pub mod worker;

pub use coordinator::{PoolError, WorkerPool};
pub use task::Task;
pub use worker::{Worker, WorkerState};
