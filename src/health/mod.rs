//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! POST /health-check body
//!     → Vec<HealthCheckTarget> (types.rs)
//!     → dispatcher.rs: one spawned probe per target
//!     → probe.rs: GET with timeout → UP / DOWN
//!     → shared result queue sized to the batch
//!     → collector reads exactly one result per target
//!     → Vec<HealthCheckResult>
//! ```
//!
//! # Design Decisions
//! - Failure becomes data: a broken target yields DOWN, never an error
//! - The batch is always complete, in any order

pub mod dispatcher;
pub mod probe;
pub mod types;

pub use dispatcher::HealthChecker;
pub use probe::HttpProber;
pub use types::{HealthCheckResult, HealthCheckTarget, HealthStatus};
