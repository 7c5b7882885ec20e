//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! pool, probes, dispatcher, HTTP layer
//!     → tracing events with structured fields
//!       (worker_id, task_id, url, status, batch_id, request_id)
//!     → logging.rs subscriber (pretty or JSON on stdout)
//! ```
//!
//! # Design Decisions
//! - Each HTTP request span records the request_id set by the request-id layer
//! - Each probe batch carries its own batch_id

pub mod logging;

pub use logging::init_logging;
