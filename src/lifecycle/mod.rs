//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → wait_for_signal resolves
//!     → HttpServer::run stops accepting → in-flight batches drain → exit
//! ```

pub mod signals;

pub use signals::wait_for_signal;
