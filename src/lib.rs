//! Bounded worker pool and fan-out/fan-in health check service.

// Concurrency core
pub mod health;
pub mod pool;
pub mod queue;

// Serving
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use health::{HealthCheckResult, HealthCheckTarget, HealthChecker, HealthStatus};
pub use http::HttpServer;
pub use pool::{Task, WorkerPool};
