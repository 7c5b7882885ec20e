//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts, capacities and worker counts > 0)
//! - Keep the request timeout above the probe timeout, so a batch with a
//!   silent target still answers with DOWN instead of a 408
//! - Validate the bind address and log filter directive
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::AppConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error(
        "timeouts.request_secs ({request_secs}) must exceed health_check.timeout_secs ({probe_secs})"
    )]
    RequestTimeoutTooShort { request_secs: u64, probe_secs: u64 },

    #[error("observability.log_level `{0}` is not a valid filter directive")]
    InvalidLogLevel(String),
}

/// Check every semantic rule and report all violations.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let request_secs = config.timeouts.request_secs;
    let probe_secs = config.health_check.timeout_secs;
    for (field, value) in [
        ("timeouts.request_secs", request_secs),
        ("health_check.timeout_secs", probe_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::Zero { field });
        }
    }
    if request_secs != 0 && request_secs <= probe_secs {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs,
            probe_secs,
        });
    }

    let positive = [
        ("pool.workers", config.pool.workers),
        ("pool.queue_capacity", config.pool.queue_capacity),
        ("pool.result_capacity", config.pool.result_capacity),
        ("security.max_body_size", config.security.max_body_size),
    ];
    for (field, value) in positive {
        if value == 0 {
            errors.push(ValidationError::Zero { field });
        }
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
