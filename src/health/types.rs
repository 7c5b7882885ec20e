//! Health check request and response types.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// A URL to probe. Serialized as a bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthCheckTarget {
    pub url: String,
}

impl From<String> for HealthCheckTarget {
    fn from(url: String) -> Self {
        Self { url }
    }
}

impl From<&str> for HealthCheckTarget {
    fn from(url: &str) -> Self {
        Self { url: url.to_string() }
    }
}

/// Reachability of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

impl HealthStatus {
    /// 2xx is up, anything else is down.
    pub fn from_http_status(status: StatusCode) -> Self {
        if status.is_success() {
            HealthStatus::Up
        } else {
            HealthStatus::Down
        }
    }

    pub fn is_up(self) -> bool {
        self == HealthStatus::Up
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Up => write!(f, "UP"),
            HealthStatus::Down => write!(f, "DOWN"),
        }
    }
}

/// Outcome of probing one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub url: String,
    pub status: HealthStatus,
}

impl HealthCheckResult {
    pub fn up(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: HealthStatus::Up,
        }
    }

    pub fn down(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: HealthStatus::Down,
        }
    }
}
