//! Single-target HTTP probe.
//!
//! # Responsibilities
//! - Issue one GET per target, bounded by a fixed timeout
//! - Classify the outcome as UP or DOWN
//!
//! # Design Decisions
//! - Every failure (timeout, refused, DNS, bad URL, non-2xx) becomes DOWN;
//!   nothing is propagated to the caller
//! - No retries: each probe attempts exactly once

use std::time::Duration;

use tokio::time;

use crate::config::HealthCheckConfig;
use crate::health::types::{HealthCheckResult, HealthCheckTarget, HealthStatus};

/// HTTP prober shared by all probes of a batch.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProber {
    /// Build a prober from configuration.
    pub fn new(config: &HealthCheckConfig) -> Result<Self, reqwest::Error> {
        Self::with_timeout(config.timeout(), config)
    }

    /// Build a prober with a timeout finer than the config's whole seconds.
    pub fn with_timeout(
        timeout: Duration,
        config: &HealthCheckConfig,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe `target` once and classify it.
    pub async fn probe(&self, target: &HealthCheckTarget) -> HealthCheckResult {
        let url = &target.url;
        let response_future = self.client.get(url).send();

        let status = match time::timeout(self.timeout, response_future).await {
            Ok(Ok(response)) => {
                let status = HealthStatus::from_http_status(response.status());
                if !status.is_up() {
                    tracing::warn!(url = %url, status = %response.status(), "Health check failed: non-success status");
                }
                status
            }
            Ok(Err(e)) => {
                tracing::warn!(url = %url, error = %e, "Health check failed: request error");
                HealthStatus::Down
            }
            Err(_) => {
                tracing::warn!(url = %url, timeout = ?self.timeout, "Health check failed: timeout");
                HealthStatus::Down
            }
        };

        HealthCheckResult {
            url: url.clone(),
            status,
        }
    }
}
