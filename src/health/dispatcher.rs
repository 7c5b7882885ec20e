//! Fan-out/fan-in probe dispatcher.
//!
//! # Responsibilities
//! - Launch one concurrent probe per target
//! - Collect exactly one result per target through a queue sized to the batch
//! - Keep the batch complete even if a probe task dies without reporting
//!
//! # Design Decisions
//! - Result queue capacity equals batch size: no probe ever waits on the
//!   collector
//! - Results carry their URL; collection order is completion order

use std::collections::HashMap;
use std::time::Instant;

use uuid::Uuid;

use crate::health::probe::HttpProber;
use crate::health::types::{HealthCheckResult, HealthCheckTarget};
use crate::queue::bounded;

/// Runs batches of probes.
#[derive(Debug, Clone)]
pub struct HealthChecker {
    prober: HttpProber,
}

impl HealthChecker {
    pub fn new(prober: HttpProber) -> Self {
        Self { prober }
    }

    /// Probe every target concurrently and return one result per target.
    ///
    /// Results are in completion order, not input order.
    pub async fn check_all(&self, targets: Vec<HealthCheckTarget>) -> Vec<HealthCheckResult> {
        let batch_id = Uuid::new_v4();
        let started = Instant::now();
        let expected = targets.len();

        tracing::debug!(batch_id = %batch_id, targets = expected, "Dispatching health check batch");

        let (tx, rx) = bounded(expected);
        for target in &targets {
            let tx = tx.clone();
            let prober = self.prober.clone();
            let target = target.clone();
            tokio::spawn(async move {
                let result = prober.probe(&target).await;
                tracing::debug!(batch_id = %batch_id, url = %result.url, status = %result.status, "Probe finished");
                if let Err(e) = tx.send(result).await {
                    tracing::warn!(
                        batch_id = %batch_id,
                        url = %e.into_inner().url,
                        "Collector stopped listening, dropping probe result"
                    );
                }
            });
        }
        tx.close();

        let mut results = rx.recv_exact(expected).await;
        if results.len() < expected {
            tracing::error!(
                batch_id = %batch_id,
                expected,
                received = results.len(),
                "Probe tasks exited without reporting, marking them DOWN"
            );
            backfill_missing(&targets, &mut results);
        }

        let up = results.iter().filter(|r| r.status.is_up()).count();
        tracing::info!(
            batch_id = %batch_id,
            targets = expected,
            up,
            down = expected - up,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Health check batch complete"
        );

        results
    }
}

/// Append a DOWN result for every target without a matching result.
///
/// Duplicate URLs are matched by count.
fn backfill_missing(targets: &[HealthCheckTarget], results: &mut Vec<HealthCheckResult>) {
    let mut reported: HashMap<&str, usize> = HashMap::new();
    for result in results.iter() {
        *reported.entry(result.url.as_str()).or_default() += 1;
    }

    let mut missing = Vec::new();
    for target in targets {
        match reported.get_mut(target.url.as_str()) {
            Some(count) if *count > 0 => *count -= 1,
            _ => missing.push(HealthCheckResult::down(target.url.clone())),
        }
    }
    results.extend(missing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HealthCheckConfig;
    use crate::health::types::HealthStatus;
    use std::time::Duration;

    fn checker() -> HealthChecker {
        let config = HealthCheckConfig {
            use_env_proxy: false,
            ..HealthCheckConfig::default()
        };
        HealthChecker::new(HttpProber::with_timeout(Duration::from_millis(500), &config).unwrap())
    }

    async fn closed_port_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_empty_batch() {
        assert!(checker().check_all(Vec::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_one_result_per_target_including_duplicates() {
        let dead = closed_port_url().await;
        let targets: Vec<HealthCheckTarget> = vec![
            dead.as_str().into(),
            dead.as_str().into(),
            "not a url".into(),
        ];

        let results = checker().check_all(targets).await;
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.status == HealthStatus::Down));
        assert_eq!(results.iter().filter(|r| r.url == dead).count(), 2);
        assert_eq!(results.iter().filter(|r| r.url == "not a url").count(), 1);
    }

    #[test]
    fn test_backfill_adds_only_missing_targets() {
        let targets: Vec<HealthCheckTarget> =
            vec!["http://a".into(), "http://b".into(), "http://a".into()];
        let mut results = vec![HealthCheckResult::up("http://a")];

        backfill_missing(&targets, &mut results);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], HealthCheckResult::up("http://a"));
        assert!(results.contains(&HealthCheckResult::down("http://b")));
        assert!(results.contains(&HealthCheckResult::down("http://a")));
    }

    #[test]
    fn test_backfill_noop_when_complete() {
        let targets: Vec<HealthCheckTarget> = vec!["http://a".into()];
        let mut results = vec![HealthCheckResult::up("http://a")];

        backfill_missing(&targets, &mut results);
        assert_eq!(results, vec![HealthCheckResult::up("http://a")]);
    }
}
