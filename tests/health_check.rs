//! End-to-end tests for `POST /health-check`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use fanout::config::{validate_config, AppConfig};
use fanout::{HealthCheckResult, HealthStatus};
use reqwest::StatusCode;

mod common;

fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.health_check.timeout_secs = 1;
    config
}

async fn check(addr: std::net::SocketAddr, body: String) -> reqwest::Response {
    common::client()
        .post(format!("http://{}/health-check", addr))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .expect("server unreachable")
}

#[tokio::test]
async fn test_up_and_timed_out_targets() {
    let up = common::start_mock_backend(200).await;
    let silent = common::start_silent_backend().await;
    let (server, shutdown) = common::start_server(fast_config()).await;

    let up_url = format!("http://{}/", up);
    let down_url = format!("http://{}/", silent);
    let body = serde_json::to_string(&[&up_url, &down_url]).unwrap();

    let res = check(server, body).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "application/json"
    );

    let results: Vec<HealthCheckResult> = res.json().await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.contains(&HealthCheckResult::up(up_url)));
    assert!(results.contains(&HealthCheckResult::down(down_url)));

    shutdown.trigger();
}

#[tokio::test]
async fn test_status_classification() {
    let ok = common::start_mock_backend(200).await;
    let no_content = common::start_mock_backend(204).await;
    let failing = common::start_mock_backend(500).await;
    let missing = common::start_mock_backend(404).await;
    let refused = common::closed_addr().await;
    let (server, shutdown) = common::start_server(fast_config()).await;

    let cases = [
        (format!("http://{}/", ok), HealthStatus::Up),
        (format!("http://{}/", no_content), HealthStatus::Up),
        (format!("http://{}/", failing), HealthStatus::Down),
        (format!("http://{}/", missing), HealthStatus::Down),
        (format!("http://{}/", refused), HealthStatus::Down),
    ];
    let urls: Vec<&String> = cases.iter().map(|(url, _)| url).collect();

    let res = check(server, serde_json::to_string(&urls).unwrap()).await;
    let results: Vec<HealthCheckResult> = res.json().await.unwrap();

    assert_eq!(results.len(), cases.len());
    for (url, expected) in &cases {
        let result = results.iter().find(|r| &r.url == url).unwrap();
        assert_eq!(result.status, *expected, "url: {}", url);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_body_dispatches_nothing() {
    let hits = Arc::new(AtomicU32::new(0));
    let h = hits.clone();
    let backend = common::start_programmable_backend(move || {
        let h = h.clone();
        async move {
            h.fetch_add(1, Ordering::SeqCst);
            200
        }
    })
    .await;
    let (server, shutdown) = common::start_server(fast_config()).await;

    // Truncated array that still names the backend.
    let body = format!("[\"http://{}/\"", backend);
    let res = check(server, body).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "Invalid request");

    let res = check(server, "not-json".to_string()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_probes_run_concurrently() {
    let slow = common::start_programmable_backend(|| async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        200
    })
    .await;
    let (server, shutdown) = common::start_server(fast_config()).await;

    let urls: Vec<String> = (0..10).map(|i| format!("http://{}/{}", slow, i)).collect();

    let started = Instant::now();
    let res = check(server, serde_json::to_string(&urls).unwrap()).await;
    let results: Vec<HealthCheckResult> = res.json().await.unwrap();

    assert_eq!(results.len(), 10);
    assert!(results.iter().all(|r| r.status == HealthStatus::Up));
    // Ten 300ms probes one after another would take 3s.
    assert!(started.elapsed() < Duration::from_millis(1500));

    let returned: HashSet<&String> = results.iter().map(|r| &r.url).collect();
    let expected: HashSet<&String> = urls.iter().collect();
    assert_eq!(returned, expected);

    shutdown.trigger();
}

#[tokio::test]
async fn test_repeated_batches_classify_the_same() {
    let up = common::start_mock_backend(200).await;
    let down = common::start_mock_backend(503).await;
    let (server, shutdown) = common::start_server(fast_config()).await;

    let urls = [format!("http://{}/", up), format!("http://{}/", down)];
    let body = serde_json::to_string(&urls).unwrap();

    let mut runs = Vec::new();
    for _ in 0..3 {
        let res = check(server, body.clone()).await;
        let mut results: Vec<HealthCheckResult> = res.json().await.unwrap();
        results.sort_by(|a, b| a.url.cmp(&b.url));
        runs.push(results);
    }
    assert!(runs.windows(2).all(|w| w[0] == w[1]));

    shutdown.trigger();
}

#[tokio::test]
async fn test_empty_batch() {
    let (server, shutdown) = common::start_server(fast_config()).await;

    let res = check(server, "[]".to_string()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "[]");

    shutdown.trigger();
}

#[tokio::test]
async fn test_short_request_timeout_still_reports_down() {
    let silent = common::start_silent_backend().await;
    let mut config = fast_config();
    config.timeouts.request_secs = 2;
    assert_eq!(validate_config(&config), Ok(()));
    let (server, shutdown) = common::start_server(config).await;

    let url = format!("http://{}/", silent);
    let res = check(server, serde_json::to_string(&[&url]).unwrap()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let results: Vec<HealthCheckResult> = res.json().await.unwrap();
    assert_eq!(results, vec![HealthCheckResult::down(url)]);

    shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_drains_in_flight_batch() {
    let slow = common::start_programmable_backend(|| async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        200
    })
    .await;
    let (server, shutdown) = common::start_server(fast_config()).await;

    let url = format!("http://{}/", slow);
    let body = serde_json::to_string(&[&url]).unwrap();
    let in_flight = tokio::spawn(async move {
        let res = check(server, body).await;
        let status = res.status();
        let results: Vec<HealthCheckResult> = res.json().await.unwrap();
        (status, results)
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    tokio::time::timeout(Duration::from_secs(5), shutdown.stop())
        .await
        .expect("server did not drain")
        .unwrap();

    let (status, results) = in_flight.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results, vec![HealthCheckResult::up(url)]);
}
