//! Cache-coherence tests: re-runs against a populated cache are free

use crate::fixtures::{detail_html, listing_html, test_config};
use gleaner::crawler::Orchestrator;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

/// Every mock expects exactly one request. The second crawl is served
/// entirely from the cache, so exceeding that count fails the test when
/// the server verifies its expectations.
#[tokio::test]
async fn test_second_run_makes_no_network_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(html_response(listing_html(
            &[("/Property/1/EST1/Town", "1 Main St", Some("R 1,000,000"))],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Property/1/EST1/Town"))
        .respond_with(html_response(detail_html("1111", "1 Main Street, Town")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let config = test_config(
        &server.uri(),
        &dir.path().join("cache"),
        &dir.path().join("houses.csv"),
    );

    let first = Orchestrator::from_config(&config).unwrap().crawl().await.unwrap();
    let second = Orchestrator::from_config(&config).unwrap().crawl().await.unwrap();

    assert_eq!(first.records.len(), 1);
    assert_eq!(second.records.len(), 1);
    assert_eq!(
        first.records[0].get("id"),
        second.records[0].get("id"),
        "cached run should reproduce the same records"
    );
}

/// With persistence off, existing cache entries are still honored but no
/// new files are written.
#[tokio::test]
async fn test_read_through_mode_writes_no_files() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(html_response(listing_html(
            &[("/Property/1/EST1/Town", "1 Main St", None)],
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Property/1/EST1/Town"))
        .respond_with(html_response(detail_html("1111", "1 Main Street, Town")))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let cache_root = dir.path().join("cache");
    let mut config = test_config(&server.uri(), &cache_root, &dir.path().join("houses.csv"));
    config.cache.persist = false;

    let report = Orchestrator::from_config(&config).unwrap().crawl().await.unwrap();

    assert_eq!(report.records.len(), 1);
    assert!(report.cache_dir.is_none());
    assert!(!cache_root.exists(), "read-through mode must not create cache files");
}
