//! End-to-end crawl tests against a mock HTTP server

use crate::fixtures::{detail_html, listing_html, test_config};
use gleaner::crawler::Orchestrator;
use gleaner::output::{write_csv, Table};
use gleaner::GleanError;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

async fn mount_detail(server: &MockServer, route: &str, listing_number: &str, address: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_response(detail_html(listing_number, address)))
        .mount(server)
        .await;
}

/// Three result pages, two follows allowed, four listings total. Exercises
/// the full pipeline: pagination, JOIN link-following, and CSV output.
#[tokio::test]
async fn test_full_crawl_joins_detail_fields_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/results"))
        .and(query_param("location", "22008"))
        .respond_with(html_response(listing_html(
            &[
                ("/Property/1/EST1/Town", "1 Main St", Some("R 1,000,000")),
                ("/Property/2/EST2/Town", "2 Oak Ave", None),
            ],
            Some("/page2"),
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html_response(listing_html(
            &[("/Property/3/EST3/Town", "3 Elm Rd", Some("R 3,000,000"))],
            Some("/page3"),
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page3"))
        .respond_with(html_response(listing_html(
            &[("/Property/4/EST4/Town", "4 Pine Ln", Some("R 4,000,000"))],
            None,
        )))
        .mount(&server)
        .await;

    mount_detail(&server, "/Property/1/EST1/Town", "1111", "1 Main Street, Town").await;
    mount_detail(&server, "/Property/2/EST2/Town", "2222", "2 Oak Avenue, Town").await;
    mount_detail(&server, "/Property/3/EST3/Town", "3333", "3 Elm Road, Town").await;
    mount_detail(&server, "/Property/4/EST4/Town", "4444", "4 Pine Lane, Town").await;

    let dir = tempdir().unwrap();
    let cache_root = dir.path().join("cache");
    let csv_path = dir.path().join("houses.csv");
    let config = test_config(&server.uri(), &cache_root, &csv_path);

    let report = Orchestrator::from_config(&config).unwrap().crawl().await.unwrap();

    assert_eq!(report.entity, "houses");
    assert_eq!(report.pages_visited, 3);
    assert_eq!(report.records.len(), 4);

    // Parent columns first, then JOIN-merged child columns, in schema order.
    let columns: Vec<&str> = report.records[0].columns().collect();
    assert_eq!(columns, vec!["propertyDetailsLink", "id", "address", "price"]);

    assert_eq!(report.records[0].get("id"), Some("1111"));
    assert_eq!(report.records[0].get("address"), Some("1 Main Street, Town"));
    assert_eq!(report.records[0].get("price"), Some("R 1,000,000"));

    // Second listing has no price on the results page; the column is still
    // present, with an absent value.
    assert!(report.records[1].has_column("price"));
    assert_eq!(report.records[1].get("price"), None);
    assert_eq!(report.records[3].get("id"), Some("4444"));

    // Cache layout: one file per listing page, detail files in a
    // per-page subdirectory named by the URL's identifier segment.
    assert!(cache_root.join("22008_0001.html").is_file());
    assert!(cache_root.join("22008_0002.html").is_file());
    assert!(cache_root.join("22008_0003.html").is_file());
    assert!(cache_root.join("22008_0001").join("EST1.html").is_file());
    assert!(cache_root.join("22008_0001").join("EST2.html").is_file());
    assert!(cache_root.join("22008_0002").join("EST3.html").is_file());

    let table = Table::from_records(&report.records);
    write_csv(&table, &csv_path, "N/A").unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("propertyDetailsLink,id,address,price"));
    let second_row = lines.nth(1).unwrap();
    assert!(second_row.ends_with(",N/A"), "absent price should use the placeholder: {}", second_row);
}

/// The follow cap is an upper bound; a page without a next-page link ends
/// the sequence early without error.
#[tokio::test]
async fn test_pagination_stops_early_when_next_link_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(html_response(listing_html(
            &[("/Property/1/EST1/Town", "1 Main St", None)],
            None,
        )))
        .mount(&server)
        .await;
    mount_detail(&server, "/Property/1/EST1/Town", "1111", "1 Main Street, Town").await;

    let dir = tempdir().unwrap();
    let config = test_config(
        &server.uri(),
        &dir.path().join("cache"),
        &dir.path().join("houses.csv"),
    );

    let report = Orchestrator::from_config(&config).unwrap().crawl().await.unwrap();
    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.records.len(), 1);
}

/// Colliding output columns are rejected when the schema is compiled,
/// before any request is made.
#[tokio::test]
async fn test_ambiguous_columns_rejected_before_any_fetch() {
    let dir = tempdir().unwrap();
    let mut config = test_config(
        "http://127.0.0.1:1",
        &dir.path().join("cache"),
        &dir.path().join("houses.csv"),
    );

    // A detail field reusing the parent link field's name collides after
    // the JOIN merge.
    let mut clashing = config.entity.fields[1].clone();
    clashing.name = "propertyDetailsLink".to_string();
    config.entity.fields[0]
        .follow
        .as_mut()
        .unwrap()
        .fields
        .push(clashing);

    let result = Orchestrator::from_config(&config);
    assert!(matches!(
        result,
        Err(GleanError::ExtractionAmbiguous { field, .. }) if field == "propertyDetailsLink"
    ));
}

/// Under the default skip policy a failing detail link drops that record
/// and the run continues.
#[tokio::test]
async fn test_detail_failure_skip_drops_only_affected_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(html_response(listing_html(
            &[
                ("/Property/1/EST1/Town", "1 Main St", Some("R 1,000,000")),
                ("/Property/2/EST2/Town", "2 Oak Ave", Some("R 2,000,000")),
            ],
            None,
        )))
        .mount(&server)
        .await;
    mount_detail(&server, "/Property/1/EST1/Town", "1111", "1 Main Street, Town").await;
    Mock::given(method("GET"))
        .and(path("/Property/2/EST2/Town"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let config = test_config(
        &server.uri(),
        &dir.path().join("cache"),
        &dir.path().join("houses.csv"),
    );

    let report = Orchestrator::from_config(&config).unwrap().crawl().await.unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].get("id"), Some("1111"));
}

/// The abort policy turns the same failure into a failed run.
#[tokio::test]
async fn test_detail_failure_abort_fails_the_run() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(html_response(listing_html(
            &[("/Property/2/EST2/Town", "2 Oak Ave", None)],
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Property/2/EST2/Town"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let mut config = test_config(
        &server.uri(),
        &dir.path().join("cache"),
        &dir.path().join("houses.csv"),
    );
    config.crawl.detail_failure = gleaner::config::DetailFailureSpec::Abort;

    let result = Orchestrator::from_config(&config).unwrap().crawl().await;
    assert!(matches!(result, Err(GleanError::FetchFailed { .. })));
}
