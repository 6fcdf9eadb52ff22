//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small torrent series and run the
//! full load, crawl, save cycle against a catalog file on disk.

use infohash_catalog::catalog::{render_catalog, CatalogStore, JsonCatalogStore};
use infohash_catalog::config::Config;
use infohash_catalog::crawler::{update_catalog, Termination};
use infohash_catalog::{Catalog, CatalogError, Fingerprint, GroupId};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FP_0: &str = "8aa9d3c65b0164d222d9b2527a70f125668575ef";
const FP_1: &str = "8735bc81a02bef7c11331ed986315f613a960917";
const FP_2: &str = "b95ee98a7cfa1a67cbaaad219dff461db961b119";

/// Metainfo blob whose info dictionary is `d6:lengthi{n}e4:name1:{name}e`
fn torrent(length: u8, name: char) -> Vec<u8> {
    format!("d8:announce14:http://tracker4:infod6:lengthi{length}e4:name1:{name}ee").into_bytes()
}

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, max_group: u32) -> Config {
    let mut config = Config::default();
    config.source.url_template = format!("{}/sm_{{group}}.torrent", base_url);
    config.source.max_group = max_group;
    config.source.timeout_secs = 5;
    config.source.connect_timeout_secs = 5;
    config.user_agent.name = "TestBot".to_string();
    config.user_agent.version = "1.0".to_string();
    config
}

fn fp(hex: &str) -> Fingerprint {
    hex.parse().unwrap()
}

async fn mount_archive(server: &MockServer, group: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("/sm_{}.torrent", group)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_from_empty_catalog_until_end_of_series() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let store = JsonCatalogStore::new(temp_dir.path().join("torrents.json"));

    mount_archive(&mock_server, "000", torrent(1, 'a')).await;
    mount_archive(&mock_server, "001", torrent(2, 'b')).await;
    // Group 002 is unmatched, so wiremock answers 404

    let config = create_test_config(&mock_server.uri(), 999);
    let termination = update_catalog(&config, &store).await.unwrap();

    assert_eq!(termination, Termination::EndOfSeries(GroupId(2)));

    let content = std::fs::read_to_string(store.path()).unwrap();
    let expected = format!("{{\n  \"0\": \"{}\",\n  \"1\": \"{}\"\n}}\n", FP_0, FP_1);
    assert_eq!(content, expected);

    let requests = mock_server.received_requests().await.unwrap();
    let paths: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(
        paths,
        vec!["/sm_000.torrent", "/sm_001.torrent", "/sm_002.torrent"]
    );
}

#[tokio::test]
async fn test_resume_after_last_cataloged_group() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let store = JsonCatalogStore::new(temp_dir.path().join("torrents.json"));

    let existing: Catalog = [(GroupId(0), fp(FP_0)), (GroupId(1), fp(FP_1))]
        .into_iter()
        .collect();
    store.save(&existing).unwrap();

    mount_archive(&mock_server, "002", torrent(3, 'c')).await;

    let config = create_test_config(&mock_server.uri(), 999);
    let termination = update_catalog(&config, &store).await.unwrap();
    assert_eq!(termination, Termination::EndOfSeries(GroupId(3)));

    let catalog = store.load().unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.get(GroupId(2)), Some(&fp(FP_2)));

    // Groups 000 and 001 are never re-fetched
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.path(), "/sm_002.torrent");
}

#[tokio::test]
async fn test_transport_error_keeps_catalog() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let store = JsonCatalogStore::new(temp_dir.path().join("torrents.json"));

    let existing: Catalog = [(GroupId(0), fp(FP_0))].into_iter().collect();
    store.save(&existing).unwrap();
    let before = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(before, render_catalog(&existing).unwrap());

    Mock::given(method("GET"))
        .and(path("/sm_001.torrent"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 999);
    let result = update_catalog(&config, &store).await;

    match result {
        Err(CatalogError::Transport { group, .. }) => assert_eq!(group, GroupId(1)),
        other => panic!("expected transport error, got {:?}", other),
    }

    let after = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_partial_progress_saved_on_failure() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let store = JsonCatalogStore::new(temp_dir.path().join("torrents.json"));

    mount_archive(&mock_server, "000", torrent(1, 'a')).await;
    Mock::given(method("GET"))
        .and(path("/sm_001.torrent"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 999);
    let result = update_catalog(&config, &store).await;
    assert!(matches!(result, Err(CatalogError::Transport { .. })));

    let catalog = store.load().unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(GroupId(0)), Some(&fp(FP_0)));
    assert!(!catalog.contains(GroupId(1)));
}

#[tokio::test]
async fn test_malformed_archive_is_fatal() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let store = JsonCatalogStore::new(temp_dir.path().join("torrents.json"));

    mount_archive(&mock_server, "000", torrent(1, 'a')).await;
    mount_archive(&mock_server, "001", b"<html>not a torrent</html>".to_vec()).await;

    let config = create_test_config(&mock_server.uri(), 999);
    let result = update_catalog(&config, &store).await;

    match result {
        Err(CatalogError::Decode { group, .. }) => assert_eq!(group, GroupId(1)),
        other => panic!("expected decode error, got {:?}", other),
    }

    // No request for 002 after the failure
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let catalog = store.load().unwrap();
    assert_eq!(catalog.len(), 1);
}

#[tokio::test]
async fn test_bound_reached_stops_without_further_fetches() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let store = JsonCatalogStore::new(temp_dir.path().join("torrents.json"));

    let existing: Catalog = [(GroupId(0), fp(FP_0)), (GroupId(1), fp(FP_1))]
        .into_iter()
        .collect();
    store.save(&existing).unwrap();

    mount_archive(&mock_server, "002", torrent(3, 'c')).await;
    Mock::given(method("GET"))
        .and(path("/sm_003.torrent"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(torrent(4, 'd')))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 2);
    let termination = update_catalog(&config, &store).await.unwrap();
    assert_eq!(termination, Termination::BoundReached(GroupId(2)));

    let catalog = store.load().unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.get(GroupId(2)), Some(&fp(FP_2)));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_complete_catalog_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let store = JsonCatalogStore::new(temp_dir.path().join("torrents.json"));

    let existing: Catalog = [(GroupId(0), fp(FP_0)), (GroupId(1), fp(FP_1))]
        .into_iter()
        .collect();
    store.save(&existing).unwrap();

    let config = create_test_config(&mock_server.uri(), 1);
    let termination = update_catalog(&config, &store).await.unwrap();
    assert_eq!(termination, Termination::AlreadyComplete);

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty());
    assert_eq!(store.load().unwrap(), existing);
}

#[tokio::test]
async fn test_fingerprint_ignores_key_order_and_outer_fields() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let store = JsonCatalogStore::new(temp_dir.path().join("torrents.json"));

    // Unsorted info keys and a different announce URL still hash to FP_0
    let blob = b"d4:infod4:name1:a6:lengthi1ee8:announce9:elsewheree".to_vec();
    mount_archive(&mock_server, "000", blob).await;

    let config = create_test_config(&mock_server.uri(), 999);
    update_catalog(&config, &store).await.unwrap();

    let catalog = store.load().unwrap();
    assert_eq!(catalog.get(GroupId(0)), Some(&fp(FP_0)));
}

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let store = JsonCatalogStore::new(temp_dir.path().join("torrents.json"));

    Mock::given(method("GET"))
        .and(path("/sm_000.torrent"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(torrent(1, 'a')))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 999);
    let termination = update_catalog(&config, &store).await.unwrap();
    assert_eq!(termination, Termination::EndOfSeries(GroupId(1)));
}

#[tokio::test]
async fn test_range_placeholders_in_template() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let store = JsonCatalogStore::new(temp_dir.path().join("torrents.json"));

    Mock::given(method("GET"))
        .and(path("/sm_00000000-00099999.torrent"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(torrent(1, 'a')))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), 999);
    config.source.url_template = format!("{}/sm_{{start}}-{{end}}.torrent", mock_server.uri());

    update_catalog(&config, &store).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[1].url.path(), "/sm_00100000-00199999.torrent");
}
