//! End-to-end tests for the wiki lookup plugin against a mocked wiki API.

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mcwiki::config::{Config, WikiConfig};
use mcwiki::event::{MessageEvent, Scope};
use mcwiki::plugin::wiki::{NO_RESULTS, NO_SUMMARY, TIMED_OUT, USAGE, Wiki};
use mcwiki::{Plugin, Registry};

/// Initializes test logging, if `RUST_LOG` is set.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Returns a configuration pointing at the given mock server, with a short request timeout and no
/// lookup delay.
fn test_config(server: &MockServer) -> Config {
    Config {
        wiki: WikiConfig {
            base_url: server.uri(),
            request_timeout: Duration::from_millis(200),
            lookup_delay: Duration::ZERO,
        },
    }
}

/// Mounts a search response with a single hit titled "Grass Block".
async fn mount_search_hit(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("list", "search"))
        .and(query_param("srsearch", "grass block"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "batchcomplete": "",
                "query": {
                    "searchinfo": { "totalhits": 1 },
                    "search": [
                        {
                            "ns": 0,
                            "title": "Grass Block",
                            "pageid": 1234,
                            "size": 24601,
                            "wordcount": 3210,
                            "snippet": "The <span>grass block</span> is a natural block",
                            "timestamp": "2024-11-02T09:14:00Z"
                        }
                    ]
                }
            })),
        )
        .mount(server)
        .await;
}

/// Mounts an extract response for "Grass Block" with the given page body.
async fn mount_extract(server: &MockServer, page: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("prop", "extracts"))
        .and(query_param("titles", "Grass Block"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "batchcomplete": "",
                "query": { "pages": { "1234": page } }
            })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn ignores_unrelated_messages() {
    init_tracing();
    let plugin = Wiki::new(&Config::default());

    for text in ["hello world", "wikipedia grass", "wiki", "WIKI grass", " wiki grass"] {
        let event = MessageEvent::new(text, Scope::Person);
        let reply = plugin.handle_message(&event).await.unwrap();

        assert!(reply.is_none(), "expected no reply for {text:?}");
    }
}

#[tokio::test]
async fn bare_command_replies_with_usage() {
    init_tracing();
    let plugin = Wiki::new(&Config::default());

    for text in ["wiki ", "wiki    "] {
        let event = MessageEvent::new(text, Scope::Person);
        let reply = plugin.handle_message(&event).await.unwrap().unwrap();

        assert_eq!(reply.text, USAGE);
        assert!(reply.suppress_default);
    }
}

#[tokio::test]
async fn replies_not_found_without_search_hits() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("list", "search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "batchcomplete": "",
            "query": { "searchinfo": { "totalhits": 0 }, "search": [] }
        })))
        .mount(&server)
        .await;

    let plugin = Wiki::new(&test_config(&server));
    let event = MessageEvent::new("wiki slime rancher", Scope::Person);
    let reply = plugin.handle_message(&event).await.unwrap().unwrap();

    assert_eq!(reply.text, NO_RESULTS);
    assert!(reply.suppress_default);
}

#[tokio::test]
async fn replies_with_truncated_summary_and_link() {
    init_tracing();
    let server = MockServer::start().await;
    let extract = "x".repeat(300);

    mount_search_hit(&server).await;
    mount_extract(
        &server,
        serde_json::json!({
            "pageid": 1234,
            "ns": 0,
            "title": "Grass Block",
            "extract": extract
        }),
    )
    .await;

    let plugin = Wiki::new(&test_config(&server));
    let event = MessageEvent::new("wiki grass block", Scope::Person);
    let reply = plugin.handle_message(&event).await.unwrap().unwrap();

    let lines: Vec<&str> = reply.text.lines().collect();
    assert_eq!(lines[0], "Grass Block");
    assert_eq!(lines[1].chars().count(), 251);
    assert!(lines[1].ends_with('…'));
    assert_eq!(lines[2], format!("{}/wiki/Grass_Block", server.uri()));
    assert!(reply.suppress_default);
}

#[tokio::test]
async fn replies_with_link_when_extract_is_missing() {
    init_tracing();
    let server = MockServer::start().await;

    mount_search_hit(&server).await;
    mount_extract(
        &server,
        serde_json::json!({ "pageid": 1234, "ns": 0, "title": "Grass Block" }),
    )
    .await;

    let plugin = Wiki::new(&test_config(&server));
    let event = MessageEvent::new("wiki grass block", Scope::Person);
    let reply = plugin.handle_message(&event).await.unwrap().unwrap();

    let lines: Vec<&str> = reply.text.lines().collect();
    assert_eq!(lines[0], "Grass Block");
    assert_eq!(lines[1], NO_SUMMARY);
    assert_eq!(lines[2], format!("{}/wiki/Grass_Block", server.uri()));
}

#[tokio::test]
async fn replies_timed_out_when_search_times_out() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("list", "search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .set_body_json(serde_json::json!({ "query": { "search": [] } })),
        )
        .mount(&server)
        .await;

    let plugin = Wiki::new(&test_config(&server));
    let event = MessageEvent::new("wiki grass block", Scope::Person);
    let reply = plugin.handle_message(&event).await.unwrap().unwrap();

    assert_eq!(reply.text, TIMED_OUT);
}

#[tokio::test]
async fn replies_timed_out_when_extract_times_out() {
    init_tracing();
    let server = MockServer::start().await;

    mount_search_hit(&server).await;
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("prop", "extracts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .set_body_json(serde_json::json!({ "query": { "pages": {} } })),
        )
        .mount(&server)
        .await;

    let plugin = Wiki::new(&test_config(&server));
    let event = MessageEvent::new("wiki grass block", Scope::Person);
    let reply = plugin.handle_message(&event).await.unwrap().unwrap();

    assert_eq!(reply.text, TIMED_OUT);
}

#[tokio::test]
async fn replies_with_failure_on_server_errors() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api.php"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let plugin = Wiki::new(&test_config(&server));
    let event = MessageEvent::new("wiki grass block", Scope::Person);
    let reply = plugin.handle_message(&event).await.unwrap().unwrap();

    assert!(reply.text.starts_with("Wiki lookup failed:"));
    assert!(reply.suppress_default);
}

#[tokio::test]
async fn registry_dispatches_to_wiki_plugin() {
    init_tracing();
    let server = MockServer::start().await;

    mount_search_hit(&server).await;
    mount_extract(
        &server,
        serde_json::json!({
            "pageid": 1234,
            "ns": 0,
            "title": "Grass Block",
            "extract": "The grass block is a natural block."
        }),
    )
    .await;

    let registry = Registry::preloaded(&test_config(&server));

    let event = MessageEvent::new("wiki grass block", Scope::Group);
    let reply = registry.handle_message(&event).await.unwrap().unwrap();
    assert!(reply.text.contains("The grass block is a natural block."));

    let event = MessageEvent::new("hello world", Scope::Group);
    let reply = registry.handle_message(&event).await.unwrap();
    assert!(reply.is_none());
}
