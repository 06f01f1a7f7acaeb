//! End-to-end tests: real gateway, real sockets, mock upstream.

use std::time::Duration;

use reqwest::StatusCode;
use tokio::net::TcpListener;

use passthrough_gateway::config::GatewayConfig;

mod common;

const POSTS: &str = r#"[{"userId": 1, "id": 1, "title": "sunt aut facere"}, {"userId": 1, "id": 2, "title": "qui est esse"}]"#;
const TODO: &str = r#"{"userId": 1, "id": 1, "title": "delectus aut autem", "completed": false}"#;
const PHOTOS: &str = r#"[{"albumId": 1, "id": 1, "url": "https://via.placeholder.com/600/92c952"}]"#;

#[tokio::test]
async fn test_routes_relay_upstream_bodies() {
    let upstream = common::start_upstream(|path| async move {
        match path.as_str() {
            "/posts" => (200, POSTS.to_string()),
            "/todos/1" => (200, TODO.to_string()),
            "/photos" => (200, PHOTOS.to_string()),
            _ => (404, "{}".to_string()),
        }
    })
    .await;
    let gateway = common::start_gateway(common::config_for(&upstream)).await;
    let client = common::client();

    let res = client.get(gateway.url("/api/posts")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert!(res.headers().contains_key("x-request-id"));
    let records: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["title"], "qui est esse");

    let res = client.get(gateway.url("/api/todo")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), TODO);

    let res = client.get(gateway.url("/api/photos")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), PHOTOS);

    assert_eq!(upstream.hits(), ["/posts", "/todos/1", "/photos"]);
    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_todo_relays_non_json_text() {
    let upstream = common::start_upstream(|_| async { (200, "buy milk".to_string()) }).await;
    let gateway = common::start_gateway(common::config_for(&upstream)).await;

    let res = common::client().get(gateway.url("/api/todo")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/plain; charset=utf-8");
    assert_eq!(res.text().await.unwrap(), "buy milk");

    assert_eq!(upstream.hits(), ["/todos/1"]);
    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_one_upstream_call_per_request() {
    let upstream = common::start_upstream(|_| async { (200, "[]".to_string()) }).await;
    let gateway = common::start_gateway(common::config_for(&upstream)).await;

    let res = common::client().get(gateway.url("/api/posts?page=2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "[]");

    assert_eq!(upstream.hits(), ["/posts"]);
    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_route_is_404_without_upstream_call() {
    let upstream = common::start_upstream(|_| async { (200, "[]".to_string()) }).await;
    let gateway = common::start_gateway(common::config_for(&upstream)).await;

    let res = common::client().get(gateway.url("/api/users")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "no route for '/api/users'");

    assert!(upstream.hits().is_empty());
    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_500_maps_to_502() {
    let upstream = common::start_upstream(|_| async { (500, "database on fire".to_string()) }).await;
    let gateway = common::start_gateway(common::config_for(&upstream)).await;

    let res = common::client().get(gateway.url("/api/todo")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body = res.text().await.unwrap();
    assert!(body.contains("500"), "body: {}", body);
    assert!(body.contains("database on fire"), "body: {}", body);

    assert_eq!(upstream.hits().len(), 1, "a failed call must not be retried");
    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_slow_upstream_maps_to_504() {
    let upstream = common::start_upstream(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, "[]".to_string())
    })
    .await;

    let mut config = common::config_for(&upstream);
    config.timeouts.upstream_ms = 200;
    config.timeouts.request_secs = 5;
    let gateway = common::start_gateway(config).await;

    let started = std::time::Instant::now();
    let res = common::client().get(gateway.url("/api/posts")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(res.text().await.unwrap(), "upstream did not respond within 200ms");
    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_maps_to_502() {
    // Bind then drop to get a port nothing listens on.
    let dead = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();

    let mut config = GatewayConfig::default();
    config.upstream.base_url = format!("http://{}", dead);
    config.upstream.system_proxy = false;
    let gateway = common::start_gateway(config).await;

    let res = common::client().get(gateway.url("/api/photos")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert!(res.text().await.unwrap().starts_with("upstream unreachable"));
    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_shape_mismatch_maps_to_502() {
    let upstream = common::start_upstream(|_| async { (200, "<html>maintenance</html>".to_string()) }).await;
    let gateway = common::start_gateway(common::config_for(&upstream)).await;

    let res = common::client().get(gateway.url("/api/posts")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert!(res.text().await.unwrap().contains("not a valid collection"));
    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown_stops_server() {
    let upstream = common::start_upstream(|_| async { (200, "[]".to_string()) }).await;
    let gateway = common::start_gateway(common::config_for(&upstream)).await;

    let res = common::client().get(gateway.url("/healthz")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "ok");

    gateway.shutdown.trigger();
    let joined = tokio::time::timeout(Duration::from_secs(5), gateway.handle).await;
    assert!(matches!(joined, Ok(Ok(Ok(())))));
}
