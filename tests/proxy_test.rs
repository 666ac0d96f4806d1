//! Same-origin relay behavior against a mock upstream.

mod common;

use common::{spawn_app, test_config};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_relay_is_transparent() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"name":"LensKit"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_raw(r#"{"id":"7","name":"LensKit"}"#, "application/json"))
        .expect(1)
        .mount(&upstream)
        .await;

    let mut config = test_config();
    config.data.api_base_url = Some(format!("{}/", upstream.uri()));
    let app = spawn_app(config).await;

    let res = reqwest::Client::new()
        .post(app.url("/api/proxy/projects"))
        .header("content-type", "application/json")
        .body(r#"{"name":"LensKit"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 201);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"id":"7","name":"LensKit"}"#);
}

#[tokio::test]
async fn test_query_and_error_status_pass_through() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/42"))
        .and(query_param("include", "tags"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("missing", "text/plain"))
        .expect(1)
        .mount(&upstream)
        .await;

    let mut config = test_config();
    config.data.api_base_url = Some(upstream.uri());
    let app = spawn_app(config).await;

    let res = reqwest::get(app.url("/api/proxy/projects/42?include=tags")).await.unwrap();

    assert_eq!(res.status().as_u16(), 404);
    assert_eq!(res.headers()["content-type"], "text/plain");
    assert_eq!(res.text().await.unwrap(), "missing");
}

#[tokio::test]
async fn test_missing_content_type_defaults_to_json() {
    let upstream = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/projects/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&upstream)
        .await;

    let mut config = test_config();
    config.data.api_base_url = Some(upstream.uri());
    let app = spawn_app(config).await;

    let res = reqwest::Client::new()
        .delete(app.url("/api/proxy/projects/1"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 204);
    assert_eq!(res.headers()["content-type"], "application/json");
}

#[tokio::test]
async fn test_unconfigured_base_is_500() {
    let app = spawn_app(test_config()).await;

    let res = reqwest::get(app.url("/api/proxy/projects")).await.unwrap();

    assert_eq!(res.status().as_u16(), 500);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "API base not configured" }));
}

#[tokio::test]
async fn test_unreachable_upstream_is_502() {
    let dead = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);

    let mut config = test_config();
    config.data.api_base_url = Some(format!("http://{}", dead_addr));
    let app = spawn_app(config).await;

    let res = reqwest::get(app.url("/api/proxy/projects")).await.unwrap();

    assert_eq!(res.status().as_u16(), 502);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "upstream request failed" }));
}

#[tokio::test]
async fn test_dot_segments_are_refused() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let mut config = test_config();
    config.data.api_base_url = Some(upstream.uri());
    let app = spawn_app(config).await;

    // Raw TCP so the client does not normalize the path first.
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    let mut stream = tokio::net::TcpStream::connect(app.addr).await.unwrap();
    stream
        .write_all(b"GET /api/proxy/projects/../admin HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    assert!(raw.starts_with("HTTP/1.1 400"), "{raw}");
    assert!(raw.contains(r#"{"error":"invalid proxy path"}"#));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .mount(&upstream)
        .await;

    let mut config = test_config();
    config.data.api_base_url = Some(upstream.uri());
    let app = spawn_app(config).await;

    let res = reqwest::Client::new()
        .get(app.url("/api/proxy/projects"))
        .header("x-request-id", "req-123")
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let app = spawn_app(test_config()).await;
    assert!(reqwest::get(app.url("/api/status")).await.unwrap().status().is_success());

    app.shutdown.trigger();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), app.handle)
        .await
        .expect("server should stop after shutdown")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_encoded_dot_segments_cannot_escape_allow_list() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("secret"))
        .expect(0)
        .mount(&upstream)
        .await;

    let mut config = test_config();
    config.data.api_base_url = Some(format!("{}/v1", upstream.uri()));
    config.proxy.allowed_prefixes = vec!["projects".into()];
    let app = spawn_app(config).await;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    for target in ["/api/proxy/projects/%2e%2e/admin", "/api/proxy/projects/%2e%2e/%2E%2E/admin"] {
        let mut stream = tokio::net::TcpStream::connect(app.addr).await.unwrap();
        let request = format!("GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n", target);
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();

        assert!(raw.starts_with("HTTP/1.1 400"), "{target}: {raw}");
        assert!(raw.contains(r#"{"error":"invalid proxy path"}"#));
        assert!(!raw.contains("secret"));
    }
}
