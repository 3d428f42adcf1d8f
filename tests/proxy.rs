//! End-to-end tests of the proxy pipeline against a mock upstream.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use tower::ServiceExt;

use github_proxy::config::ProxyConfig;
use github_proxy::http::HttpServer;
use github_proxy::Shutdown;

mod common;
use common::{proxied_path, proxy_for, start_mock_upstream, MockResponse};

async fn send(server: &HttpServer, request: Request<Body>) -> Response {
    server.router().oneshot(request).await.unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_cors(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "*");
}

#[tokio::test]
async fn test_relays_small_body() {
    let upstream = start_mock_upstream(|_| {
        MockResponse::ok("hello, world")
            .header("Content-Type", "text/plain")
            .header("ETag", "\"v1\"")
    })
    .await;
    let server = proxy_for(ProxyConfig::default(), upstream.addr);

    let path = proxied_path("raw.githubusercontent.com", "/octo/cat/main/a.txt");
    let response = send(&server, get(&path)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    assert_eq!(response.headers()[header::ETAG], "\"v1\"");
    assert!(response.headers().get("x-request-id").is_some());
    assert_eq!(body_string(response).await, "hello, world");

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(
        requests[0].target,
        "http://raw.githubusercontent.com/octo/cat/main/a.txt"
    );
    assert_eq!(requests[0].header("host"), Some("raw.githubusercontent.com"));
    assert!(requests[0]
        .header("user-agent")
        .unwrap()
        .starts_with("github-proxy/"));
}

#[tokio::test]
async fn test_strips_encoding_headers() {
    let upstream = start_mock_upstream(|_| {
        MockResponse::ok("abc")
            .header("Content-Encoding", "identity")
            .header("X-Upstream", "yes")
    })
    .await;
    let server = proxy_for(ProxyConfig::default(), upstream.addr);

    let path = proxied_path("github.com", "/octo/cat/raw/main/a");
    let response = send(&server, get(&path)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
    assert_eq!(response.headers()["x-upstream"], "yes");
    assert_eq!(body_string(response).await, "abc");
}

#[tokio::test]
async fn test_upstream_status_is_preserved() {
    let upstream = start_mock_upstream(|_| MockResponse {
        status: "404 Not Found",
        ..MockResponse::ok("Not Found")
    })
    .await;
    let server = proxy_for(ProxyConfig::default(), upstream.addr);

    let path = proxied_path("api.github.com", "/repos/octo/missing");
    let response = send(&server, get(&path)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors(&response);
    assert_eq!(body_string(response).await, "Not Found");
}

#[tokio::test]
async fn test_forwards_method_headers_body_and_query() {
    let upstream = start_mock_upstream(|_| MockResponse::ok("created")).await;
    let server = proxy_for(ProxyConfig::default(), upstream.addr);

    let path = proxied_path("api.github.com", "/repos/octo/cat/issues");
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("{path}?per_page=5"))
        .header(header::USER_AGENT, "curl/8.5.0")
        .header(header::AUTHORIZATION, "token secret")
        .header(header::CONTENT_LENGTH, "13")
        .body(Body::from("{\"title\":\"x\"}"))
        .unwrap();
    let response = send(&server, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let requests = upstream.requests();
    let seen = &requests[0];
    assert_eq!(seen.method, "POST");
    assert_eq!(
        seen.target,
        "http://api.github.com/repos/octo/cat/issues?per_page=5"
    );
    assert_eq!(seen.header("user-agent"), Some("curl/8.5.0"));
    assert_eq!(seen.header("authorization"), Some("token secret"));
    assert_eq!(seen.body, b"{\"title\":\"x\"}");
}

#[tokio::test]
async fn test_oversized_response_redirects() {
    let upstream = start_mock_upstream(|_| MockResponse {
        status: "200 OK",
        headers: vec![("Content-Length".into(), "3000000000".into())],
        body: Vec::new(),
    })
    .await;
    let mut config = ProxyConfig::default();
    config.proxy.size_limit = 2_147_483_648;
    let server = proxy_for(config, upstream.addr);

    let path = proxied_path("github.com", "/octo/cat/releases/download/v1/big.bin");
    let response = send(&server, get(&path)).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_cors(&response);
    assert_eq!(
        response.headers()[header::LOCATION],
        "http://github.com/octo/cat/releases/download/v1/big.bin"
    );
    assert!(body_string(response).await.is_empty());
}

#[tokio::test]
async fn test_chunked_response_bypasses_size_limit() {
    let upstream = start_mock_upstream(|_| MockResponse {
        status: "200 OK",
        headers: vec![("Transfer-Encoding".into(), "chunked".into())],
        body: b"5\r\nhello\r\n0\r\n\r\n".to_vec(),
    })
    .await;
    let mut config = ProxyConfig::default();
    config.proxy.size_limit = 1;
    let server = proxy_for(config, upstream.addr);

    let path = proxied_path("raw.githubusercontent.com", "/o/r/main/f");
    let response = send(&server, get(&path)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::TRANSFER_ENCODING).is_none());
    assert_eq!(body_string(response).await, "hello");
}

#[tokio::test]
async fn test_follows_upstream_redirects() {
    let upstream = start_mock_upstream(|req| {
        if req.target == "http://github.com/octo/cat/archive/main.zip" {
            MockResponse {
                status: "302 Found",
                ..MockResponse::ok("")
            }
            .header("Location", "http://codeload.github.com/octo/cat/zip/main")
        } else {
            MockResponse::ok("zipdata")
        }
    })
    .await;
    let server = proxy_for(ProxyConfig::default(), upstream.addr);

    let path = proxied_path("github.com", "/octo/cat/archive/main.zip");
    let response = send(&server, get(&path)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "zipdata");

    let requests = upstream.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].target, "http://codeload.github.com/octo/cat/zip/main");
    assert_eq!(requests[1].header("host"), Some("codeload.github.com"));
}

#[tokio::test]
async fn test_whitelist_enforced_before_forwarding() {
    let upstream = start_mock_upstream(|_| MockResponse::ok("ok")).await;
    let mut config = ProxyConfig::default();
    config.proxy.whitelist = vec!["octo/cat".into()];
    let server = proxy_for(config, upstream.addr);

    let allowed = proxied_path("github.com", "/Octo/Cat/archive/main.zip");
    let response = send(&server, get(&allowed)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let denied = proxied_path("github.com", "/octo/dog/archive/main.zip");
    let response = send(&server, get(&denied)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_cors(&response);
    assert_eq!(body_string(response).await, "Repository not in whitelist");

    assert_eq!(upstream.requests().len(), 1);
}

#[tokio::test]
async fn test_jsdelivr_redirect_skips_git_clients() {
    let upstream = start_mock_upstream(|_| MockResponse::ok("raw")).await;
    let mut config = ProxyConfig::default();
    config.proxy.jsdelivr = true;
    let server = proxy_for(config, upstream.addr);

    let path = proxied_path("raw.githubusercontent.com", "/octo/cat/main/a.txt");
    let response = send(&server, get(&path)).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://cdn.jsdelivr.net/gh/octo/cat@main/a.txt"
    );
    assert!(upstream.requests().is_empty());

    let request = Request::builder()
        .uri(&path)
        .header(header::USER_AGENT, "git/2.43.0")
        .body(Body::empty())
        .unwrap();
    let response = send(&server, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "raw");
}

#[tokio::test]
async fn test_upstream_unreachable_is_bad_gateway() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead = listener.local_addr().unwrap();
    drop(listener);
    let server = proxy_for(ProxyConfig::default(), dead);

    let path = proxied_path("github.com", "/octo/cat");
    let response = send(&server, get(&path)).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_cors(&response);
    assert_eq!(body_string(response).await, "Failed to fetch from target");
}

#[tokio::test]
async fn test_serves_over_tcp_until_shutdown() {
    let upstream = start_mock_upstream(|_| MockResponse::ok("over tcp")).await;
    let server = proxy_for(ProxyConfig::default(), upstream.addr);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let url = format!(
        "http://{addr}{}",
        proxied_path("gist.githubusercontent.com", "/octo/abc/raw/f")
    );
    let response = client.get(url).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "over tcp");

    shutdown.trigger();
    handle.await.unwrap().unwrap();
}
