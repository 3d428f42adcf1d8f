//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use github_proxy::config::ProxyConfig;
use github_proxy::http::{HttpServer, UpstreamClient};

/// A request as seen by the mock upstream. Requests arrive through it as a
/// forward proxy, so `target` is in absolute form.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What the mock upstream sends back: status line, raw headers, raw body.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: &'static str,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl MockResponse {
    /// A response with an accurate `Content-Length`.
    pub fn ok(body: &str) -> Self {
        Self {
            status: "200 OK",
            headers: vec![("Content-Length".into(), body.len().to_string())],
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a programmable mock upstream on an ephemeral port.
pub async fn start_mock_upstream<F>(respond: F) -> MockUpstream
where
    F: Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);

    let recorded = requests.clone();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let respond = respond.clone();
            let recorded = recorded.clone();
            tokio::spawn(async move {
                let mut reader = BufReader::new(socket);
                let Some(request) = read_request(&mut reader).await else {
                    return;
                };
                let response = respond(&request);
                recorded.lock().unwrap().push(request);

                let mut head = format!("HTTP/1.1 {}\r\n", response.status);
                for (k, v) in &response.headers {
                    head.push_str(&format!("{k}: {v}\r\n"));
                }
                head.push_str("Connection: close\r\n\r\n");

                let socket = reader.get_mut();
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&response.body).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    MockUpstream { addr, requests }
}

async fn read_request(reader: &mut BufReader<tokio::net::TcpStream>) -> Option<RecordedRequest> {
    let mut line = String::new();
    reader.read_line(&mut line).await.ok()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).await.ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        let (k, v) = line.split_once(':')?;
        headers.push((k.trim().to_string(), v.trim().to_string()));
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).await.ok()?;

    Some(RecordedRequest {
        method,
        target,
        headers,
        body,
    })
}

/// Build a proxy server whose upstream client sends every plain-HTTP
/// request through `upstream` as its outbound proxy.
pub fn proxy_for(config: ProxyConfig, upstream: SocketAddr) -> HttpServer {
    let outbound = reqwest::Proxy::http(format!("http://{upstream}")).unwrap();
    let client = UpstreamClient::builder(&config.upstream)
        .no_proxy()
        .proxy(outbound)
        .build()
        .unwrap();
    HttpServer::with_client(config, UpstreamClient::from_client(client))
}

/// Path that makes the proxy target `host` over plain HTTP.
pub fn proxied_path(host: &str, path: &str) -> String {
    format!("/http://{host}{path}")
}
