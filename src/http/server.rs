//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router and its middleware stack
//! - Attach CORS headers to every response
//! - Dispatch requests to preflight, static pages, or the proxy pipeline
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::pages;
use crate::http::proxy::Proxy;
use crate::http::request_id::{make_span, MakeRequestUuidV4, X_REQUEST_ID};
use crate::http::upstream::UpstreamClient;
use crate::observability::metrics;
use crate::routing::{route, Route};
use crate::security::headers::{ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<Proxy>,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
}

impl HttpServer {
    /// Create a server with an upstream client built from configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = UpstreamClient::new(&config.upstream)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a server around an existing upstream client.
    pub fn with_client(config: ProxyConfig, client: UpstreamClient) -> Self {
        let state = AppState {
            proxy: Arc::new(Proxy::new(&config, client)),
        };
        Self {
            router: Self::build_router(state),
            config: Arc::new(config),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new().fallback(dispatch).with_state(state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http().make_span_with(make_span::<Body>))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static(ALLOW_ORIGIN),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static(ALLOW_METHODS),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static(ALLOW_HEADERS),
                )),
        )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let whitelist = &self.config.proxy.whitelist;
        tracing::info!(
            address = %addr,
            size_limit = self.config.proxy.size_limit,
            jsdelivr = self.config.proxy.jsdelivr,
            whitelist_entries = whitelist.len(),
            "HTTP server starting"
        );
        if whitelist.is_empty() {
            tracing::info!("Whitelist disabled, all repositories allowed");
        } else {
            tracing::info!(repositories = ?whitelist, "Whitelist enabled");
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point for every request.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();

    let (response, outcome) = match route(request.method(), request.uri().path()) {
        Route::Preflight => (StatusCode::OK.into_response(), "preflight"),
        Route::Robots => (pages::robots(), "static"),
        Route::Homepage => (pages::homepage(), "static"),
        Route::Proxy => match state.proxy.handle(request).await {
            Ok(response) => (response, "proxied"),
            Err(e) => {
                tracing::warn!(error = %e, detail = ?e, "Proxy request rejected");
                let outcome = e.outcome();
                (e.into_response(), outcome)
            }
        },
    };

    metrics::record_request(&method, response.status().as_u16(), outcome, start);
    response
}
