//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the locale table and resolver from config
//! - Create Axum Router with the health probe and origin forwarding
//! - Wire up middleware (request ID, tracing, timeout, locale)
//! - Forward non-redirected requests to the origin
//! - Serve until the shutdown signal fires

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        Request, StatusCode, Uri,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use url::Url;

use crate::config::{validate_config, ConfigError, GatewayConfig, ValidationError};
use crate::http::middleware::{locale_middleware, LocaleState};
use crate::http::request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
use crate::http::response::{bad_gateway, strip_hop_by_hop};
use crate::lifecycle::shutdown;
use crate::locale::LocaleSet;
use crate::observability::metrics;
use crate::routing::{ExclusionMatcher, LocaleResolver};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Client<HttpConnector, Body>,
    pub upstream: Authority,
}

/// HTTP server for the locale gateway.
pub struct HttpServer {
    router: Router,
    resolver: Arc<LocaleResolver>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let locales = LocaleSet::from_config(&config.locales)
            .map_err(|e| ConfigError::Validation(vec![ValidationError::Locales(e)]))?;
        let exclusions = ExclusionMatcher::from_config(&config.exclusions)
            .with_path(config.observability.health_path.as_str());
        let resolver = Arc::new(LocaleResolver::new(Arc::new(locales), exclusions));

        let upstream = upstream_authority(&config.upstream.url)
            .map_err(|e| ConfigError::Validation(vec![e]))?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let locale_state = LocaleState::new(
            resolver.clone(),
            &config.locales.cookie_name,
            config.locales.redirect_status,
        );
        let state = AppState { client, upstream };

        tracing::info!(
            locales = ?resolver.locales().codes(),
            default_locale = %resolver.locales().default_locale(),
            upstream = %state.upstream,
            "Locale gateway configured"
        );

        let router = Self::build_router(&config, state, locale_state);
        Ok(Self { router, resolver })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState, locale_state: LocaleState) -> Router {
        Router::new()
            .route(&config.observability.health_path, get(health_handler))
            .fallback(forward_handler)
            .with_state(state)
            .layer(middleware::from_fn_with_state(locale_state, locale_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// The resolver shared by the middleware.
    pub fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    /// The fully layered router, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections until shutdown fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Parse the configured origin URL into the authority requests are sent to.
fn upstream_authority(url: &str) -> Result<Authority, ValidationError> {
    let invalid = |reason: String| ValidationError::UpstreamUrl(url.to_string(), reason);

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| invalid("missing host".to_string()))?;
    let port = parsed
        .port_or_known_default()
        .ok_or_else(|| invalid("missing port".to_string()))?;

    Authority::from_str(&format!("{host}:{port}")).map_err(|e| invalid(e.to_string()))
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Forward a request to the origin unchanged apart from its URI authority.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();

    let (mut parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(state.upstream.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Cannot build upstream URI");
            return (StatusCode::BAD_REQUEST, "Invalid request URI").into_response();
        }
    };
    strip_hop_by_hop(&mut parts.headers);

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        uri = %parts.uri,
        "Forwarding request to origin"
    );

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            metrics::record_upstream(response.status().as_u16(), start_time);

            let (mut parts, body) = response.into_parts();
            strip_hop_by_hop(&mut parts.headers);
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Upstream error");
            metrics::record_upstream(StatusCode::BAD_GATEWAY.as_u16(), start_time);
            bad_gateway()
        }
    }
}
