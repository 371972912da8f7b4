//! Response construction.
//!
//! # Responsibilities
//! - Build locale redirect responses
//! - Strip hop-by-hop headers from forwarded messages
//! - Map origin failures to gateway status codes
//!
//! # Design Decisions
//! - Redirects carry `Vary: Accept-Language, Cookie` so shared caches
//!   never serve one visitor's redirect to another
//! - Redirect bodies are empty

use axum::{
    body::Body,
    http::{
        header::{self, HeaderName},
        HeaderMap, HeaderValue, Response, StatusCode,
    },
    response::IntoResponse,
};

const VARY_LOCALE: &str = "Accept-Language, Cookie";

/// Headers meaningful only for a single transport hop (RFC 9110 §7.6.1).
const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("proxy-connection"),
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Convert a configured status code into a redirect status.
///
/// Anything that is not a 3xx falls back to 307 Temporary Redirect.
pub fn redirect_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code)
        .ok()
        .filter(StatusCode::is_redirection)
        .unwrap_or(StatusCode::TEMPORARY_REDIRECT)
}

/// Build a redirect to `location`.
pub fn redirect_response(location: &str, status: StatusCode) -> Response<Body> {
    let location = match HeaderValue::from_str(location) {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(location = %location, "Redirect target is not a valid header value");
            return (StatusCode::BAD_REQUEST, "Invalid request path").into_response();
        }
    };

    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response.headers_mut().insert(header::LOCATION, location);
    response
        .headers_mut()
        .insert(header::VARY, HeaderValue::from_static(VARY_LOCALE));
    response
}

/// Remove hop-by-hop headers, including any named by `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let named: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in named.iter().chain(HOP_BY_HOP.iter()) {
        headers.remove(name);
    }
}

/// Response sent when the origin cannot be reached.
pub fn bad_gateway() -> Response<Body> {
    (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
}
