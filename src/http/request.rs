//! Request inspection helpers.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sent none
//! - Extract the inputs locale resolution needs (target, header, cookie)
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Header values that are not visible ASCII are ignored, never rejected

use axum::http::{
    header::{ACCEPT_LANGUAGE, COOKIE},
    HeaderMap, HeaderName, HeaderValue, Request, Uri,
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID set by the request-id layer.
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

/// Path plus query, as seen in the request line.
pub fn request_target(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .filter(|target| target.starts_with('/'))
        .unwrap_or("/")
}

/// All `Accept-Language` values joined into one list.
pub fn accept_language(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(ACCEPT_LANGUAGE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

/// Value of the named cookie across all `Cookie` headers.
pub fn cookie_value<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_target() {
        let uri: Uri = "/pricing?ref=ad".parse().unwrap();
        assert_eq!(request_target(&uri), "/pricing?ref=ad");

        let absolute: Uri = "http://example.com/about".parse().unwrap();
        assert_eq!(request_target(&absolute), "/about");

        let authority: Uri = "example.com:443".parse().unwrap();
        assert_eq!(request_target(&authority), "/");
    }

    #[test]
    fn test_accept_language_joins_values() {
        let mut headers = HeaderMap::new();
        assert_eq!(accept_language(&headers), None);

        headers.append(ACCEPT_LANGUAGE, HeaderValue::from_static("es-MX"));
        headers.append(ACCEPT_LANGUAGE, HeaderValue::from_static("en;q=0.5"));
        assert_eq!(accept_language(&headers).as_deref(), Some("es-MX,en;q=0.5"));
    }

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark; NEXT_LOCALE=es"));
        headers.append(COOKIE, HeaderValue::from_static("session=\"abc\""));

        assert_eq!(cookie_value(&headers, "NEXT_LOCALE"), Some("es"));
        assert_eq!(cookie_value(&headers, "session"), Some("abc"));
        assert_eq!(cookie_value(&headers, "missing"), None);
        assert_eq!(cookie_value(&headers, "LOCALE"), None);
    }

    #[test]
    fn test_make_request_uuid() {
        let request = Request::new(());
        let id = MakeRequestUuid.make_request_id(&request).unwrap();
        let value = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(value).is_ok());
    }

    #[test]
    fn test_request_id_ext() {
        let request = Request::builder()
            .header("x-request-id", "abc-123")
            .body(())
            .unwrap();
        assert_eq!(request.request_id(), "abc-123");
        assert_eq!(Request::new(()).request_id(), "unknown");
    }
}
