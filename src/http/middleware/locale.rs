//! Locale redirect middleware.
//! Ensures every page request carries a locale prefix before dispatch.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::http::request::{accept_language, cookie_value, request_target, RequestIdExt};
use crate::http::response::{redirect_response, redirect_status};
use crate::observability::metrics;
use crate::routing::{LocaleResolver, RequestDescriptor, Resolution};

/// State required by the locale middleware.
#[derive(Clone)]
pub struct LocaleState {
    pub resolver: Arc<LocaleResolver>,
    pub cookie_name: Arc<str>,
    pub redirect_status: StatusCode,
}

impl LocaleState {
    pub fn new(resolver: Arc<LocaleResolver>, cookie_name: &str, redirect_status_code: u16) -> Self {
        Self {
            resolver,
            cookie_name: Arc::from(cookie_name),
            redirect_status: redirect_status(redirect_status_code),
        }
    }
}

/// Locale carried by the request path, attached to localized requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathLocale(pub String);

pub async fn locale_middleware(
    State(state): State<LocaleState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let resolution = {
        let accept_language = accept_language(req.headers());
        let descriptor = RequestDescriptor {
            target: request_target(req.uri()),
            accept_language: accept_language.as_deref(),
            locale_cookie: cookie_value(req.headers(), &state.cookie_name),
        };
        state.resolver.resolve(&descriptor)
    };

    metrics::record_resolution(&resolution);

    match resolution {
        Resolution::Continue { reason } => {
            tracing::debug!(
                request_id = %req.request_id(),
                path = %req.uri().path(),
                reason = ?reason,
                "Locale resolution: continue"
            );

            let path_locale = state
                .resolver
                .locales()
                .prefix_of(req.uri().path())
                .map(|code| PathLocale(code.to_string()));
            if let Some(locale) = path_locale {
                req.extensions_mut().insert(locale);
            }
            next.run(req).await
        }
        Resolution::Redirect {
            location,
            locale,
            source,
        } => {
            tracing::info!(
                request_id = %req.request_id(),
                path = %req.uri().path(),
                location = %location,
                locale = %locale,
                source = %source,
                "Redirecting to localized path"
            );
            redirect_response(&location, state.redirect_status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExclusionConfig;
    use crate::locale::LocaleSet;
    use crate::routing::ExclusionMatcher;
    use axum::{
        http::header::{ACCEPT_LANGUAGE, COOKIE, LOCATION},
        middleware,
        Router,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        let locales = Arc::new(LocaleSet::new(["en", "es"], "en").unwrap());
        let resolver = Arc::new(LocaleResolver::new(
            locales,
            ExclusionMatcher::from_config(&ExclusionConfig::default()),
        ));
        let state = LocaleState::new(resolver, "NEXT_LOCALE", 307);

        Router::new()
            .fallback(|req: Request<Body>| async move {
                match req.extensions().get::<PathLocale>() {
                    Some(PathLocale(code)) => format!("page:{code}"),
                    None => "passthrough".to_string(),
                }
            })
            .layer(middleware::from_fn_with_state(state, locale_middleware))
    }

    async fn send(request: Request<Body>) -> Response {
        app().oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_redirects_unprefixed_path() {
        let request = Request::builder()
            .uri("/pricing?ref=ad")
            .header(ACCEPT_LANGUAGE, "es-MX,es;q=0.9,en;q=0.8")
            .body(Body::empty())
            .unwrap();

        let response = send(request).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[LOCATION], "/es/pricing?ref=ad");
    }

    #[tokio::test]
    async fn test_cookie_overrides_header() {
        let request = Request::builder()
            .uri("/")
            .header(ACCEPT_LANGUAGE, "es")
            .header(COOKIE, "theme=dark; NEXT_LOCALE=en")
            .body(Body::empty())
            .unwrap();

        let response = send(request).await;
        assert_eq!(response.headers()[LOCATION], "/en");
    }

    #[tokio::test]
    async fn test_localized_path_reaches_handler_with_locale() {
        let request = Request::builder()
            .uri("/es/about")
            .header(COOKIE, "NEXT_LOCALE=en")
            .body(Body::empty())
            .unwrap();

        let response = send(request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "page:es");
    }

    #[tokio::test]
    async fn test_excluded_path_passes_through() {
        for uri in ["/api/places/autocomplete?input=caf", "/_next/static/app.js", "/favicon.ico", "/hero.png"] {
            let request = Request::builder()
                .uri(uri)
                .header(ACCEPT_LANGUAGE, "es")
                .body(Body::empty())
                .unwrap();

            let response = send(request).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(body_text(response).await, "passthrough");
        }
    }

    #[tokio::test]
    async fn test_no_preferences_uses_default() {
        let request = Request::builder().uri("/faq").body(Body::empty()).unwrap();
        let response = send(request).await;
        assert_eq!(response.headers()[LOCATION], "/en/faq");
    }
}
