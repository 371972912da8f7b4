//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the locale table (non-empty, default supported, well-formed codes)
//! - Validate value ranges (timeouts > 0, redirect status is a redirect)
//! - Check addresses and the upstream URL parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::locale::{LocaleError, LocaleSet};

/// Redirect statuses the locale middleware may answer with.
pub const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("locales: {0}")]
    Locales(#[from] LocaleError),

    #[error("locales.cookie_name must not be empty")]
    EmptyCookieName,

    #[error("locales.redirect_status {0} is not a redirect status")]
    RedirectStatus(u16),

    #[error("exclusions: {0:?} must start with '/'")]
    ExclusionPath(String),

    #[error("upstream.url {0:?}: {1}")]
    UpstreamUrl(String, String),

    #[error("{field}: invalid socket address {value:?}")]
    Address { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.health_path {0:?} must start with '/'")]
    HealthPath(String),

    #[error("observability.health_path {0:?} must not contain route pattern characters")]
    HealthPathPattern(String),

    #[error("observability.health_path {0:?} would shadow a localized page")]
    HealthPathShadowsPage(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let locales = match LocaleSet::from_config(&config.locales) {
        Ok(locales) => Some(locales),
        Err(e) => {
            errors.push(ValidationError::Locales(e));
            None
        }
    };
    if config.locales.cookie_name.trim().is_empty() {
        errors.push(ValidationError::EmptyCookieName);
    }
    if !REDIRECT_STATUSES.contains(&config.locales.redirect_status) {
        errors.push(ValidationError::RedirectStatus(config.locales.redirect_status));
    }

    for path in config.exclusions.prefixes.iter().chain(&config.exclusions.paths) {
        if !path.starts_with('/') {
            errors.push(ValidationError::ExclusionPath(path.clone()));
        }
    }

    match Url::parse(&config.upstream.url) {
        Ok(url) if url.scheme() != "http" => errors.push(ValidationError::UpstreamUrl(
            config.upstream.url.clone(),
            format!("unsupported scheme {}", url.scheme()),
        )),
        Ok(url) if url.host_str().is_none() => errors.push(ValidationError::UpstreamUrl(
            config.upstream.url.clone(),
            "missing host".to_string(),
        )),
        // Requests are forwarded with their own path; a base path would be lost.
        Ok(url) if url.path() != "/" || url.query().is_some() || url.fragment().is_some() => {
            errors.push(ValidationError::UpstreamUrl(
                config.upstream.url.clone(),
                "must not carry a path, query or fragment".to_string(),
            ))
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::UpstreamUrl(
            config.upstream.url.clone(),
            e.to_string(),
        )),
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::Address {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::Address {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    let health_path = &config.observability.health_path;
    if !health_path.starts_with('/') {
        errors.push(ValidationError::HealthPath(health_path.clone()));
    } else if health_path.contains(|c: char| matches!(c, '{' | '}' | '*')) {
        errors.push(ValidationError::HealthPathPattern(health_path.clone()));
    } else if health_path == "/"
        || locales.as_ref().is_some_and(|set| set.prefix_of(health_path).is_some())
    {
        errors.push(ValidationError::HealthPathShadowsPage(health_path.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
