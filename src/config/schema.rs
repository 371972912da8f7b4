//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the locale gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Origin server that receives non-redirected requests.
    pub upstream: UpstreamConfig,

    /// Supported locales and preference sources.
    pub locales: LocaleConfig,

    /// Request paths that bypass locale resolution.
    pub exclusions: ExclusionConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Origin server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the site origin (e.g., "http://127.0.0.1:3000").
    pub url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:3000".to_string(),
        }
    }
}

/// Locale table and preference sources.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Supported locale codes; order is the negotiation tie-break priority.
    pub supported: Vec<String>,

    /// Locale served when no preference can be determined.
    pub default: String,

    /// Cookie holding a sticky locale choice.
    pub cookie_name: String,

    /// Status code used for locale redirects (301, 302, 303, 307, 308).
    pub redirect_status: u16,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: vec!["en".to_string(), "es".to_string()],
            default: "en".to_string(),
            cookie_name: "NEXT_LOCALE".to_string(),
            redirect_status: 307,
        }
    }
}

/// Path classes that are never localized.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// Segment-aware path prefixes (framework assets, API routes).
    pub prefixes: Vec<String>,

    /// Exact paths (e.g., "/favicon.ico").
    pub paths: Vec<String>,

    /// Skip any path whose last segment has a file extension.
    pub skip_file_paths: bool,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            prefixes: vec!["/_next".to_string(), "/api".to_string()],
            paths: vec!["/favicon.ico".to_string()],
            skip_file_paths: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,

    /// Liveness probe path served by the gateway itself.
    pub health_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
            health_path: "/healthz".to_string(),
        }
    }
}
