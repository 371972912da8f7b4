//! Locale-aware request gateway.
//!
//! Resolves the visitor locale for every page request and redirects
//! unprefixed paths to their localized form (`/pricing` → `/en/pricing`).
//! Requests that already carry a locale, or that target assets and API
//! routes, are forwarded to the site origin unchanged.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod locale;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use locale::LocaleSet;
pub use routing::{LocaleResolver, RequestDescriptor, Resolution};
