//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → LocaleSet / ExclusionMatcher built once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the locale table is fixed for the
//!   lifetime of the process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::ExclusionConfig;
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::LocaleConfig;
pub use schema::ObservabilityConfig;
pub use schema::UpstreamConfig;
pub use validation::{validate_config, ValidationError};
