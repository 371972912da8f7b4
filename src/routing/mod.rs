//! Locale routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (target, Accept-Language, cookie)
//!     → matcher.rs (excluded path class?)       → Continue
//!     → LocaleSet::prefix_of (already localized?) → Continue
//!     → resolver.rs (cookie → header → default)
//!     → Redirect(/{locale}{path}{?query}{#fragment})
//!
//! Exclusion compilation (at startup):
//!     ExclusionConfig
//!     → prefix / exact / extension matchers
//!     → Freeze as immutable ExclusionMatcher
//! ```
//!
//! # Design Decisions
//! - Matchers compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always yields the same resolution

pub mod matcher;
pub mod resolver;

pub use matcher::ExclusionMatcher;
pub use resolver::{ContinueReason, LocaleResolver, LocaleSource, RequestDescriptor, Resolution};
