//! Locale resolution and path rewriting.
//!
//! # Responsibilities
//! - Short-circuit excluded path classes
//! - Detect an existing locale prefix
//! - Pick the visitor locale (cookie → Accept-Language → default)
//! - Compute the redirect target, keeping query and fragment
//!
//! # Design Decisions
//! - Pure and infallible: no I/O, malformed input degrades to the default
//! - Immutable after construction (thread-safe without locks)
//! - A locale already present in the URL wins over every preference source

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::locale::{negotiate, parse_accept_language, prefixed_path, split_target, LocaleSet};
use crate::routing::matcher::ExclusionMatcher;

/// Request-scoped inputs to locale resolution.
#[derive(Debug, Clone, Default)]
pub struct RequestDescriptor<'a> {
    /// Path, optionally followed by `?query` and/or `#fragment`.
    pub target: &'a str,
    /// Raw `Accept-Language` header value.
    pub accept_language: Option<&'a str>,
    /// Value of the locale-preference cookie.
    pub locale_cookie: Option<&'a str>,
}

impl<'a> RequestDescriptor<'a> {
    pub fn new(target: &'a str) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn accept_language(mut self, header: &'a str) -> Self {
        self.accept_language = Some(header);
        self
    }

    pub fn locale_cookie(mut self, value: &'a str) -> Self {
        self.locale_cookie = Some(value);
        self
    }
}

/// Where the chosen locale came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleSource {
    Cookie,
    Header,
    Default,
}

impl LocaleSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocaleSource::Cookie => "cookie",
            LocaleSource::Header => "header",
            LocaleSource::Default => "default",
        }
    }
}

impl fmt::Display for LocaleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a request passes through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinueReason {
    Excluded,
    Localized,
}

impl ContinueReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContinueReason::Excluded => "excluded",
            ContinueReason::Localized => "localized",
        }
    }
}

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// Serve the request as-is.
    Continue { reason: ContinueReason },
    /// Redirect to `location`, which carries exactly one locale prefix.
    Redirect {
        location: String,
        locale: String,
        source: LocaleSource,
    },
}

impl Resolution {
    pub fn is_continue(&self) -> bool {
        matches!(self, Resolution::Continue { .. })
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Resolution::Redirect { location, .. } => Some(location),
            Resolution::Continue { .. } => None,
        }
    }
}

/// Decides, per request, whether a locale redirect is needed.
#[derive(Debug)]
pub struct LocaleResolver {
    locales: Arc<LocaleSet>,
    exclusions: ExclusionMatcher,
}

impl LocaleResolver {
    pub fn new(locales: Arc<LocaleSet>, exclusions: ExclusionMatcher) -> Self {
        Self { locales, exclusions }
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// True when the path bypasses locale handling entirely.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclusions.is_excluded(path)
    }

    /// Resolve the visitor locale from the cookie, then the header, then the default.
    pub fn preferred_locale(
        &self,
        cookie: Option<&str>,
        accept_language: Option<&str>,
    ) -> (&str, LocaleSource) {
        if let Some(code) = cookie.and_then(|c| self.locales.codes().iter().find(|code| *code == c)) {
            return (code.as_str(), LocaleSource::Cookie);
        }

        if let Some(header) = accept_language {
            let ranges = parse_accept_language(header);
            if let Some(code) = negotiate(&ranges, &self.locales) {
                return (code, LocaleSource::Header);
            }
        }

        (self.locales.default_locale(), LocaleSource::Default)
    }

    /// Resolve one request.
    pub fn resolve(&self, request: &RequestDescriptor<'_>) -> Resolution {
        let (path, suffix) = split_target(request.target);

        if self.is_excluded(path) {
            return Resolution::Continue {
                reason: ContinueReason::Excluded,
            };
        }

        if self.locales.prefix_of(path).is_some() {
            return Resolution::Continue {
                reason: ContinueReason::Localized,
            };
        }

        let (locale, source) = self.preferred_locale(request.locale_cookie, request.accept_language);
        let mut location = prefixed_path(locale, path);
        location.push_str(suffix);

        Resolution::Redirect {
            location,
            locale: locale.to_string(),
            source,
        }
    }
}
