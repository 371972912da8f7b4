//! Path exclusion matching.
//!
//! # Responsibilities
//! - Match segment-aware path prefixes (`/_next`, `/api`)
//! - Match exact paths (`/favicon.ico`)
//! - Detect static-file paths by their extension
//! - Combine matchers with OR semantics
//!
//! # Design Decisions
//! - Matching is case-sensitive, like the paths the site serves
//! - Matchers only see the path; query and fragment are stripped first
//! - No regex to guarantee O(n) matching

use crate::config::ExclusionConfig;

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches a path prefix on segment boundaries.
///
/// `/api` matches `/api` and `/api/places` but not `/apiary`.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher. A trailing `/` is ignored.
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        while prefix.len() > 1 && prefix.ends_with('/') {
            prefix.pop();
        }
        Self { prefix }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        if self.prefix == "/" {
            return true;
        }
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Matches one exact path.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        path == self.path
    }
}

/// Matches paths whose last segment carries a file extension
/// (`/logo.png`, `/robots.txt`).
#[derive(Debug, Clone, Default)]
pub struct FileExtensionMatcher;

impl Matcher for FileExtensionMatcher {
    fn matches(&self, path: &str) -> bool {
        let last = path.rsplit('/').next().unwrap_or(path);
        match last.rfind('.') {
            Some(idx) => idx + 1 < last.len(),
            None => false,
        }
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug, Default)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}

/// The set of path classes that bypass locale resolution.
#[derive(Debug, Default)]
pub struct ExclusionMatcher {
    inner: AnyMatcher,
}

impl ExclusionMatcher {
    /// Compile the `[exclusions]` config table.
    pub fn from_config(config: &ExclusionConfig) -> Self {
        let mut matchers: Vec<Box<dyn Matcher>> = Vec::new();

        for prefix in &config.prefixes {
            matchers.push(Box::new(PathPrefixMatcher::new(prefix.as_str())));
        }
        for path in &config.paths {
            matchers.push(Box::new(ExactPathMatcher::new(path.as_str())));
        }
        if config.skip_file_paths {
            matchers.push(Box::new(FileExtensionMatcher));
        }

        Self {
            inner: AnyMatcher::new(matchers),
        }
    }

    /// Add one more exact path (e.g., the gateway's own health probe).
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.inner.matchers.push(Box::new(ExactPathMatcher::new(path)));
        self
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.inner.matches(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_prefix_matcher() {
        let matcher = PathPrefixMatcher::new("/api");
        assert!(matcher.matches("/api"));
        assert!(matcher.matches("/api/places/autocomplete"));
        assert!(!matcher.matches("/apiary"));
        assert!(!matcher.matches("/en/api"));

        let trailing = PathPrefixMatcher::new("/_next/");
        assert!(trailing.matches("/_next/static/chunk.js"));
    }

    #[test]
    fn test_exact_path_matcher() {
        let matcher = ExactPathMatcher::new("/favicon.ico");
        assert!(matcher.matches("/favicon.ico"));
        assert!(!matcher.matches("/favicon.ico/x"));
    }

    #[test]
    fn test_file_extension_matcher() {
        let matcher = FileExtensionMatcher;
        assert!(matcher.matches("/logo.png"));
        assert!(matcher.matches("/images/hero.webp"));
        assert!(matcher.matches("/robots.txt"));
        assert!(!matcher.matches("/pricing"));
        assert!(!matcher.matches("/v1.2/docs"));
        assert!(!matcher.matches("/trailing."));
        assert!(!matcher.matches("/"));
    }

    #[test]
    fn test_exclusion_matcher_defaults() {
        let exclusions = ExclusionMatcher::from_config(&ExclusionConfig::default());
        assert!(exclusions.is_excluded("/_next/static/css/app.css"));
        assert!(exclusions.is_excluded("/_next/image"));
        assert!(exclusions.is_excluded("/api/places/details"));
        assert!(exclusions.is_excluded("/favicon.ico"));
        assert!(exclusions.is_excluded("/og-image.jpg"));
        assert!(!exclusions.is_excluded("/"));
        assert!(!exclusions.is_excluded("/about"));
        assert!(!exclusions.is_excluded("/healthz"));
    }

    #[test]
    fn test_exclusion_matcher_with_path() {
        let exclusions = ExclusionMatcher::from_config(&ExclusionConfig::default()).with_path("/healthz");
        assert!(exclusions.is_excluded("/healthz"));
    }

    #[test]
    fn test_empty_exclusions_match_nothing() {
        let config = ExclusionConfig {
            prefixes: Vec::new(),
            paths: Vec::new(),
            skip_file_paths: false,
        };
        let exclusions = ExclusionMatcher::from_config(&config);
        assert!(exclusions.inner.is_empty());
        assert!(!exclusions.is_excluded("/logo.png"));
    }
}
