//! Supported-locale table and language negotiation.
//!
//! # Data Flow
//! ```text
//! [locales] config table
//!     → LocaleSet::from_config (validate codes, default)
//!     → Arc<LocaleSet> (immutable, shared by resolver + middleware)
//!
//! Per request:
//!     Accept-Language header
//!     → negotiation.rs (weighted list → ranked ranges)
//!     → negotiate() against LocaleSet
//!     → matched code or None
//! ```
//!
//! # Design Decisions
//! - The table is fixed at startup; there is no runtime mutation
//! - Order of codes is the tie-break priority during negotiation
//! - Prefix checks are case-sensitive, tag negotiation is not

pub mod negotiation;
pub mod path;

use thiserror::Error;

use crate::config::LocaleConfig;

pub use negotiation::{negotiate, parse_accept_language, LanguageRange};
pub use path::{locale_from_path, localize_path, prefixed_path, split_target};

/// Errors raised while building a [`LocaleSet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("supported locale set is empty")]
    Empty,

    #[error("invalid locale code: {0:?}")]
    InvalidCode(String),

    #[error("duplicate locale code: {0}")]
    Duplicate(String),

    #[error("default locale {0:?} is not in the supported set")]
    UnknownDefault(String),
}

/// Ordered set of supported locale codes with one designated default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    codes: Vec<String>,
    default: usize,
}

impl LocaleSet {
    /// Build a locale set, validating every code and the default.
    pub fn new<I, S>(codes: I, default: &str) -> Result<Self, LocaleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut validated: Vec<String> = Vec::new();
        for code in codes {
            let code = code.into();
            if !is_valid_tag(&code) {
                return Err(LocaleError::InvalidCode(code));
            }
            if validated.iter().any(|c| c.eq_ignore_ascii_case(&code)) {
                return Err(LocaleError::Duplicate(code));
            }
            validated.push(code);
        }

        if validated.is_empty() {
            return Err(LocaleError::Empty);
        }

        let default = validated
            .iter()
            .position(|c| c == default)
            .ok_or_else(|| LocaleError::UnknownDefault(default.to_string()))?;

        Ok(Self {
            codes: validated,
            default,
        })
    }

    /// Build the locale set from the `[locales]` config table.
    pub fn from_config(config: &LocaleConfig) -> Result<Self, LocaleError> {
        Self::new(config.supported.iter().cloned(), &config.default)
    }

    /// Supported codes in priority order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn default_locale(&self) -> &str {
        &self.codes[self.default]
    }

    /// Exact, case-sensitive membership test (cookie values, path segments).
    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    /// Returns the supported code the path is prefixed with, if any.
    ///
    /// A path is prefixed when it equals `/{code}` or starts with `/{code}/`.
    pub fn prefix_of(&self, path: &str) -> Option<&str> {
        let rest = path.strip_prefix('/')?;
        self.codes
            .iter()
            .find(|code| match rest.strip_prefix(code.as_str()) {
                Some(tail) => tail.is_empty() || tail.starts_with('/'),
                None => false,
            })
            .map(String::as_str)
    }
}

/// Checks the RFC 4647 language-range shape: alphanumeric subtags of 1-8
/// characters separated by `-`, with an alphabetic primary subtag.
pub(crate) fn is_valid_tag(tag: &str) -> bool {
    let mut subtags = tag.split('-');
    let primary_ok = subtags
        .next()
        .map(|p| (1..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false);

    primary_ok && subtags.all(|s| (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en_es() -> LocaleSet {
        LocaleSet::new(["en", "es"], "en").unwrap()
    }

    #[test]
    fn test_new_rejects_bad_tables() {
        assert_eq!(
            LocaleSet::new(Vec::<String>::new(), "en"),
            Err(LocaleError::Empty)
        );
        assert_eq!(
            LocaleSet::new(["en", "es"], "fr"),
            Err(LocaleError::UnknownDefault("fr".into()))
        );
        assert_eq!(
            LocaleSet::new(["en", "EN"], "en"),
            Err(LocaleError::Duplicate("EN".into()))
        );
        assert_eq!(
            LocaleSet::new(["en", "e s"], "en"),
            Err(LocaleError::InvalidCode("e s".into()))
        );
    }

    #[test]
    fn test_default_and_membership() {
        let set = LocaleSet::new(["en", "es"], "es").unwrap();
        assert_eq!(set.default_locale(), "es");
        assert!(set.contains("en"));
        assert!(!set.contains("EN"));
        assert!(!set.contains("fr"));
    }

    #[test]
    fn test_prefix_of() {
        let set = en_es();
        assert_eq!(set.prefix_of("/en"), Some("en"));
        assert_eq!(set.prefix_of("/es/about"), Some("es"));
        assert_eq!(set.prefix_of("/english"), None);
        assert_eq!(set.prefix_of("/"), None);
        assert_eq!(set.prefix_of("/pricing"), None);
        assert_eq!(set.prefix_of("en/about"), None);
    }

    #[test]
    fn test_region_codes() {
        let set = LocaleSet::new(["pt-BR", "en"], "en").unwrap();
        assert_eq!(set.prefix_of("/pt-BR/blog"), Some("pt-BR"));
        assert_eq!(set.prefix_of("/pt/blog"), None);
    }

    #[test]
    fn test_is_valid_tag() {
        assert!(is_valid_tag("en"));
        assert!(is_valid_tag("zh-Hans-CN"));
        assert!(is_valid_tag("es-419"));
        assert!(!is_valid_tag(""));
        assert!(!is_valid_tag("419"));
        assert!(!is_valid_tag("en-"));
        assert!(!is_valid_tag("toolongtag"));
    }
}
