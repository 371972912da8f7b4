//! Accept-Language parsing and best-match negotiation.
//!
//! # Responsibilities
//! - Parse the weighted language list (RFC 7231 §5.3.5)
//! - Rank ranges by quality, keeping header order for ties
//! - Match ranges against the supported set (exact, then primary subtag)
//!
//! # Design Decisions
//! - Never fails: malformed entries are dropped, a malformed header
//!   yields an empty list
//! - `q=0` means "not acceptable" and drops the entry
//! - The `*` wildcard expresses no concrete preference and is dropped

use super::{is_valid_tag, LocaleSet};

/// One entry of an Accept-Language header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    /// Language tag with `_` normalized to `-`.
    pub tag: String,
    /// Quality weight in `(0.0, 1.0]`.
    pub quality: f32,
}

impl LanguageRange {
    /// Primary language subtag (`es` for `es-MX`).
    pub fn primary(&self) -> &str {
        primary_subtag(&self.tag)
    }
}

fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

/// Parse an Accept-Language header into ranges sorted by quality (highest first).
///
/// ```
/// use locale_gateway::locale::parse_accept_language;
///
/// let ranges = parse_accept_language("es-MX,es;q=0.9,en;q=0.8");
/// let tags: Vec<_> = ranges.iter().map(|r| r.tag.as_str()).collect();
/// assert_eq!(tags, ["es-MX", "es", "en"]);
/// ```
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange> {
    let mut ranges: Vec<LanguageRange> = header
        .split(',')
        .filter_map(parse_entry)
        .collect();

    // sort_by is stable, so equal weights keep header order
    ranges.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    ranges
}

fn parse_entry(entry: &str) -> Option<LanguageRange> {
    let mut parts = entry.split(';');
    let tag = parts.next()?.trim().replace('_', "-");

    if tag.is_empty() || tag == "*" || !is_valid_tag(&tag) {
        return None;
    }

    let mut quality = 1.0;
    for param in parts {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("q") {
            quality = parse_quality(value.trim())?;
        }
    }

    if quality <= 0.0 {
        return None;
    }

    Some(LanguageRange { tag, quality })
}

fn parse_quality(value: &str) -> Option<f32> {
    let q: f32 = value.parse().ok()?;
    if q.is_finite() && (0.0..=1.0).contains(&q) {
        Some(q)
    } else {
        None
    }
}

/// Pick the best supported locale for the ranked ranges.
///
/// For each range in rank order an exact (case-insensitive) tag match is
/// tried first, then a primary-subtag match. Returns `None` when nothing
/// matches; the caller falls back to the default locale.
pub fn negotiate<'a>(ranges: &[LanguageRange], locales: &'a LocaleSet) -> Option<&'a str> {
    for range in ranges {
        if let Some(code) = locales
            .codes()
            .iter()
            .find(|code| code.eq_ignore_ascii_case(&range.tag))
        {
            return Some(code.as_str());
        }

        if let Some(code) = locales
            .codes()
            .iter()
            .find(|code| primary_subtag(code).eq_ignore_ascii_case(range.primary()))
        {
            return Some(code.as_str());
        }
    }

    None
}
