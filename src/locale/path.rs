//! Locale-prefix helpers for request targets and page links.

use std::borrow::Cow;

use super::LocaleSet;

/// Split a request target into its path and the `?query` / `#fragment` suffix.
///
/// The suffix keeps its leading delimiter so it can be appended verbatim.
pub fn split_target(target: &str) -> (&str, &str) {
    let end = target
        .find(|c: char| c == '?' || c == '#')
        .unwrap_or(target.len());
    target.split_at(end)
}

/// Prepend a locale segment to a path. `/` maps to `/{locale}`.
pub fn prefixed_path(locale: &str, path: &str) -> String {
    match path {
        "" | "/" => format!("/{locale}"),
        p if p.starts_with('/') => format!("/{locale}{p}"),
        p => format!("/{locale}/{p}"),
    }
}

/// Locale named by the first non-empty path segment, or the default locale.
pub fn locale_from_path<'a>(path: &str, locales: &'a LocaleSet) -> &'a str {
    let (path, _) = split_target(path);
    path.split('/')
        .find(|segment| !segment.is_empty())
        .and_then(|segment| locales.codes().iter().find(|code| *code == segment))
        .map(String::as_str)
        .unwrap_or_else(|| locales.default_locale())
}

/// Localize a link target for the given locale.
///
/// External URLs, in-page anchors and already-localized paths are returned
/// unchanged. Query and fragment are preserved.
pub fn localize_path<'p>(path: &'p str, locale: &str, locales: &LocaleSet) -> Cow<'p, str> {
    if path.starts_with("http") || path.starts_with('#') {
        return Cow::Borrowed(path);
    }

    let (bare, suffix) = split_target(path);
    if locales.prefix_of(bare).is_some() {
        return Cow::Borrowed(path);
    }

    Cow::Owned(format!("{}{}", prefixed_path(locale, bare), suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en_es() -> LocaleSet {
        LocaleSet::new(["en", "es"], "es").unwrap()
    }

    #[test]
    fn test_split_target() {
        assert_eq!(split_target("/pricing?ref=ad#top"), ("/pricing", "?ref=ad#top"));
        assert_eq!(split_target("/faq#shipping"), ("/faq", "#shipping"));
        assert_eq!(split_target("/about"), ("/about", ""));
        assert_eq!(split_target("/?a=1"), ("/", "?a=1"));
    }

    #[test]
    fn test_prefixed_path() {
        assert_eq!(prefixed_path("en", "/"), "/en");
        assert_eq!(prefixed_path("en", ""), "/en");
        assert_eq!(prefixed_path("es", "/blog/post"), "/es/blog/post");
        assert_eq!(prefixed_path("es", "blog"), "/es/blog");
    }

    #[test]
    fn test_locale_from_path() {
        let set = en_es();
        assert_eq!(locale_from_path("/en/about", &set), "en");
        assert_eq!(locale_from_path("/es", &set), "es");
        assert_eq!(locale_from_path("/about", &set), "es");
        assert_eq!(locale_from_path("/", &set), "es");
        assert_eq!(locale_from_path("/en?x=1", &set), "en");
    }

    #[test]
    fn test_localize_path() {
        let set = en_es();
        assert_eq!(localize_path("/about", "en", &set), "/en/about");
        assert_eq!(localize_path("/", "en", &set), "/en");
        assert_eq!(localize_path("", "es", &set), "/es");
        assert_eq!(localize_path("/pricing?plan=pro", "es", &set), "/es/pricing?plan=pro");
    }

    #[test]
    fn test_localize_path_leaves_non_pages_alone() {
        let set = en_es();
        assert!(matches!(localize_path("/es/about", "en", &set), Cow::Borrowed("/es/about")));
        assert_eq!(localize_path("/en", "es", &set), "/en");
        assert_eq!(localize_path("https://example.com", "en", &set), "https://example.com");
        assert_eq!(localize_path("#faq", "en", &set), "#faq");
    }
}
