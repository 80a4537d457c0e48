//! Slug generation for article titles.

/// Used when a title has nothing left after transliteration, e.g. only punctuation.
pub const FALLBACK_SLUG: &str = "article";

/// Turns a title into a lowercase, hyphen-separated, URL-safe slug.
///
/// Non-ASCII letters are transliterated first (`é` becomes `e`, Cyrillic and
/// CJK become their romanisation). Every run of whitespace or punctuation
/// collapses into a single hyphen, and leading/trailing hyphens are dropped.
///
/// ```
/// use inkpost_core::slugify;
///
/// assert_eq!(slugify("Tupai terbang"), "tupai-terbang");
/// assert_eq!(slugify("  Hello,   World!  "), "hello-world");
/// assert_eq!(slugify("Über cool"), "uber-cool");
/// ```
pub fn slugify(title: &str) -> String {
    let slug = ::slug::slugify(title);

    if slug.is_empty() {
        return FALLBACK_SLUG.to_string();
    }

    slug
}

/// Appends a Unix timestamp (seconds) to a taken slug.
pub fn disambiguate(slug: &str, unix_seconds: i64) -> String {
    format!("{}{}", slug, unix_seconds)
}
