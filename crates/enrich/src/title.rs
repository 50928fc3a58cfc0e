//! Turns a raw page/post title into a catalog search query.

use regex::Regex;
use std::sync::LazyLock;

// Bare or bracketed 4-digit years: 1994, (1994), [1994]
static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\(\[]?\b\d{4}\b[\)\]]?").unwrap());

// "Official Trailer", "official-teaser", "OFFICIAL: Clip"
static RE_MARKETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bofficial[^\w']*(?:trailer|teaser|clip|video)\b").unwrap()
});

// Branding suffix: "Heat | Netflix"
static RE_PIPE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\s*\|.*$").unwrap());

// "Title - Trailer", "Show - Season 2 ..."
static RE_DASH_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\s+-\s+(?:trailer|teaser|season\s+\d+)\b.*$").unwrap()
});

static RE_SYMBOLS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s']").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip years, marketing phrases, platform suffixes and symbols from a title.
///
/// Returns an empty string when nothing searchable is left; callers must not
/// query the catalog with it.
pub fn normalize(raw: &str) -> String {
    // Removals leave a space behind so digits and words never fuse into a
    // new match.
    let s = raw.replace(['\u{2018}', '\u{2019}'], "'");
    let s = RE_YEAR.replace_all(&s, " ");
    let s = RE_MARKETING.replace_all(&s, " ");
    let s = RE_PIPE_SUFFIX.replace(&s, "");
    let s = RE_DASH_SUFFIX.replace(&s, "");
    let s = RE_SYMBOLS.replace_all(&s, " ");
    let s = RE_WHITESPACE.replace_all(&s, " ");
    s.trim().to_string()
}
