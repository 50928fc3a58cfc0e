//! Page scraping for link previews: Open Graph tags, `<title>`, embed text.
//!
//! `<meta>` tags are located with a regex so a broken document can't hide
//! them; everything that needs real HTML parsing (text content, entities)
//! goes through `scraper`.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

static RE_META: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").unwrap());

// Attribute names must follow whitespace: `data-content=` is not `content=`.
static RE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)(?:^|\s)(property|name|content)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static RE_LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</p\s*>|</div\s*>").unwrap());

static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

/// All `og:*` meta tags as `og:key -> value`. The first occurrence of a key
/// wins, matching how link previews treat repeated `og:image` tags.
pub fn og_tags(html: &str) -> HashMap<String, String> {
    let mut tags = HashMap::new();

    for meta in RE_META.find_iter(html) {
        let mut key = None;
        let mut content = None;
        for attr in RE_ATTR.captures_iter(meta.as_str()) {
            let value = attr
                .get(2)
                .or_else(|| attr.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match attr[1].to_ascii_lowercase().as_str() {
                "content" => content = content.or(Some(value)),
                _ => key = key.or(Some(value.to_ascii_lowercase())),
            }
        }

        if let (Some(key), Some(content)) = (key, content) {
            let content = decode_entities(content).trim().to_string();
            if key.starts_with("og:") && !content.is_empty() {
                tags.entry(key).or_insert(content);
            }
        }
    }

    tags
}

/// Text of the first `<title>` element.
pub fn title_tag(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Visible text of some markup, keeping line structure from `<br>`, `</p>`
/// and `</div>`. Script and style bodies are dropped.
pub fn strip_tags(html: &str) -> String {
    let with_breaks = RE_LINE_BREAK.replace_all(html, "\n");
    let fragment = Html::parse_fragment(&with_breaks);

    fragment
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node
                .parent()
                .and_then(|p| p.value().as_element().map(|el| el.name()));
            match parent {
                Some("script" | "style") => None,
                _ => Some(&**text),
            }
        })
        .collect()
}

/// First non-blank line of some text.
pub fn first_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.to_string())
}

/// Decode HTML character references (named and numeric) in plain text.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    // Escape `<` first so the parser sees text, never markup.
    let fragment = Html::parse_fragment(&s.replace('<', "&lt;"));
    fragment.root_element().text().collect()
}
