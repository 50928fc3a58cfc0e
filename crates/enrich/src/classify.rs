use reelmark_core::Platform;

/// Known hosts, matched as domain suffixes. First match wins, so a more
/// specific domain must come before any entry that would also match it.
static HOST_TABLE: &[(&str, Platform)] = &[
    ("youtu.be", Platform::YouTube),
    ("youtube.com", Platform::YouTube),
    ("tiktok.com", Platform::TikTok),
    ("twitter.com", Platform::Twitter),
    ("x.com", Platform::Twitter),
    ("instagram.com", Platform::Instagram),
    ("facebook.com", Platform::Facebook),
    ("fb.watch", Platform::Facebook),
    ("reddit.com", Platform::Reddit),
    ("netflix.com", Platform::Netflix),
    ("imdb.com", Platform::Imdb),
    ("letterboxd.com", Platform::Letterboxd),
    ("boxd.it", Platform::Letterboxd),
];

/// Map a submitted URL to its source platform.
///
/// Never fails: anything that does not parse as an absolute URL, or whose
/// host is not in the table, is `Generic`.
pub fn classify(url: &str) -> Platform {
    let Ok(parsed) = url::Url::parse(url.trim()) else {
        return Platform::Generic;
    };
    match parsed.host_str() {
        Some(host) => classify_host(host),
        None => Platform::Generic,
    }
}

fn classify_host(host: &str) -> Platform {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    HOST_TABLE
        .iter()
        .find(|(domain, _)| host_matches(&host, domain))
        .map(|(_, platform)| *platform)
        .unwrap_or(Platform::Generic)
}

/// `host` is `domain` itself or one of its subdomains.
fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
