use std::time::Duration;

/// Credentials and limits for the enrichment pipeline, resolved once at
/// startup and passed in explicitly.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    pub youtube_api_key: Option<String>,
    pub tmdb_api_key: Option<String>,
    pub scraper_api_key: Option<String>,
    /// Per outbound call.
    pub http_timeout: Duration,
    /// Whole enrichment, all calls included.
    pub deadline: Duration,
    pub endpoints: Endpoints,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            youtube_api_key: None,
            tmdb_api_key: None,
            scraper_api_key: None,
            http_timeout: Duration::from_secs(8),
            deadline: Duration::from_secs(20),
            endpoints: Endpoints::default(),
        }
    }
}

impl EnrichConfig {
    /// Read `REELMARK_*` variables. Blank values count as unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            youtube_api_key: env_value("REELMARK_YOUTUBE_KEY"),
            tmdb_api_key: env_value("REELMARK_TMDB_KEY"),
            scraper_api_key: env_value("REELMARK_SCRAPER_KEY"),
            http_timeout: env_secs("REELMARK_HTTP_TIMEOUT_SECS").unwrap_or(defaults.http_timeout),
            deadline: env_secs("REELMARK_DEADLINE_SECS").unwrap_or(defaults.deadline),
            endpoints: defaults.endpoints,
        }
    }
}

/// Base URLs of every outbound collaborator.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub youtube_api: String,
    pub youtube_oembed: String,
    pub twitter_oembed: String,
    pub tiktok_oembed: String,
    pub tmdb_api: String,
    pub tmdb_image: String,
    pub scraper_proxy: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            youtube_api: "https://www.googleapis.com/youtube/v3".to_string(),
            youtube_oembed: "https://www.youtube.com/oembed".to_string(),
            twitter_oembed: "https://publish.twitter.com/oembed".to_string(),
            tiktok_oembed: "https://www.tiktok.com/oembed".to_string(),
            tmdb_api: reelmark_metadata::tmdb::BASE_URL.to_string(),
            tmdb_image: reelmark_metadata::tmdb::IMAGE_BASE.to_string(),
            scraper_proxy: "https://app.scrapingbee.com/api/v1/".to_string(),
        }
    }
}

impl Endpoints {
    /// Every endpoint on one host, for tests against a local mock server.
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            youtube_api: format!("{base}/youtube/v3"),
            youtube_oembed: format!("{base}/youtube/oembed"),
            twitter_oembed: format!("{base}/twitter/oembed"),
            tiktok_oembed: format!("{base}/tiktok/oembed"),
            tmdb_api: format!("{base}/tmdb/3"),
            tmdb_image: format!("{base}/tmdb/t/p"),
            scraper_proxy: format!("{base}/scraper"),
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}

fn env_secs(name: &str) -> Option<Duration> {
    env_value(name)
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
