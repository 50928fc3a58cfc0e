use serde::{Deserialize, Serialize};

/// Source platform of a submitted link, derived from its hostname only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Video platform (API-backed).
    #[serde(rename = "youtube")]
    YouTube,
    /// Short-form video.
    #[serde(rename = "tiktok")]
    TikTok,
    /// Microblogging, legacy and rebranded domains.
    Twitter,
    /// Photo-sharing social network.
    Instagram,
    /// Feed-style social network.
    Facebook,
    /// Discussion forum.
    Reddit,
    /// Streaming service.
    Netflix,
    /// Review/catalog site.
    Imdb,
    /// Curation/diary site.
    Letterboxd,
    Generic,
}

impl Platform {
    pub const ALL: [Platform; 10] = [
        Self::YouTube,
        Self::TikTok,
        Self::Twitter,
        Self::Instagram,
        Self::Facebook,
        Self::Reddit,
        Self::Netflix,
        Self::Imdb,
        Self::Letterboxd,
        Self::Generic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::TikTok => "tiktok",
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::Reddit => "reddit",
            Self::Netflix => "netflix",
            Self::Imdb => "imdb",
            Self::Letterboxd => "letterboxd",
            Self::Generic => "generic",
        }
    }

    /// Human-readable brand name used in user-facing messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::TikTok => "TikTok",
            Self::Twitter => "X",
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::Reddit => "Reddit",
            Self::Netflix => "Netflix",
            Self::Imdb => "IMDb",
            Self::Letterboxd => "Letterboxd",
            Self::Generic => "This site",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog media kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Tv,
    #[default]
    Unknown,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a result carries no usable title or poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultErrorCode {
    Blocked,
    NoMetadata,
    InvalidUrl,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultError {
    pub message: String,
    pub code: ResultErrorCode,
}

/// Normalized metadata for one submitted link.
///
/// Built once per request and never mutated after it is returned. A result
/// with a title but no poster is a partial success, not an error: `error` is
/// only present when neither could be produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub media_type: MediaType,
    pub provider: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_catalog_id: Option<u64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResultError>,
}

impl EnrichmentResult {
    /// An empty result that only records where the link came from.
    pub fn empty(provider: Platform) -> Self {
        Self {
            title: None,
            description: None,
            poster_url: None,
            backdrop_url: None,
            runtime_minutes: None,
            release_year: None,
            media_type: MediaType::Unknown,
            provider,
            external_catalog_id: None,
            blocked: false,
            error: None,
        }
    }

    /// True when the result has a title or a poster the UI can show.
    pub fn is_usable(&self) -> bool {
        self.title.is_some() || self.poster_url.is_some()
    }
}
