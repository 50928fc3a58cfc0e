//! Per-platform extraction strategies and the dispatch table.

pub mod forum;
pub mod oembed;
pub mod opengraph;
pub mod video;

use reelmark_core::{EnrichmentResult, Platform};

use crate::{EnrichConfig, EnrichmentError};

/// What a strategy pulled from the origin platform.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformFindings {
    /// Raw title to normalize and look up in the catalog.
    pub query: Option<String>,
    /// Platform-native values, used only where the catalog has nothing.
    pub floor: EnrichmentResult,
}

impl PlatformFindings {
    /// Title bootstrap only: the platform contributes no fallback values.
    pub fn query_only(platform: Platform, query: String) -> Self {
        Self {
            query: Some(query),
            floor: EnrichmentResult::empty(platform),
        }
    }
}

/// Shared, read-only inputs for a strategy run.
pub struct StrategyContext<'a> {
    pub http: &'a reqwest::Client,
    pub config: &'a EnrichConfig,
}

#[async_trait::async_trait]
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn extract(
        &self,
        ctx: &StrategyContext<'_>,
        platform: Platform,
        url: &str,
    ) -> Result<PlatformFindings, EnrichmentError>;
}

/// The one place a platform is mapped to its strategy.
pub fn strategy_for(platform: Platform) -> &'static dyn Strategy {
    match platform {
        Platform::YouTube => &video::VideoApi,
        Platform::TikTok | Platform::Twitter => &oembed::OEmbed,
        Platform::Reddit => &forum::ForumJson,
        Platform::Instagram
        | Platform::Facebook
        | Platform::Netflix
        | Platform::Imdb
        | Platform::Letterboxd
        | Platform::Generic => &opengraph::OpenGraph,
    }
}

/// Absolute http(s) URLs only.
pub(crate) fn parse_url(url: &str) -> Result<url::Url, EnrichmentError> {
    let parsed =
        url::Url::parse(url.trim()).map_err(|e| EnrichmentError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(EnrichmentError::InvalidUrl(format!("unsupported scheme `{other}`"))),
    }
}
