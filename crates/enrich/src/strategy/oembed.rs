//! oEmbed title bootstrap for microblog and short-video links.

use reelmark_core::Platform;
use serde::Deserialize;

use super::{PlatformFindings, Strategy, StrategyContext, parse_url};
use crate::{EnrichmentError, fetch, html};

pub struct OEmbed;

#[async_trait::async_trait]
impl Strategy for OEmbed {
    fn name(&self) -> &'static str {
        "oembed"
    }

    async fn extract(
        &self,
        ctx: &StrategyContext<'_>,
        platform: Platform,
        url: &str,
    ) -> Result<PlatformFindings, EnrichmentError> {
        let url = parse_url(url)?;
        let endpoint = endpoint_for(ctx, platform).ok_or(EnrichmentError::MissingId)?;
        let embed = fetch_oembed(ctx, endpoint, url.as_str()).await?;
        let title = embed.title_candidate().ok_or(EnrichmentError::NoMetadata)?;
        Ok(PlatformFindings::query_only(platform, title))
    }
}

fn endpoint_for<'a>(ctx: &'a StrategyContext<'_>, platform: Platform) -> Option<&'a str> {
    let endpoints = &ctx.config.endpoints;
    match platform {
        Platform::Twitter => Some(endpoints.twitter_oembed.as_str()),
        Platform::TikTok => Some(endpoints.tiktok_oembed.as_str()),
        Platform::YouTube => Some(endpoints.youtube_oembed.as_str()),
        _ => None,
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OEmbedResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl OEmbedResponse {
    /// First line of the embed markup's text, else the `title` field.
    pub fn title_candidate(&self) -> Option<String> {
        self.html
            .as_deref()
            .and_then(|markup| html::first_line(&html::strip_tags(markup)))
            .or_else(|| {
                self.title
                    .as_deref()
                    .map(|t| html::decode_entities(t.trim()))
                    .filter(|t| !t.is_empty())
            })
    }
}

pub async fn fetch_oembed(
    ctx: &StrategyContext<'_>,
    endpoint: &str,
    url: &str,
) -> Result<OEmbedResponse, EnrichmentError> {
    let json = fetch::get_json(
        ctx.http,
        endpoint,
        &[("url", url), ("format", "json")],
        None,
    )
    .await?;
    serde_json::from_value(json).map_err(|e| EnrichmentError::Parse(format!("oEmbed: {e}")))
}
