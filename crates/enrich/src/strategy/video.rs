//! Video-platform links via the platform's data API, or its oEmbed endpoint
//! when no API key is configured.

use regex::Regex;
use reelmark_core::{EnrichmentResult, Platform};
use std::sync::LazyLock;
use tracing::debug;

use super::oembed::fetch_oembed;
use super::{PlatformFindings, Strategy, StrategyContext, parse_url};
use crate::duration::iso8601_minutes;
use crate::{EnrichmentError, fetch};

static RE_VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap());

/// Largest first.
const THUMBNAIL_PREFERENCE: &[&str] = &["maxres", "standard", "high", "medium", "default"];

pub struct VideoApi;

#[async_trait::async_trait]
impl Strategy for VideoApi {
    fn name(&self) -> &'static str {
        "video_api"
    }

    async fn extract(
        &self,
        ctx: &StrategyContext<'_>,
        platform: Platform,
        url: &str,
    ) -> Result<PlatformFindings, EnrichmentError> {
        let url = parse_url(url)?;
        let id = video_id(&url).ok_or(EnrichmentError::MissingId)?;

        match ctx.config.youtube_api_key.as_deref() {
            Some(key) => from_data_api(ctx, platform, &id, key).await,
            None => {
                debug!(video_id = %id, "no video API key, using oEmbed");
                from_oembed(ctx, platform, &url).await
            }
        }
    }
}

/// Video ID from `youtu.be/<id>`, `youtube.com/watch?v=<id>`,
/// `/shorts/<id>` or `/embed/<id>`.
pub fn video_id(url: &url::Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let candidate = if host == "youtu.be" || host.ends_with(".youtu.be") {
        segments.next().map(|s| s.to_string())
    } else {
        match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned()),
            Some("shorts") | Some("embed") => segments.next().map(|s| s.to_string()),
            _ => None,
        }
    };

    candidate.filter(|id| RE_VIDEO_ID.is_match(id))
}

async fn from_data_api(
    ctx: &StrategyContext<'_>,
    platform: Platform,
    id: &str,
    key: &str,
) -> Result<PlatformFindings, EnrichmentError> {
    let endpoint = format!(
        "{}/videos",
        ctx.config.endpoints.youtube_api.trim_end_matches('/')
    );
    let data = fetch::get_json(
        ctx.http,
        &endpoint,
        &[("part", "snippet,contentDetails"), ("id", id), ("key", key)],
        None,
    )
    .await?;

    let video = data["items"]
        .as_array()
        .and_then(|items| items.first())
        .ok_or(EnrichmentError::NoMetadata)?;
    let snippet = &video["snippet"];

    let title = snippet["title"]
        .as_str()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string());

    Ok(PlatformFindings {
        query: title.clone(),
        floor: EnrichmentResult {
            title,
            description: snippet["description"]
                .as_str()
                .filter(|d| !d.trim().is_empty())
                .map(|d| d.to_string()),
            poster_url: best_thumbnail(&snippet["thumbnails"]),
            runtime_minutes: video["contentDetails"]["duration"]
                .as_str()
                .and_then(iso8601_minutes),
            ..EnrichmentResult::empty(platform)
        },
    })
}

async fn from_oembed(
    ctx: &StrategyContext<'_>,
    platform: Platform,
    url: &url::Url,
) -> Result<PlatformFindings, EnrichmentError> {
    let embed = fetch_oembed(ctx, &ctx.config.endpoints.youtube_oembed, url.as_str()).await?;
    let title = embed.title_candidate().ok_or(EnrichmentError::NoMetadata)?;

    Ok(PlatformFindings {
        query: Some(title.clone()),
        floor: EnrichmentResult {
            title: Some(title),
            poster_url: embed.thumbnail_url,
            ..EnrichmentResult::empty(platform)
        },
    })
}

fn best_thumbnail(thumbnails: &serde_json::Value) -> Option<String> {
    THUMBNAIL_PREFERENCE
        .iter()
        .find_map(|size| thumbnails[*size]["url"].as_str())
        .map(|u| u.to_string())
}
