//! Generic page scraping via Open Graph tags, with an optional scraping
//! proxy for origins that refuse direct fetches.

use reelmark_core::{EnrichmentResult, Platform};
use tracing::{debug, warn};

use super::{PlatformFindings, Strategy, StrategyContext, parse_url};
use crate::fetch::{self, BOT_USER_AGENT};
use crate::{EnrichmentError, html};

pub struct OpenGraph;

#[async_trait::async_trait]
impl Strategy for OpenGraph {
    fn name(&self) -> &'static str {
        "open_graph"
    }

    async fn extract(
        &self,
        ctx: &StrategyContext<'_>,
        platform: Platform,
        url: &str,
    ) -> Result<PlatformFindings, EnrichmentError> {
        let page_url = parse_url(url)?;

        let page = match fetch::get_page(ctx.http, page_url.as_str(), &[], Some(BOT_USER_AGENT)).await
        {
            Ok(page) => page,
            Err(e) if e.is_blocked() => match fetch_via_proxy(ctx, &page_url).await {
                Some(page) => page,
                None => return Err(e),
            },
            Err(e) => return Err(e),
        };

        findings_from_page(platform, &page_url, &page)
    }
}

/// One fetch through the scraping proxy. Skipped without a credential; any
/// failure leaves the original blocked outcome in place.
async fn fetch_via_proxy(ctx: &StrategyContext<'_>, page_url: &url::Url) -> Option<String> {
    let key = ctx.config.scraper_api_key.as_deref()?;
    debug!(url = %page_url, "direct fetch blocked, trying scraping proxy");

    let query = [
        ("api_key", key),
        ("url", page_url.as_str()),
        ("render_js", "false"),
    ];
    match fetch::get_page(ctx.http, &ctx.config.endpoints.scraper_proxy, &query, None).await {
        Ok(page) => Some(page),
        Err(e) => {
            warn!(url = %page_url, error = %e, "scraping proxy failed");
            None
        }
    }
}

fn findings_from_page(
    platform: Platform,
    page_url: &url::Url,
    page: &str,
) -> Result<PlatformFindings, EnrichmentError> {
    let mut tags = html::og_tags(page);
    let title = tags
        .remove("og:title")
        .or_else(|| html::title_tag(page))
        .ok_or(EnrichmentError::NoMetadata)?;

    let poster_url = tags
        .remove("og:image")
        .and_then(|image| page_url.join(&image).ok())
        .map(|image| image.to_string());

    Ok(PlatformFindings {
        query: Some(title.clone()),
        floor: EnrichmentResult {
            title: Some(title),
            description: tags.remove("og:description"),
            poster_url,
            ..EnrichmentResult::empty(platform)
        },
    })
}
