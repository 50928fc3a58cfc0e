//! Discussion-forum posts via the forum's `.json` view of any page.

use reelmark_core::Platform;

use super::{PlatformFindings, Strategy, StrategyContext, parse_url};
use crate::fetch::{self, FORUM_USER_AGENT};
use crate::EnrichmentError;

pub struct ForumJson;

#[async_trait::async_trait]
impl Strategy for ForumJson {
    fn name(&self) -> &'static str {
        "forum_json"
    }

    async fn extract(
        &self,
        ctx: &StrategyContext<'_>,
        platform: Platform,
        url: &str,
    ) -> Result<PlatformFindings, EnrichmentError> {
        let endpoint = json_endpoint(&parse_url(url)?);
        let listing = fetch::get_json(ctx.http, &endpoint, &[], Some(FORUM_USER_AGENT)).await?;
        let title = post_title(&listing).ok_or(EnrichmentError::NoMetadata)?;
        Ok(PlatformFindings::query_only(platform, title))
    }
}

/// `https://reddit.com/r/x/comments/id/slug/?utm=1` -> `https://reddit.com/r/x/comments/id/slug.json`
pub fn json_endpoint(url: &url::Url) -> String {
    let mut endpoint = url.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    endpoint.set_path(&format!("{}.json", url.path().trim_end_matches('/')));
    endpoint.to_string()
}

/// Title of the first child of the first listing. Post pages return an
/// array of listings (post, then comments); subreddit pages return one.
fn post_title(listing: &serde_json::Value) -> Option<String> {
    let first = match listing {
        serde_json::Value::Array(listings) => listings.first()?,
        other => other,
    };
    first["data"]["children"]
        .get(0)?["data"]["title"]
        .as_str()
        .map(|t| crate::html::decode_entities(t.trim()))
        .filter(|t| !t.is_empty())
}
