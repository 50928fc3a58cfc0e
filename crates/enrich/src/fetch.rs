//! Outbound GET helpers. Every call is made exactly once; status codes are
//! sorted into blocked and transient failures here so strategies don't have to.

use reqwest::StatusCode;
use tracing::debug;

use crate::EnrichmentError;

/// Identifies the fetcher as a bot to sites serving plain HTML.
pub const BOT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; ReelmarkBot/0.1; +https://github.com/reelmark/reelmark)";

/// The forum API rejects generic client user agents.
pub const FORUM_USER_AGENT: &str = "reelmark:link-enricher:v0.1 (watchlist link previews)";

/// Open Graph tags live in `<head>`; the rest of a page is not needed.
const MAX_PAGE_BYTES: usize = 512 * 1024;

/// 401, 403 and 429 mean the origin refused us, not that it has no data.
pub fn check_status(status: StatusCode) -> Result<(), EnrichmentError> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            Err(EnrichmentError::Blocked {
                status: status.as_u16(),
            })
        }
        s if s.is_success() => Ok(()),
        s => Err(EnrichmentError::Status { status: s.as_u16() }),
    }
}

async fn send(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
    user_agent: Option<&str>,
) -> Result<reqwest::Response, EnrichmentError> {
    debug!(url = %url, "outbound request");

    let mut req = client.get(url).query(query);
    if let Some(ua) = user_agent {
        req = req.header(reqwest::header::USER_AGENT, ua);
    }
    let resp = req.send().await?;
    check_status(resp.status())?;
    Ok(resp)
}

pub async fn get_json(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
    user_agent: Option<&str>,
) -> Result<serde_json::Value, EnrichmentError> {
    let resp = send(client, url, query, user_agent).await?;
    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| EnrichmentError::Parse(format!("parse JSON: {e}")))
}

/// Fetch an HTML page, reading at most the first 512 KiB. The rest of the
/// body is never downloaded.
pub async fn get_page(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
    user_agent: Option<&str>,
) -> Result<String, EnrichmentError> {
    let mut resp = send(client, url, query, user_agent).await?;
    let mut head = Vec::new();
    while let Some(chunk) = resp.chunk().await? {
        let room = MAX_PAGE_BYTES - head.len();
        head.extend_from_slice(&chunk[..chunk.len().min(room)]);
        if head.len() >= MAX_PAGE_BYTES {
            debug!(url = %url, "page truncated");
            break;
        }
    }
    Ok(String::from_utf8_lossy(&head).into_owned())
}
