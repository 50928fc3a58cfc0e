//! TMDB (The Movie Database) catalog client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use reelmark_core::MediaType;
use tracing::debug;

use crate::provider::CatalogProvider;
use crate::{CatalogMatch, MetadataError};

pub const BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

pub struct TmdbClient {
    api_key: String,
    base_url: String,
    image_base: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String, client: reqwest::Client) -> Self {
        Self {
            api_key,
            base_url: BASE_URL.to_string(),
            image_base: IMAGE_BASE.to_string(),
            client,
        }
    }

    /// Point the client at different API and image hosts.
    pub fn with_base_urls(mut self, base_url: &str, image_base: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self.image_base = image_base.trim_end_matches('/').to_string();
        self
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MetadataError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn search(&self, query: &str) -> Result<Option<CatalogMatch>, MetadataError> {
        let data = self
            .get_json("/search/multi", &[("query", query), ("include_adult", "false")])
            .await?;
        Ok(first_title_match(&data, &self.image_base))
    }

    async fn runtime(
        &self,
        catalog_id: u64,
        media_type: MediaType,
    ) -> Result<Option<u32>, MetadataError> {
        let path = match media_type {
            MediaType::Movie => format!("/movie/{catalog_id}"),
            MediaType::Tv => format!("/tv/{catalog_id}"),
            MediaType::Unknown => return Ok(None),
        };
        let data = self.get_json(&path, &[]).await?;
        Ok(parse_runtime(&data, media_type))
    }
}

/// Pick the first movie or TV entry from a `/search/multi` response.
fn first_title_match(data: &serde_json::Value, image_base: &str) -> Option<CatalogMatch> {
    let results = data["results"].as_array()?;

    results.iter().find_map(|r| {
        let media_type = match r["media_type"].as_str() {
            Some("movie") => MediaType::Movie,
            Some("tv") => MediaType::Tv,
            _ => return None,
        };
        let catalog_id = r["id"].as_u64()?;
        let date = match media_type {
            MediaType::Movie => r["release_date"].as_str(),
            _ => r["first_air_date"].as_str(),
        };

        Some(CatalogMatch {
            catalog_id,
            media_type,
            title: r["title"]
                .as_str()
                .or_else(|| r["name"].as_str())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string()),
            overview: r["overview"]
                .as_str()
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string()),
            poster_url: r["poster_path"]
                .as_str()
                .map(|p| format!("{image_base}/w500{p}")),
            backdrop_url: r["backdrop_path"]
                .as_str()
                .map(|p| format!("{image_base}/original{p}")),
            year: date.and_then(|d| d.get(..4)).and_then(|y| y.parse().ok()),
            runtime_minutes: None,
        })
    })
}

fn parse_runtime(data: &serde_json::Value, media_type: MediaType) -> Option<u32> {
    let minutes = match media_type {
        MediaType::Movie => data["runtime"].as_u64(),
        MediaType::Tv => data["episode_run_time"]
            .as_array()
            .and_then(|a| a.first())
            .and_then(|v| v.as_u64()),
        MediaType::Unknown => None,
    };
    // TMDB reports 0 when the runtime is unknown.
    minutes
        .filter(|m| *m > 0)
        .and_then(|m| u32::try_from(m).ok())
}
