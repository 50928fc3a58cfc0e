//! Entry point: classify, extract, cross-reference, merge.

use reelmark_core::{EnrichmentResult, Platform};
use reelmark_metadata::provider::CatalogProvider;
use reelmark_metadata::tmdb::TmdbClient;
use reelmark_metadata::{cross_reference, merge};
use tracing::{debug, info, warn};

use crate::strategy::{StrategyContext, strategy_for};
use crate::{EnrichConfig, EnrichmentError, classify, normalize};

/// Outcome of one enrichment. `result` is always usable as a response body;
/// `failure` says what went wrong, if anything, before it was built.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub result: EnrichmentResult,
    pub failure: Option<EnrichmentError>,
}

impl Enrichment {
    fn failed(platform: Platform, failure: EnrichmentError) -> Self {
        let result = EnrichmentResult {
            blocked: failure.is_blocked(),
            error: failure.result_error(platform),
            ..EnrichmentResult::empty(platform)
        };
        Self {
            result,
            failure: Some(failure),
        }
    }
}

/// Stateless per request; share one behind an `Arc` across handlers.
pub struct Resolver {
    config: EnrichConfig,
    http: reqwest::Client,
    catalog: Option<Box<dyn CatalogProvider>>,
}

impl Resolver {
    pub fn new(config: EnrichConfig) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let catalog = config.tmdb_api_key.clone().map(|key| {
            Box::new(
                TmdbClient::new(key, http.clone())
                    .with_base_urls(&config.endpoints.tmdb_api, &config.endpoints.tmdb_image),
            ) as Box<dyn CatalogProvider>
        });

        Ok(Self {
            config,
            http,
            catalog,
        })
    }

    /// Replace the catalog, e.g. with a different provider.
    pub fn with_catalog(mut self, catalog: Box<dyn CatalogProvider>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn config(&self) -> &EnrichConfig {
        &self.config
    }

    /// Enrich a user-submitted link. Never fails; see [`Enrichment`].
    pub async fn enrich(&self, url: &str) -> Enrichment {
        self.enrich_as(classify(url), url).await
    }

    /// Enrich a link as if it came from `platform`, bounded by the deadline.
    /// On expiry the in-flight calls are dropped, not retried.
    pub async fn enrich_as(&self, platform: Platform, url: &str) -> Enrichment {
        let deadline = self.config.deadline;
        match tokio::time::timeout(deadline, self.run(platform, url)).await {
            Ok(enrichment) => enrichment,
            Err(_) => {
                warn!(%platform, url, ?deadline, "enrichment deadline exceeded");
                Enrichment::failed(platform, EnrichmentError::Timeout(deadline))
            }
        }
    }

    async fn run(&self, platform: Platform, url: &str) -> Enrichment {
        let strategy = strategy_for(platform);
        let ctx = StrategyContext {
            http: &self.http,
            config: &self.config,
        };
        debug!(%platform, strategy = strategy.name(), url, "enriching link");

        let findings = match strategy.extract(&ctx, platform, url).await {
            Ok(findings) => findings,
            Err(e) => {
                log_failure(platform, url, &e);
                return Enrichment::failed(platform, e);
            }
        };

        let query = findings
            .query
            .as_deref()
            .map(normalize)
            .unwrap_or_default();
        let hit = cross_reference(self.catalog.as_deref(), &query).await;

        let mut result = merge(findings.floor, hit.as_ref()).result;
        // Where the link came from, not where the metadata came from.
        result.provider = platform;

        Enrichment {
            result,
            failure: None,
        }
    }
}

fn log_failure(platform: Platform, url: &str, e: &EnrichmentError) {
    match e {
        EnrichmentError::Blocked { status } => {
            warn!(%platform, url, status, "origin blocked the fetch")
        }
        EnrichmentError::NoMetadata => info!(%platform, url, "no metadata at origin"),
        e if e.is_transient() => warn!(%platform, url, error = %e, "platform fetch failed"),
        e => debug!(%platform, url, error = %e, "nothing to extract"),
    }
}
