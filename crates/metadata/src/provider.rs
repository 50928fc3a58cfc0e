use reelmark_core::MediaType;

use crate::{CatalogMatch, MetadataError};

/// A movie/TV catalog that can be searched by title.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Multi-type search. Returns the first movie or TV result, skipping
    /// people and anything else the catalog mixes in.
    async fn search(&self, query: &str) -> Result<Option<CatalogMatch>, MetadataError>;

    /// Runtime in minutes for a movie, or the first episode runtime for a show.
    async fn runtime(
        &self,
        catalog_id: u64,
        media_type: MediaType,
    ) -> Result<Option<u32>, MetadataError>;
}
