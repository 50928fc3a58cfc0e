pub mod crossref;
pub mod merge;
pub mod provider;
pub mod tmdb;

use reelmark_core::MediaType;
use thiserror::Error;

pub use crossref::cross_reference;
pub use merge::merge;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
}

/// The catalog entry chosen for a search query.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogMatch {
    pub catalog_id: u64,
    pub media_type: MediaType,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub year: Option<i32>,
    pub runtime_minutes: Option<u32>,
}
