pub mod error;
pub mod types;

pub use types::{EnrichmentResult, MediaType, Platform, ResultError, ResultErrorCode};
