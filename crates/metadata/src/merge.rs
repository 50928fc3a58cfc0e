//! Merge policy between platform-native data and catalog data.
//!
//! Merge rules:
//! 1. Catalog values win for every field the catalog has.
//! 2. Platform values are the floor, kept only where the catalog is empty.
//! 3. `provider` always stays the originating platform.

use reelmark_core::{EnrichmentResult, MediaType};
use tracing::debug;

use crate::CatalogMatch;

#[derive(Debug, Clone)]
pub struct MergeResult {
    pub result: EnrichmentResult,
    /// Fields whose value came from the catalog.
    pub updated_fields: Vec<&'static str>,
}

/// Lay a catalog match over platform-native data.
pub fn merge(floor: EnrichmentResult, catalog: Option<&CatalogMatch>) -> MergeResult {
    let mut merged = floor;
    let mut updated_fields = Vec::new();

    let Some(catalog) = catalog else {
        return MergeResult {
            result: merged,
            updated_fields,
        };
    };

    macro_rules! merge_field {
        ($field:ident, $value:expr) => {
            if let Some(value) = $value {
                merged.$field = Some(value);
                updated_fields.push(stringify!($field));
            }
        };
    }

    merge_field!(title, catalog.title.clone());
    merge_field!(description, catalog.overview.clone());
    merge_field!(poster_url, catalog.poster_url.clone());
    merge_field!(backdrop_url, catalog.backdrop_url.clone());
    merge_field!(runtime_minutes, catalog.runtime_minutes);
    merge_field!(release_year, catalog.year);
    merge_field!(external_catalog_id, Some(catalog.catalog_id));

    if catalog.media_type != MediaType::Unknown {
        merged.media_type = catalog.media_type;
        updated_fields.push("media_type");
    }

    debug!(provider = %merged.provider, ?updated_fields, "merged catalog metadata");

    MergeResult {
        result: merged,
        updated_fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelmark_core::Platform;

    fn platform_floor() -> EnrichmentResult {
        EnrichmentResult {
            title: Some("Rick Astley - Never Gonna Give You Up".into()),
            description: Some("The official video".into()),
            poster_url: Some("https://i.ytimg.com/vi/x/maxresdefault.jpg".into()),
            runtime_minutes: Some(4),
            ..EnrichmentResult::empty(Platform::YouTube)
        }
    }

    #[test]
    fn without_catalog_the_floor_is_kept() {
        let merged = merge(platform_floor(), None);
        assert_eq!(merged.result, platform_floor());
        assert!(merged.updated_fields.is_empty());
    }

    #[test]
    fn catalog_poster_beats_platform_thumbnail() {
        let catalog = CatalogMatch {
            catalog_id: 42,
            media_type: MediaType::Movie,
            title: Some("Never Gonna Give You Up".into()),
            overview: None,
            poster_url: Some("https://image.tmdb.org/t/p/w500/p.jpg".into()),
            backdrop_url: None,
            year: Some(1987),
            runtime_minutes: None,
        };

        let merged = merge(platform_floor(), Some(&catalog)).result;
        assert_eq!(
            merged.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/p.jpg")
        );
        assert_eq!(merged.title.as_deref(), Some("Never Gonna Give You Up"));
        // Catalog has no overview or runtime: floor survives.
        assert_eq!(merged.description.as_deref(), Some("The official video"));
        assert_eq!(merged.runtime_minutes, Some(4));
        assert_eq!(merged.media_type, MediaType::Movie);
        assert_eq!(merged.external_catalog_id, Some(42));
        assert_eq!(merged.provider, Platform::YouTube);
    }
}
