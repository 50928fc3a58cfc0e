use tracing::{debug, warn};

use crate::CatalogMatch;
use crate::provider::CatalogProvider;

/// Search the catalog for a normalized title and fill in runtime.
///
/// `None` means "no enrichment possible": no catalog configured, an empty
/// query, no movie/TV hit, or a failed search. The runtime lookup is
/// best-effort and never discards the search hit.
pub async fn cross_reference(
    catalog: Option<&dyn CatalogProvider>,
    title: &str,
) -> Option<CatalogMatch> {
    let catalog = catalog?;
    let title = title.trim();
    if title.is_empty() {
        return None;
    }

    let mut found = match catalog.search(title).await {
        Ok(Some(found)) => found,
        Ok(None) => {
            debug!(provider = catalog.name(), query = title, "no catalog match");
            return None;
        }
        Err(e) => {
            warn!(provider = catalog.name(), query = title, error = %e, "catalog search failed");
            return None;
        }
    };

    match catalog.runtime(found.catalog_id, found.media_type).await {
        Ok(runtime) => found.runtime_minutes = runtime,
        Err(e) => {
            debug!(
                provider = catalog.name(),
                catalog_id = found.catalog_id,
                error = %e,
                "runtime lookup failed"
            );
        }
    }

    Some(found)
}
