//! Per-listing processing: decode, resolve, build the output record.

use tracing::{error, info};

use crate::manifest::ManifestResolver;
use crate::types::{AddinId, CatalogItem, ResolvedRecord};

/// Result of processing one raw listing
#[derive(Debug)]
pub(crate) enum ProcessOutcome {
    /// The listing decoded; the record carries the resolved URL or the
    /// sentinel
    Resolved {
        /// Listing identifier, the merge key
        id: AddinId,
        /// The completed output record
        record: ResolvedRecord,
    },
    /// The listing could not be decoded and is omitted from the map
    Skipped {
        /// Listing title, when recoverable from the raw record
        title: String,
    },
}

/// Process one raw listing into a keyed output record.
///
/// Decode failure is total item failure: the listing is reported as
/// [`ProcessOutcome::Skipped`] and omitted from the result map. Manifest
/// failure never reaches here as an error: the resolver substitutes the
/// sentinel and the record is kept with the rest of its metadata intact.
pub(crate) async fn process_listing<R: ManifestResolver + ?Sized>(
    resolver: &R,
    listing: serde_json::Value,
) -> ProcessOutcome {
    // Pull the identifying strings out before the decode consumes the value
    let id_hint = string_field(&listing, "Id");
    let title_hint = string_field(&listing, "Title");

    let item: CatalogItem = match serde_json::from_value(listing) {
        Ok(item) => item,
        Err(e) => {
            error!(
                id = %id_hint.as_deref().unwrap_or("<unknown>"),
                title = %title_hint.as_deref().unwrap_or("<unknown>"),
                error = %e,
                "skipping malformed catalog listing"
            );
            return ProcessOutcome::Skipped {
                title: title_hint.unwrap_or_else(|| "<unknown>".to_string()),
            };
        }
    };

    info!(id = %item.id, title = %item.title, "resolving download URL");
    let url = resolver.resolve(&item.manifest_url).await;

    let id = item.id.clone();
    ProcessOutcome::Resolved {
        id,
        record: ResolvedRecord::from_item(item, url),
    }
}

fn string_field(listing: &serde_json::Value, key: &str) -> Option<String> {
    listing.get(key).and_then(|v| v.as_str()).map(str::to_owned)
}
