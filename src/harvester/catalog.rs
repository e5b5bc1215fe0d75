//! Catalog listing retrieval from the directory API.

use serde::Deserialize;

use super::Harvester;
use crate::error::{Error, Result};
use crate::types::Event;

/// One page of directory listings
///
/// Listings stay raw JSON here; each is decoded into a typed
/// [`CatalogItem`](crate::types::CatalogItem) per item by the processor,
/// so one malformed listing cannot fail the whole page decode. Both
/// fields default when absent; the directory omits them on empty
/// result sets.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CatalogPage {
    /// Server-reported total listing count (may exceed this page)
    #[serde(rename = "TotalCount", default)]
    pub total_count: u64,

    /// Raw listings returned in this page
    #[serde(rename = "Values", default)]
    pub listings: Vec<serde_json::Value>,
}

impl Harvester {
    /// Fetch the catalog page from the directory API
    ///
    /// One GET with the configured query parameters. This is the only
    /// fetch whose failure aborts a run: it happens before any item is
    /// scheduled, so there is nothing to salvage.
    ///
    /// # Errors
    /// Returns [`Error::Network`] on transport or body-decode failure and
    /// [`Error::CatalogStatus`] on a non-success response.
    pub async fn fetch_catalog(&self) -> Result<CatalogPage> {
        let catalog = &self.config.catalog;
        tracing::debug!(url = %catalog.base_url, "fetching catalog");

        let page_size = catalog.page_size.to_string();
        let response = self
            .client
            .get(&catalog.base_url)
            .query(&[
                ("ad", catalog.market.as_str()),
                ("apiversion", catalog.api_version.as_str()),
                ("client", catalog.client.as_str()),
                ("top", page_size.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::CatalogStatus {
                status: status.as_u16(),
                url: catalog.base_url.clone(),
            });
        }

        let page: CatalogPage = response.json().await?;
        self.emit_event(Event::CatalogFetched {
            total: page.total_count,
            listed: page.listings.len(),
        });

        Ok(page)
    }
}
