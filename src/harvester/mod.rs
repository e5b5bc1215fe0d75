//! Catalog harvesting split into focused submodules.
//!
//! The [`Harvester`] struct and its methods are organized by domain:
//! - [`catalog`] - Catalog listing retrieval
//! - [`coordinator`] - Bounded fan-out and result merging
//! - [`processor`] - Per-listing decode and record construction

mod catalog;
mod coordinator;
mod processor;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use catalog::CatalogPage;

use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::manifest::{HttpManifestResolver, ManifestResolver};
use crate::types::{Event, HarvestSummary};

/// User agent sent on every outbound request
const USER_AGENT: &str = concat!("addin-harvest/", env!("CARGO_PKG_VERSION"));

/// Main harvester instance (cloneable - shared state is Arc or Clone)
///
/// Owns the configuration, the shared HTTP client, the manifest resolver,
/// and the event broadcast channel. One instance drives one or more runs;
/// all run-scoped state lives on the stack of [`Harvester::run`].
#[derive(Clone)]
pub struct Harvester {
    /// Configuration (shared across tasks)
    pub(crate) config: Arc<Config>,
    /// Shared HTTP client; workers borrow its connection pool
    pub(crate) client: reqwest::Client,
    /// Manifest resolver (trait object for pluggable implementations)
    pub(crate) resolver: Arc<dyn ManifestResolver>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
}

impl Harvester {
    /// Create a new Harvester instance
    ///
    /// Validates the configuration and builds the shared HTTP client with
    /// the configured per-request timeout and a crate user agent.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the catalog base URL is not a valid
    /// URL, or [`Error::Network`] if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        if let Err(e) = url::Url::parse(&config.catalog.base_url) {
            return Err(Error::Config {
                message: format!(
                    "catalog base URL '{}' is not a valid URL: {}",
                    config.catalog.base_url, e
                ),
                key: Some("base_url".to_string()),
            });
        }
        if config.harvest.worker_count == 0 {
            tracing::warn!("worker_count is 0, running with a single worker");
        }

        let client = reqwest::Client::builder()
            .timeout(config.harvest.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let (event_tx, _rx) = tokio::sync::broadcast::channel(1024);

        Ok(Self {
            config: Arc::new(config),
            resolver: Arc::new(HttpManifestResolver::new(client.clone())),
            client,
            event_tx,
        })
    }

    /// Subscribe to harvest events
    ///
    /// Multiple subscribers are supported; each receives all events
    /// independently. Events are best-effort; a subscriber that falls
    /// behind the channel buffer receives a `Lagged` error.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// send() returns Err if there are no receivers, which is fine - the
    /// event is simply dropped.
    pub(crate) fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }

    /// Run one complete harvest: fetch, resolve, persist.
    ///
    /// Only the initial catalog fetch is fatal. A persist failure is
    /// logged and reported via [`Event::PersistFailed`] but does not fail
    /// the run, since the map was already computed and the summary
    /// reflects it.
    pub async fn run(&self) -> Result<HarvestSummary> {
        let page = self.fetch_catalog().await?;
        let listed = page.listings.len();
        tracing::info!(
            total = page.total_count,
            listed,
            "catalog fetched, starting resolution"
        );

        let map = self.resolve_all(page.listings).await;

        let resolved = map.values().filter(|r| r.url.is_available()).count();
        let unavailable = map.len() - resolved;
        let skipped = listed - map.len();

        let path = &self.config.output.output_file;
        match crate::output::write_results(&map, path).await {
            Ok(()) => {
                self.emit_event(Event::ResultsWritten {
                    path: path.clone(),
                    count: map.len(),
                });
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to persist results");
                self.emit_event(Event::PersistFailed {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }

        tracing::info!(listed, resolved, unavailable, skipped, "harvest finished");

        Ok(HarvestSummary {
            listed,
            resolved,
            unavailable,
            skipped,
            finished_at: chrono::Utc::now(),
        })
    }
}
