//! Fan-out coordination — bounded-concurrency resolution and merging.

use futures::StreamExt;
use futures::stream;
use std::collections::HashMap;
use tracing::info;

use super::Harvester;
use super::processor::{self, ProcessOutcome};
use crate::types::{Event, ResultMap};

impl Harvester {
    /// Resolve every listing and merge the results into one keyed map.
    ///
    /// Listings fan out over a pool of `worker_count` concurrent
    /// processors; listings beyond the cap queue until a slot frees up,
    /// bounding simultaneous outbound connections. Completions are
    /// consumed in arrival order by this single loop, so the map needs no
    /// lock, and each identifier is processed exactly once per run, so
    /// merges cannot collide.
    ///
    /// A skipped listing is logged and excluded; it never aborts the run
    /// or affects sibling listings. There is no early exit and no batch
    /// retry; this returns only after every listing has completed.
    pub async fn resolve_all(&self, listings: Vec<serde_json::Value>) -> ResultMap {
        let total = listings.len();
        // a zero-width pool would never complete
        let workers = self.config.harvest.worker_count.max(1);
        let mut map: ResultMap = HashMap::with_capacity(total);

        let mut completions = stream::iter(listings)
            .map(|listing| {
                let resolver = std::sync::Arc::clone(&self.resolver);
                async move { processor::process_listing(resolver.as_ref(), listing).await }
            })
            .buffer_unordered(workers);

        let mut completed = 0usize;
        while let Some(outcome) = completions.next().await {
            completed += 1;
            match outcome {
                ProcessOutcome::Resolved { id, record } => {
                    self.emit_event(Event::ItemCompleted {
                        id: id.clone(),
                        title: record.title.clone(),
                        available: record.url.is_available(),
                    });
                    map.insert(id, record);
                }
                ProcessOutcome::Skipped { title } => {
                    self.emit_event(Event::ItemSkipped { title });
                }
            }
            info!(completed, total, "listing completed");
            self.emit_event(Event::Progress { completed, total });
        }

        map
    }
}
