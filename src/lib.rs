//! # addin-harvest
//!
//! Harvests a catalog of add-in listings from a remote directory API and
//! resolves each listing's download URL by fetching and parsing its XML
//! manifest, with bounded concurrency and per-item failure isolation.
//!
//! ## Design Philosophy
//!
//! - **Best-effort batches** - one broken manifest or malformed listing
//!   never aborts the run; the artifact always reflects everything that
//!   could be resolved
//! - **Bounded fan-out** - a fixed-size worker pool caps simultaneous
//!   outbound connections; completions merge as they arrive
//! - **Library-first** - the binary is a thin wrapper; embed the
//!   [`Harvester`] and subscribe to its events instead of polling
//!
//! ## Quick Start
//!
//! ```no_run
//! use addin_harvest::{Config, Harvester};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let harvester = Harvester::new(Config::default())?;
//!
//!     // Subscribe to progress events
//!     let mut events = harvester.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let summary = harvester.run().await?;
//!     println!("{} of {} listings resolved", summary.resolved, summary.listed);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Catalog harvesting (fan-out pipeline)
pub mod harvester;
/// Manifest fetching and download-URL extraction
pub mod manifest;
/// Result persistence
pub mod output;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{CatalogConfig, Config, HarvestConfig, OutputConfig};
pub use error::{Error, ResolveError, Result};
pub use harvester::{CatalogPage, Harvester};
pub use manifest::{HttpManifestResolver, ManifestResolver};
pub use types::{
    AddinId, CatalogItem, Event, HarvestSummary, ResolvedRecord, ResolvedUrl, ResultMap,
};
