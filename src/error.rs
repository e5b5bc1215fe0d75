//! Error types for addin-harvest
//!
//! Two tiers of failure exist in a harvest run:
//! - [`Error`] for run-level failures. Only the initial catalog fetch is
//!   fatal; everything else is reported and the run continues.
//! - [`ResolveError`] for per-item manifest resolution failures. These are
//!   downgraded to the `"n/a"` sentinel at the resolver boundary and never
//!   become an [`Error`].

use thiserror::Error;

/// Result type alias for addin-harvest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for addin-harvest
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// Catalog endpoint returned a non-success status
    #[error("catalog request returned HTTP {status}: {url}")]
    CatalogStatus {
        /// HTTP status code returned by the directory API
        status: u16,
        /// The catalog URL that was requested
        url: String,
    },

    /// Network error (transport failure or response decode failure)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Manifest resolution errors
///
/// Raised while fetching or parsing one item's manifest. Deliberately not a
/// variant of [`Error`]: the resolver catches every one of these, logs it,
/// and substitutes [`ResolvedUrl::Unavailable`](crate::types::ResolvedUrl)
/// so a broken manifest cannot suppress the rest of the item's metadata.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Transport failure (timeout, connection error, DNS, rejected URL)
    #[error("failed to fetch manifest from {url}: {source}")]
    Fetch {
        /// The manifest URL that was requested
        url: String,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Manifest endpoint returned a non-success status
    #[error("manifest at {url} returned HTTP {status}")]
    Status {
        /// The manifest URL that was requested
        url: String,
        /// HTTP status code returned
        status: u16,
    },

    /// Manifest body was not well-formed XML or lacked the expected path
    #[error("failed to parse manifest from {url}: {reason}")]
    Parse {
        /// The manifest URL whose body failed to parse
        url: String,
        /// What went wrong (malformed document, missing element/attribute)
        reason: String,
    },
}
