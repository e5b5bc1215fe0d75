//! Core types and events for addin-harvest

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::path::PathBuf;

/// Unique identifier for an add-in listing
///
/// Opaque key assigned by the directory API; used to key the result map.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddinId(pub String);

impl AddinId {
    /// Create a new AddinId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AddinId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for AddinId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for AddinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of manifest resolution for one item
///
/// Serializes as the URL string, or as the `"n/a"` sentinel when the
/// manifest could not be fetched or parsed. The sentinel keeps the rest of
/// the item's metadata in the artifact instead of dropping the item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedUrl {
    /// Download URL extracted from the manifest, verbatim
    Available(String),
    /// Resolution failed; the artifact carries the sentinel string
    Unavailable,
}

impl ResolvedUrl {
    /// Sentinel string written to the artifact for unresolved URLs
    pub const SENTINEL: &'static str = "n/a";

    /// Whether resolution produced a URL
    pub fn is_available(&self) -> bool {
        matches!(self, ResolvedUrl::Available(_))
    }

    /// The URL, or the sentinel string when unavailable
    pub fn as_str(&self) -> &str {
        match self {
            ResolvedUrl::Available(url) => url,
            ResolvedUrl::Unavailable => Self::SENTINEL,
        }
    }
}

impl Serialize for ResolvedUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResolvedUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value == Self::SENTINEL {
            Ok(ResolvedUrl::Unavailable)
        } else {
            Ok(ResolvedUrl::Available(value))
        }
    }
}

/// One listing decoded from the directory API
///
/// Field names map to the API's PascalCase keys. Every field is required:
/// a listing missing any of them fails decoding and is omitted from the
/// result map entirely, as opposed to a manifest failure, which keeps the
/// record with a sentinel URL. Date fields are carried verbatim; the
/// directory's formats are passed through, not reinterpreted.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CatalogItem {
    /// Unique listing identifier
    #[serde(rename = "Id")]
    pub id: AddinId,
    /// Display title
    #[serde(rename = "Title")]
    pub title: String,
    /// Location of the XML manifest holding the download URL
    #[serde(rename = "ManifestUrl")]
    pub manifest_url: String,
    /// Release date, verbatim
    #[serde(rename = "DateReleased")]
    pub date_released: String,
    /// Last-updated date, verbatim
    #[serde(rename = "LastUpdatedDate")]
    pub last_updated: String,
    /// Icon image URL
    #[serde(rename = "IconUrl")]
    pub icon_url: String,
    /// Vote count
    #[serde(rename = "NumberOfVotes")]
    pub votes: i64,
    /// Short description
    #[serde(rename = "ShortDescription")]
    pub description: String,
    /// Requested permissions
    #[serde(rename = "Permissions")]
    pub permissions: Vec<String>,
    /// License terms URL
    #[serde(rename = "LicenseTermsUrl")]
    pub license_url: String,
    /// Privacy policy URL
    #[serde(rename = "PrivacyPolicyUrl")]
    pub privacy_url: String,
    /// Support URL
    #[serde(rename = "SupportUrl")]
    pub support_url: String,
    /// Product identifier
    #[serde(rename = "ProductId")]
    pub product_id: String,
    /// Listing version
    #[serde(rename = "Version")]
    pub version: String,
    /// Average rating
    #[serde(rename = "Rating")]
    pub rating: f64,
    /// Category names
    #[serde(rename = "Categories")]
    pub categories: Vec<String>,
}

/// Output record for one catalog item
///
/// The pass-through listing fields plus the resolved download URL. Field
/// names here are the artifact's JSON keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    /// Display title
    pub title: String,
    /// Resolved download URL, or the sentinel
    pub url: ResolvedUrl,
    /// Release date, verbatim
    pub date_released: String,
    /// Last-updated date, verbatim
    pub last_updated: String,
    /// Icon image URL
    pub icon_url: String,
    /// Vote count
    pub votes: i64,
    /// Short description
    pub description: String,
    /// Requested permissions
    pub permissions: Vec<String>,
    /// License terms URL
    pub license: String,
    /// Privacy policy URL
    pub privacy: String,
    /// Support URL
    pub support: String,
    /// Product identifier
    pub pid: String,
    /// Listing version
    pub version: String,
    /// Average rating
    pub rating: f64,
    /// Category names
    pub categories: Vec<String>,
}

impl ResolvedRecord {
    /// Build the output record from a decoded listing and its resolved URL
    pub fn from_item(item: CatalogItem, url: ResolvedUrl) -> Self {
        Self {
            title: item.title,
            url,
            date_released: item.date_released,
            last_updated: item.last_updated,
            icon_url: item.icon_url,
            votes: item.votes,
            description: item.description,
            permissions: item.permissions,
            license: item.license_url,
            privacy: item.privacy_url,
            support: item.support_url,
            pid: item.product_id,
            version: item.version,
            rating: item.rating,
            categories: item.categories,
        }
    }
}

/// Aggregate result of one harvest run, keyed by listing identifier
///
/// Size is at most the number of scheduled listings; listings whose
/// processing failed entirely are absent, listings whose manifest failed
/// are present with a sentinel URL.
pub type ResultMap = HashMap<AddinId, ResolvedRecord>;

/// Counts and timing for one completed harvest run
#[derive(Clone, Debug, Serialize)]
pub struct HarvestSummary {
    /// Listings returned by the catalog page
    pub listed: usize,
    /// Records with an available download URL
    pub resolved: usize,
    /// Records kept with the sentinel URL
    pub unavailable: usize,
    /// Listings omitted entirely (malformed records)
    pub skipped: usize,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

/// Events emitted during a harvest run
///
/// Delivered over a broadcast channel via
/// [`Harvester::subscribe`](crate::harvester::Harvester::subscribe).
/// Best-effort: with no subscriber, events are dropped.
#[derive(Clone, Debug)]
pub enum Event {
    /// The catalog page was fetched
    CatalogFetched {
        /// Server-reported total listing count (may exceed the page)
        total: u64,
        /// Listings actually returned in this page
        listed: usize,
    },
    /// One listing finished processing and was merged
    ItemCompleted {
        /// Listing identifier
        id: AddinId,
        /// Listing title
        title: String,
        /// Whether the download URL was resolved
        available: bool,
    },
    /// One listing was omitted because its record could not be decoded
    ItemSkipped {
        /// Listing title, when recoverable from the raw record
        title: String,
    },
    /// Progress after each merge
    Progress {
        /// Listings completed so far (merged or skipped)
        completed: usize,
        /// Listings scheduled in total
        total: usize,
    },
    /// The artifact was written
    ResultsWritten {
        /// Output path
        path: PathBuf,
        /// Number of records written
        count: usize,
    },
    /// The artifact write failed; the run still completes
    PersistFailed {
        /// Output path
        path: PathBuf,
        /// Description of the failure
        error: String,
    },
}
