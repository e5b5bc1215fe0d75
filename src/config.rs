//! Configuration types for addin-harvest

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Directory API settings (endpoint and query parameters)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory search endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Market / region code sent as the `ad` query parameter (default: "US")
    #[serde(default = "default_market")]
    pub market: String,

    /// API version sent as the `apiversion` query parameter (default: "1.0")
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Client identifier sent as the `client` query parameter
    #[serde(default = "default_client")]
    pub client: String,

    /// Maximum number of listings requested, sent as `top` (default: 1000)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            market: default_market(),
            api_version: default_api_version(),
            client: default_client(),
            page_size: default_page_size(),
        }
    }
}

/// Resolution behavior (concurrency and timeouts)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Maximum concurrent manifest fetches (default: 10)
    ///
    /// Listings beyond this cap queue until a worker frees up, bounding
    /// simultaneous outbound connections. A value of 0 is treated as 1.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Per-request timeout for every outbound fetch (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// Artifact settings
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON artifact; overwritten on every run
    /// (default: "parsed.json")
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
        }
    }
}

/// Main configuration for the harvester
///
/// Sub-config fields are flattened, so the serialized form is a single
/// flat object with no nesting.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory API settings
    #[serde(flatten)]
    pub catalog: CatalogConfig,

    /// Resolution behavior
    #[serde(flatten)]
    pub harvest: HarvestConfig,

    /// Artifact settings
    #[serde(flatten)]
    pub output: OutputConfig,
}

fn default_base_url() -> String {
    "https://store.office.com/api/addins/search".to_string()
}

fn default_market() -> String {
    "US".to_string()
}

fn default_api_version() -> String {
    "1.0".to_string()
}

fn default_client() -> String {
    "Any_PowerBI".to_string()
}

fn default_page_size() -> u32 {
    1000
}

fn default_worker_count() -> usize {
    10
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_output_file() -> PathBuf {
    PathBuf::from("parsed.json")
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(
            config.catalog.base_url,
            "https://store.office.com/api/addins/search"
        );
        assert_eq!(config.catalog.market, "US");
        assert_eq!(config.catalog.api_version, "1.0");
        assert_eq!(config.catalog.client, "Any_PowerBI");
        assert_eq!(config.catalog.page_size, 1000);
        assert_eq!(config.harvest.worker_count, 10);
        assert_eq!(config.harvest.request_timeout, Duration::from_secs(30));
        assert_eq!(config.output.output_file, PathBuf::from("parsed.json"));
    }

    #[test]
    fn empty_object_deserializes_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.harvest.worker_count, 10);
        assert_eq!(config.catalog.market, "US");
    }

    #[test]
    fn serialized_form_is_flat() {
        let value = serde_json::to_value(Config::default()).unwrap();
        assert!(value.get("base_url").is_some());
        assert!(value.get("worker_count").is_some());
        assert!(value.get("output_file").is_some());
        assert!(value.get("catalog").is_none());
    }

    #[test]
    fn request_timeout_round_trips_as_seconds() {
        let config = Config {
            harvest: HarvestConfig {
                worker_count: 4,
                request_timeout: Duration::from_secs(5),
            },
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["request_timeout"], 5);

        let back: Config = serde_json::from_value(json).unwrap();
        assert_eq!(back.harvest.request_timeout, Duration::from_secs(5));
        assert_eq!(back.harvest.worker_count, 4);
    }
}
