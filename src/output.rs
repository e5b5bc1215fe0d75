//! Result persistence — one pretty-printed JSON artifact per run.

use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::types::ResultMap;

/// Write the result map as pretty-printed JSON, overwriting `path`.
///
/// # Errors
/// Returns [`Error::Serialization`] if the map cannot be encoded and
/// [`Error::Io`] (with the path in the message) if the write fails. The
/// caller treats either as non-fatal; the map already exists in memory.
pub async fn write_results(map: &ResultMap, path: &Path) -> Result<()> {
    let body = serde_json::to_vec_pretty(map)?;

    tokio::fs::write(path, body).await.map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("failed to write results to '{}': {}", path.display(), e),
        ))
    })?;

    info!(path = %path.display(), entries = map.len(), "results written");
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AddinId, ResolvedRecord, ResolvedUrl};
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn record(title: &str, url: ResolvedUrl) -> ResolvedRecord {
        ResolvedRecord {
            title: title.to_string(),
            url,
            date_released: "2020-01-01T00:00:00Z".to_string(),
            last_updated: "2024-01-01T00:00:00Z".to_string(),
            icon_url: "https://cdn.example.com/icon.png".to_string(),
            votes: 3,
            description: "a test add-in".to_string(),
            permissions: vec!["ReadDocument".to_string()],
            license: "https://example.com/license".to_string(),
            privacy: "https://example.com/privacy".to_string(),
            support: "https://example.com/support".to_string(),
            pid: "prod-9".to_string(),
            version: "2.0".to_string(),
            rating: 3.5,
            categories: vec!["Productivity".to_string()],
        }
    }

    #[tokio::test]
    async fn writes_map_and_reads_back_identically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parsed.json");

        let mut map: ResultMap = HashMap::new();
        map.insert(
            AddinId::from("WA1"),
            record("One", ResolvedUrl::Available("http://x/one.exe".into())),
        );
        map.insert(AddinId::from("WA2"), record("Two", ResolvedUrl::Unavailable));

        write_results(&map, &path).await.unwrap();

        let body = tokio::fs::read_to_string(&path).await.unwrap();
        let back: ResultMap = serde_json::from_str(&body).unwrap();
        assert_eq!(back, map);
    }

    #[tokio::test]
    async fn output_is_pretty_printed_with_sentinel() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parsed.json");

        let mut map: ResultMap = HashMap::new();
        map.insert(AddinId::from("WA2"), record("Two", ResolvedUrl::Unavailable));

        write_results(&map, &path).await.unwrap();

        let body = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(body.contains('\n'), "expected pretty-printed output");
        assert!(body.contains("\"url\": \"n/a\""));
    }

    #[tokio::test]
    async fn overwrites_prior_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parsed.json");
        tokio::fs::write(&path, "stale contents").await.unwrap();

        let map: ResultMap = HashMap::new();
        write_results(&map, &path).await.unwrap();

        let body = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(body, "{}");
    }

    #[tokio::test]
    async fn write_failure_reports_the_path() {
        let map: ResultMap = HashMap::new();
        let path = Path::new("/nonexistent-dir/definitely/parsed.json");

        let err = write_results(&map, path).await.unwrap_err();
        assert!(err.to_string().contains("parsed.json"));
    }
}
