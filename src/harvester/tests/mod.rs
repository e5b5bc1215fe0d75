use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::*;
use crate::config::HarvestConfig;
use crate::manifest::ManifestResolver;
use crate::types::{AddinId, ResolvedUrl};


/// Resolver backed by a fixed manifest-url -> download-url table;
/// locations absent from the table resolve to the sentinel.
struct CannedResolver {
    urls: HashMap<String, String>,
}

#[async_trait]
impl ManifestResolver for CannedResolver {
    async fn resolve(&self, location: &str) -> ResolvedUrl {
        match self.urls.get(location) {
            Some(url) => ResolvedUrl::Available(url.clone()),
            None => ResolvedUrl::Unavailable,
        }
    }
}

fn canned(urls: &[(&str, &str)]) -> Arc<dyn ManifestResolver> {
    Arc::new(CannedResolver {
        urls: urls
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    })
}

/// Build a Harvester around an injected resolver, bypassing `new` so no
/// real endpoint configuration is needed.
fn harvester_with_resolver(
    worker_count: usize,
    resolver: Arc<dyn ManifestResolver>,
) -> Harvester {
    let (event_tx, _rx) = tokio::sync::broadcast::channel(1024);
    Harvester {
        config: Arc::new(Config {
            harvest: HarvestConfig {
                worker_count,
                ..Default::default()
            },
            ..Default::default()
        }),
        client: reqwest::Client::new(),
        resolver,
        event_tx,
    }
}

/// A structurally complete raw listing
fn listing(id: &str, title: &str, manifest_url: &str) -> serde_json::Value {
    json!({
        "Id": id,
        "Title": title,
        "ManifestUrl": manifest_url,
        "DateReleased": "2020-05-01T00:00:00Z",
        "LastUpdatedDate": "2024-03-01T00:00:00Z",
        "IconUrl": format!("https://cdn.example.com/icons/{id}.png"),
        "NumberOfVotes": 7,
        "ShortDescription": format!("{title} description"),
        "Permissions": ["ReadWriteDocument"],
        "LicenseTermsUrl": "https://example.com/license",
        "PrivacyPolicyUrl": "https://example.com/privacy",
        "SupportUrl": "https://example.com/support",
        "ProductId": format!("prod-{id}"),
        "Version": "1.0.0",
        "Rating": 4.0,
        "Categories": ["Productivity"]
    })
}

fn drain_events(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
