//! Manifest fetching and download-URL extraction.
//!
//! Each catalog listing points at a small XML manifest; the download URL
//! is the `DefaultValue` attribute of the `SourceLocation` element nested
//! inside `DefaultSettings`. Every fetch or parse failure is downgraded to
//! [`ResolvedUrl::Unavailable`] at this boundary, so one bad manifest
//! never aborts the batch or drops the item's remaining metadata.

use crate::error::ResolveError;
use crate::types::ResolvedUrl;
use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event as XmlEvent};
use tracing::{debug, warn};

/// Resolves a manifest location to a download URL.
///
/// The injection seam between the fan-out coordinator and the network:
/// production uses [`HttpManifestResolver`], tests substitute a canned
/// implementation.
#[async_trait]
pub trait ManifestResolver: Send + Sync {
    /// Resolve the download URL referenced by a manifest location.
    ///
    /// Never fails: resolution errors are logged and collapsed into
    /// [`ResolvedUrl::Unavailable`].
    async fn resolve(&self, location: &str) -> ResolvedUrl;
}

/// Production resolver: one HTTP GET per manifest over a shared client.
///
/// Safe to invoke concurrently from many workers; the shared client's
/// connection pool is the only shared state. Applies the client's
/// per-request timeout and makes exactly one attempt per manifest.
#[derive(Clone)]
pub struct HttpManifestResolver {
    client: reqwest::Client,
}

impl HttpManifestResolver {
    /// Create a resolver over an existing HTTP client
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch and parse one manifest, surfacing the failure itself.
    ///
    /// [`ManifestResolver::resolve`] wraps this and substitutes the
    /// sentinel; callers that need to distinguish failure modes can use
    /// this directly.
    pub async fn try_resolve(&self, location: &str) -> Result<String, ResolveError> {
        let response =
            self.client
                .get(location)
                .send()
                .await
                .map_err(|source| ResolveError::Fetch {
                    url: location.to_string(),
                    source,
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                url: location.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ResolveError::Fetch {
                url: location.to_string(),
                source,
            })?;

        extract_source_location(&body).map_err(|reason| ResolveError::Parse {
            url: location.to_string(),
            reason,
        })
    }
}

#[async_trait]
impl ManifestResolver for HttpManifestResolver {
    async fn resolve(&self, location: &str) -> ResolvedUrl {
        match self.try_resolve(location).await {
            Ok(url) => {
                debug!(url = %location, "manifest resolved");
                ResolvedUrl::Available(url)
            }
            Err(e) => {
                warn!(url = %location, error = %e, "manifest resolution failed");
                ResolvedUrl::Unavailable
            }
        }
    }
}

/// Extract the download URL from a manifest document.
///
/// Looks for the first `SourceLocation` element nested (at any depth)
/// inside `DefaultSettings` and returns its `DefaultValue` attribute.
/// Namespace prefixes are ignored; matching is on local names. The first
/// matching `SourceLocation` decides: if it lacks the attribute, that is a
/// parse failure, not a reason to keep scanning.
fn extract_source_location(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    // depth within DefaultSettings; 0 = not inside
    let mut settings_depth: usize = 0;

    loop {
        match reader.read_event() {
            Ok(XmlEvent::Start(e)) => {
                if settings_depth > 0 {
                    settings_depth += 1;
                    if e.local_name().as_ref() == b"SourceLocation" {
                        return default_value_attr(&e);
                    }
                } else if e.local_name().as_ref() == b"DefaultSettings" {
                    settings_depth = 1;
                }
            }
            Ok(XmlEvent::Empty(e)) => {
                if settings_depth > 0 && e.local_name().as_ref() == b"SourceLocation" {
                    return default_value_attr(&e);
                }
            }
            Ok(XmlEvent::End(_)) => {
                if settings_depth > 0 {
                    settings_depth -= 1;
                }
            }
            Ok(XmlEvent::Eof) => {
                return Err("no SourceLocation element inside DefaultSettings".to_string());
            }
            Err(e) => return Err(format!("malformed XML: {e}")),
            Ok(_) => {}
        }
    }
}

fn default_value_attr(element: &BytesStart<'_>) -> Result<String, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| format!("malformed attribute: {e}"))?;
        if attr.key.local_name().as_ref() == b"DefaultValue" {
            return attr
                .unescape_value()
                .map(|value| value.into_owned())
                .map_err(|e| format!("invalid DefaultValue attribute: {e}"));
        }
    }
    Err("SourceLocation element has no DefaultValue attribute".to_string())
}
