use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::debug;

use super::{normalize_candidate, Source};
use crate::constants::SECURITYTRAILS_TIMEOUT;
use crate::error::SourceError;

/// SecurityTrails DNS-history API. Requires an API key. Unlike the archive
/// sources it returns bare subdomain labels, not full hostnames.
pub struct SecurityTrails {
    base: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubdomainsBody {
    #[serde(default)]
    subdomains: Vec<String>,
}

impl SecurityTrails {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url("https://api.securitytrails.com", api_key)
    }

    pub fn with_base_url(base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base: base.into(),
            api_key,
        }
    }
}

#[async_trait]
impl Source for SecurityTrails {
    fn name(&self) -> &'static str {
        "SecurityTrails"
    }

    async fn query(&self, client: &Client, domain: &str) -> Result<Vec<String>, SourceError> {
        let api_key = self.api_key.as_deref().ok_or(SourceError::MissingCredential)?;
        let url = format!("{}/v1/domain/{}/subdomains", self.base, domain);

        debug!(%url, "querying SecurityTrails");
        let resp = client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .header("APIKEY", api_key)
            .timeout(SECURITYTRAILS_TIMEOUT)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }

        let body: SubdomainsBody = resp.json().await?;
        let mut subs = BTreeSet::new();
        for label in body.subdomains {
            // Wildcard labels are dropped before the join, everything else
            // becomes a full hostname.
            if label.starts_with('*') {
                continue;
            }
            if let Some(host) = normalize_candidate(&format!("{}.{}", label, domain), domain) {
                subs.insert(host);
            }
        }
        Ok(subs.into_iter().collect())
    }
}
