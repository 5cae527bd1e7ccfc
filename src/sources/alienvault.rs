use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::debug;

use super::{normalize_candidate, Source};
use crate::constants::ALIENVAULT_TIMEOUT;
use crate::error::SourceError;

/// AlienVault OTX passive-DNS archive.
pub struct AlienVault {
    base: String,
}

#[derive(Debug, Deserialize)]
struct PassiveDnsBody {
    #[serde(default)]
    passive_dns: Vec<PassiveDnsRecord>,
}

#[derive(Debug, Deserialize)]
struct PassiveDnsRecord {
    hostname: Option<String>,
}

impl AlienVault {
    pub fn new() -> Self {
        Self::with_base_url("https://otx.alienvault.com")
    }

    pub fn with_base_url(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for AlienVault {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for AlienVault {
    fn name(&self) -> &'static str {
        "AlienVault"
    }

    async fn query(&self, client: &Client, domain: &str) -> Result<Vec<String>, SourceError> {
        let url = format!("{}/api/v1/indicators/domain/{}/passive_dns", self.base, domain);

        debug!(%url, "querying AlienVault OTX");
        let resp = client.get(&url).timeout(ALIENVAULT_TIMEOUT).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }

        let body: PassiveDnsBody = resp.json().await?;
        let mut subs = BTreeSet::new();
        for record in body.passive_dns {
            if let Some(host) = record.hostname.as_deref().and_then(|h| normalize_candidate(h, domain)) {
                subs.insert(host);
            }
        }
        Ok(subs.into_iter().collect())
    }
}
