use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeSet;
use tracing::debug;

use super::{normalize_candidate, Source};
use crate::constants::ANUBIS_TIMEOUT;
use crate::error::SourceError;

/// AnubisDB passive-DNS archive; the response is a bare array of hostnames.
pub struct Anubis {
    base: String,
}

impl Anubis {
    pub fn new() -> Self {
        Self::with_base_url("https://anubisdb.com")
    }

    pub fn with_base_url(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for Anubis {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for Anubis {
    fn name(&self) -> &'static str {
        "Anubis"
    }

    async fn query(&self, client: &Client, domain: &str) -> Result<Vec<String>, SourceError> {
        let url = format!("{}/anubis/subdomains/{}", self.base, domain);

        debug!(%url, "querying Anubis");
        let resp = client.get(&url).timeout(ANUBIS_TIMEOUT).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }

        let hosts: Vec<String> = resp.json().await?;
        let subs: BTreeSet<String> = hosts
            .iter()
            .filter_map(|host| normalize_candidate(host, domain))
            .collect();
        Ok(subs.into_iter().collect())
    }
}
