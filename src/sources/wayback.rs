use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeSet;
use tracing::debug;

use super::{normalize_candidate, Source};
use crate::constants::{PROTOCOL_PREFIX, WAYBACK_TIMEOUT};
use crate::error::SourceError;

/// Wayback Machine CDX index. The response is tabular: the first row is a
/// header, each remaining row's first column is an archived URL.
pub struct Wayback {
    base: String,
}

impl Wayback {
    pub fn new() -> Self {
        Self::with_base_url("http://web.archive.org")
    }

    pub fn with_base_url(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for Wayback {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for Wayback {
    fn name(&self) -> &'static str {
        "Wayback"
    }

    async fn query(&self, client: &Client, domain: &str) -> Result<Vec<String>, SourceError> {
        let url = format!(
            "{}/cdx/search/cdx?url=*.{}&output=json&fl=original",
            self.base, domain
        );

        debug!(%url, "querying the Wayback Machine");
        let resp = client.get(&url).timeout(WAYBACK_TIMEOUT).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }

        let rows: Vec<Vec<String>> = resp.json().await?;
        if rows.len() < 2 {
            return Ok(Vec::new());
        }

        let mut subs = BTreeSet::new();
        for row in &rows[1..] {
            let Some(original) = row.first() else { continue };
            let stripped = PROTOCOL_PREFIX.replace(original, "");
            let host = stripped.split('/').next().unwrap_or("");
            if let Some(host) = normalize_candidate(host, domain) {
                subs.insert(host);
            }
        }
        Ok(subs.into_iter().collect())
    }
}
