use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::debug;

use super::{normalize_candidate, Source};
use crate::constants::DNSDUMPSTER_TIMEOUT;
use crate::error::SourceError;

/// DNSDumpster passive-DNS API. Requires an API key; without one the source
/// skips itself before any request goes out.
pub struct DnsDumpster {
    base: String,
    api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DnsDumpsterBody {
    #[serde(default)]
    a: Vec<HostRecord>,
    #[serde(default)]
    cname: Vec<HostRecord>,
    #[serde(default)]
    mx: Vec<HostRecord>,
    #[serde(default)]
    ns: Vec<HostRecord>,
}

#[derive(Debug, Deserialize)]
struct HostRecord {
    host: Option<String>,
}

impl DnsDumpster {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url("https://api.dnsdumpster.com", api_key)
    }

    pub fn with_base_url(base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base: base.into(),
            api_key,
        }
    }
}

#[async_trait]
impl Source for DnsDumpster {
    fn name(&self) -> &'static str {
        "DNSDumpster"
    }

    async fn query(&self, client: &Client, domain: &str) -> Result<Vec<String>, SourceError> {
        let api_key = self.api_key.as_deref().ok_or(SourceError::MissingCredential)?;
        let url = format!("{}/domain/{}", self.base, domain);

        debug!(%url, "querying DNSDumpster");
        let resp = client
            .get(&url)
            .header("X-API-Key", api_key)
            .timeout(DNSDUMPSTER_TIMEOUT)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }

        let body: DnsDumpsterBody = resp.json().await?;
        let mut subs = BTreeSet::new();
        for record in body
            .a
            .iter()
            .chain(&body.cname)
            .chain(&body.mx)
            .chain(&body.ns)
        {
            if let Some(host) = record.host.as_deref().and_then(|h| normalize_candidate(h, domain)) {
                subs.insert(host);
            }
        }
        Ok(subs.into_iter().collect())
    }
}
