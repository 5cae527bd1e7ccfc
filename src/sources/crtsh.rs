use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::{header, Client};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::debug;

use super::{normalize_candidate, Source};
use crate::constants::{CRTSH_TIMEOUT, USER_AGENTS};
use crate::error::SourceError;

/// Certificate-transparency log search at crt.sh. A single certificate record
/// carries a multi-line name field, so one record can contribute several
/// candidates.
pub struct CrtSh {
    base: String,
}

#[derive(Debug, Deserialize)]
struct CrtShEntry {
    name_value: String,
}

impl CrtSh {
    pub fn new() -> Self {
        Self::with_base_url("https://crt.sh")
    }

    pub fn with_base_url(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for CrtSh {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for CrtSh {
    fn name(&self) -> &'static str {
        "crt.sh"
    }

    async fn query(&self, client: &Client, domain: &str) -> Result<Vec<String>, SourceError> {
        let url = format!("{}/?q=%25.{}&output=json", self.base, domain);
        let user_agent = *USER_AGENTS
            .choose(&mut rand::thread_rng())
            .expect("user agent pool is non-empty");

        debug!(%url, "querying crt.sh");
        let resp = client
            .get(&url)
            .header(header::USER_AGENT, user_agent)
            .header(header::ACCEPT, "application/json")
            .timeout(CRTSH_TIMEOUT)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }

        let entries: Vec<CrtShEntry> = resp.json().await?;
        let mut subs = BTreeSet::new();
        for entry in entries {
            for line in entry.name_value.split('\n') {
                if let Some(host) = normalize_candidate(line, domain) {
                    subs.insert(host);
                }
            }
        }
        Ok(subs.into_iter().collect())
    }
}
