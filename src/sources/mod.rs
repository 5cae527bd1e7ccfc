mod alienvault;
mod anubis;
mod crtsh;
mod dnsdumpster;
mod securitytrails;
mod wayback;

pub use alienvault::AlienVault;
pub use anubis::Anubis;
pub use crtsh::CrtSh;
pub use dnsdumpster::DnsDumpster;
pub use securitytrails::SecurityTrails;
pub use wayback::Wayback;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::ApiKeys;
use crate::error::SourceError;

/// One passive data source. `query` returns the candidate hostnames the
/// source knows for `domain`, already normalized, deduplicated and sorted.
#[async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &'static str;

    async fn query(&self, client: &Client, domain: &str) -> Result<Vec<String>, SourceError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Found,
    /// Credential missing; the source made no request.
    Skipped,
    Failed(String),
}

/// The buffered result of one source invocation, consumed by the aggregator.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub source: &'static str,
    pub candidates: Vec<String>,
    pub outcome: SourceOutcome,
}

/// Query a source and fold any failure into the report. Errors never cross
/// this boundary: a missing credential becomes a skip, anything else a
/// failure with zero candidates, and the remaining sources keep running.
pub async fn run_source(source: &dyn Source, client: &Client, domain: &str) -> SourceReport {
    match source.query(client, domain).await {
        Ok(candidates) => SourceReport {
            source: source.name(),
            candidates,
            outcome: SourceOutcome::Found,
        },
        Err(SourceError::MissingCredential) => {
            debug!(source = source.name(), "skipped: no API key");
            SourceReport {
                source: source.name(),
                candidates: Vec::new(),
                outcome: SourceOutcome::Skipped,
            }
        }
        Err(err) => {
            debug!(source = source.name(), error = %err, "query failed");
            SourceReport {
                source: source.name(),
                candidates: Vec::new(),
                outcome: SourceOutcome::Failed(err.to_string()),
            }
        }
    }
}

/// The fixed source order. It decides first-seen attribution, so changing it
/// changes the output.
pub fn default_sources(keys: &ApiKeys) -> Vec<Box<dyn Source>> {
    vec![
        Box::new(CrtSh::new()),
        Box::new(SecurityTrails::new(keys.securitytrails.clone())),
        Box::new(AlienVault::new()),
        Box::new(Anubis::new()),
        Box::new(DnsDumpster::new(keys.dnsdumpster.clone())),
        Box::new(Wayback::new()),
    ]
}

/// Shared acceptance rule: trim, reject wildcard patterns, and require the
/// queried domain as a plain string suffix. The suffix test is intentionally
/// not label-aware; it mirrors the behavior the downstream tooling expects.
pub(crate) fn normalize_candidate(raw: &str, domain: &str) -> Option<String> {
    let host = raw.trim();
    if host.starts_with("*.") || !host.ends_with(domain) {
        return None;
    }
    Some(host.to_string())
}
