use std::future::Future;
use std::net::IpAddr;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tokio::time::timeout;
use trust_dns_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use crate::aggregate::UniqueRecord;
use crate::constants::DNS_TIMEOUT;

/// A deduplicated hostname paired with its resolution outcome. `addr` is the
/// first address returned by the lookup, or `None` when resolution failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub host: String,
    pub source: &'static str,
    pub addr: Option<IpAddr>,
}

pub fn create_resolver() -> anyhow::Result<TokioAsyncResolver> {
    let mut config = ResolverConfig::default();
    config.add_name_server(NameServerConfig {
        socket_addr: "8.8.8.8:53".parse()?,
        protocol: Protocol::Udp,
        tls_dns_name: None,
        trust_negative_responses: false,
        bind_addr: None,
    });

    let opts = ResolverOpts::default();

    Ok(TokioAsyncResolver::tokio(config, opts))
}

/// Resolve every record once, in parallel, keeping the input order. With
/// `filter_unresolvable` set, records whose lookup failed are dropped;
/// otherwise they are kept with an absent address.
pub async fn resolve_records(
    resolver: &TokioAsyncResolver,
    records: Vec<UniqueRecord>,
    filter_unresolvable: bool,
    max_concurrency: usize,
) -> Vec<ResolvedEntry> {
    let resolver = resolver.clone();
    resolve_with(records, filter_unresolvable, max_concurrency, move |host| {
        let resolver = resolver.clone();
        async move {
            match timeout(DNS_TIMEOUT, resolver.lookup_ip(host)).await {
                Ok(Ok(lookup)) => lookup.iter().next(),
                _ => None,
            }
        }
    })
    .await
}

// Lookups complete in arbitrary order; each task writes its result back at
// the caller's index so the output never depends on completion order.
async fn resolve_with<F, Fut>(
    records: Vec<UniqueRecord>,
    filter_unresolvable: bool,
    max_concurrency: usize,
    lookup: F,
) -> Vec<ResolvedEntry>
where
    F: Fn(String) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = Option<IpAddr>> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut tasks = FuturesUnordered::new();

    for (idx, record) in records.iter().enumerate() {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("semaphore unexpectedly closed");
        let lookup = lookup.clone();
        let host = record.host.clone();

        tasks.push(tokio::spawn(async move {
            let addr = lookup(host).await;
            drop(permit);
            (idx, addr)
        }));
    }

    let mut addrs: Vec<Option<IpAddr>> = vec![None; records.len()];
    while let Some(res) = tasks.next().await {
        if let Ok((idx, addr)) = res {
            addrs[idx] = addr;
        }
    }

    records
        .into_iter()
        .zip(addrs)
        .filter_map(|(record, addr)| {
            if filter_unresolvable && addr.is_none() {
                return None;
            }
            Some(ResolvedEntry {
                host: record.host,
                source: record.source,
                addr,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn records(hosts: &[&str]) -> Vec<UniqueRecord> {
        hosts
            .iter()
            .map(|h| UniqueRecord {
                host: h.to_string(),
                source: "test",
            })
            .collect()
    }

    // Slower lookups for earlier records: completion order is the reverse of
    // input order.
    fn staggered_lookup(
        host: String,
    ) -> impl Future<Output = Option<IpAddr>> + Send + 'static {
        async move {
            let (addr, delay_ms) = match host.as_str() {
                "api.example.com" => (Some("10.0.0.1".parse().unwrap()), 30),
                "www.example.com" => (None, 20),
                "mail.example.com" => (Some("10.0.0.3".parse().unwrap()), 10),
                _ => (None, 0),
            };
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            addr
        }
    }

    #[tokio::test]
    async fn preserves_input_order_under_latency_variance() {
        let input = records(&["api.example.com", "www.example.com", "mail.example.com"]);
        let entries = resolve_with(input, false, 8, staggered_lookup).await;

        let hosts: Vec<&str> = entries.iter().map(|e| e.host.as_str()).collect();
        assert_eq!(
            hosts,
            ["api.example.com", "www.example.com", "mail.example.com"]
        );
        assert_eq!(entries[0].addr, Some("10.0.0.1".parse().unwrap()));
        assert_eq!(entries[1].addr, None);
        assert_eq!(entries[2].addr, Some("10.0.0.3".parse().unwrap()));
    }

    #[tokio::test]
    async fn filtering_drops_exactly_the_unresolved_entries() {
        let input = records(&["api.example.com", "www.example.com", "mail.example.com"]);

        let kept = resolve_with(input.clone(), false, 8, staggered_lookup).await;
        let filtered = resolve_with(input, true, 8, staggered_lookup).await;

        let expected: Vec<ResolvedEntry> = kept
            .iter()
            .filter(|e| e.addr.is_some())
            .cloned()
            .collect();
        assert_eq!(filtered, expected);
        assert_eq!(filtered.len(), 2);
    }

    #[tokio::test]
    async fn unfiltered_output_keeps_every_record_once() {
        let input = records(&["www.example.com", "nope.example.com"]);
        let entries = resolve_with(input, false, 2, staggered_lookup).await;
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.addr.is_none()));
    }

    #[tokio::test]
    async fn serial_concurrency_still_preserves_order() {
        let input = records(&["api.example.com", "www.example.com", "mail.example.com"]);
        let entries = resolve_with(input, false, 1, staggered_lookup).await;
        let hosts: Vec<&str> = entries.iter().map(|e| e.host.as_str()).collect();
        assert_eq!(
            hosts,
            ["api.example.com", "www.example.com", "mail.example.com"]
        );
    }
}
