pub mod args;
mod aggregate;
mod config;
mod constants;
mod error;
mod reporting;
mod resolve;
mod sources;

pub use aggregate::{merge_reports, Aggregation, UniqueRecord};
pub use args::{Args, OutputFormat};
pub use config::ApiKeys;
pub use error::SourceError;
pub use resolve::ResolvedEntry;
pub use sources::{
    default_sources, run_source, AlienVault, Anubis, CrtSh, DnsDumpster, SecurityTrails, Source,
    SourceOutcome, SourceReport, Wayback,
};

use anyhow::{bail, Context, Result};
use futures::future::join_all;
use reqwest::{redirect::Policy, Client};
use tokio::time::Duration;

use resolve::{create_resolver, resolve_records};

pub async fn run(args: Args) -> Result<()> {
    let targets = load_targets(&args)?;
    let keys = ApiKeys::from_env();

    let client = Client::builder()
        .redirect(Policy::limited(2))
        .danger_accept_invalid_certs(false)
        .pool_idle_timeout(Some(Duration::from_secs(30)))
        .build()?;
    let resolver = create_resolver()?;

    for domain in &targets {
        println!("[*] Enumerating subdomains for: {}", domain);

        let sources = default_sources(&keys);
        // Sources run concurrently, but join_all yields the reports in
        // registry order, so first-seen attribution stays deterministic.
        let reports = join_all(
            sources
                .iter()
                .map(|source| run_source(source.as_ref(), &client, domain)),
        )
        .await;

        for report in &reports {
            match &report.outcome {
                SourceOutcome::Found => {
                    println!(
                        "[+] {} found {} subdomains",
                        report.source,
                        report.candidates.len()
                    );
                }
                SourceOutcome::Skipped => {
                    println!("[-] {} skipped (no API key configured)", report.source);
                }
                SourceOutcome::Failed(err) => {
                    println!("[!] {} failed: {}", report.source, err);
                }
            }
        }

        let aggregation = merge_reports(&reports);
        println!(
            "[+] Total combined unique subdomains: {}",
            aggregation.records.len()
        );
        for (source, count) in &aggregation.stats {
            println!("[+] Unique to {} (first seen): {}", source, count);
        }

        let entries = resolve_records(
            &resolver,
            aggregation.records,
            args.check,
            args.concurrency,
        )
        .await;

        if entries.is_empty() {
            println!("[-] No valid subdomains found.");
            continue;
        }

        match args.output {
            Some(OutputFormat::Json) => reporting::save_json(&entries)?,
            None => {
                reporting::print_entries(&entries);
                if args.save {
                    reporting::save_txt(&entries)?;
                }
            }
        }
    }

    Ok(())
}

/// Collect target domains from the positional argument and the optional list
/// file. An unreadable or empty input is the only fatal error in the whole
/// pipeline.
pub fn load_targets(args: &Args) -> Result<Vec<String>> {
    let mut targets = Vec::new();

    if let Some(domain) = &args.domain {
        targets.push(domain.clone());
    }

    if let Some(path) = &args.list {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read target list {}", path.display()))?;
        targets.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }

    if targets.is_empty() {
        bail!("no target domain given; pass a DOMAIN argument or --list FILE");
    }

    Ok(targets)
}
