use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::resolve::ResolvedEntry;

pub const OUTPUT_DIR: &str = "output";

#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    domain: &'a str,
    ip: String,
}

pub fn print_entries(entries: &[ResolvedEntry]) {
    println!("[+] Final subdomain list ({}):", entries.len());
    for entry in entries {
        let ip = entry
            .addr
            .map(|a| a.to_string())
            .unwrap_or_else(|| "Unresolved".to_string());
        println!(" - {} ({})", entry.host, ip);
    }
}

/// Newline-delimited hostname list, resolved or not.
pub fn save_txt(entries: &[ResolvedEntry]) -> Result<()> {
    let path = Path::new(OUTPUT_DIR).join("subdomains.txt");
    std::fs::create_dir_all(OUTPUT_DIR)
        .with_context(|| format!("failed to create {}", OUTPUT_DIR))?;

    let mut file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    for entry in entries {
        writeln!(file, "{}", entry.host)?;
    }

    println!("[+] Results saved to {}", path.display());
    Ok(())
}

/// JSON array of `{domain, ip}` objects. Entries without a resolved address
/// are excluded here, independently of the resolver's own filter.
pub fn save_json(entries: &[ResolvedEntry]) -> Result<()> {
    let path = Path::new(OUTPUT_DIR).join("subdomains.json");
    std::fs::create_dir_all(OUTPUT_DIR)
        .with_context(|| format!("failed to create {}", OUTPUT_DIR))?;

    let body = to_json(entries)?;
    std::fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;

    println!("[+] JSON results saved to {}", path.display());
    Ok(())
}

fn to_json(entries: &[ResolvedEntry]) -> Result<String> {
    let resolvable: Vec<JsonEntry<'_>> = entries
        .iter()
        .filter_map(|entry| {
            entry.addr.map(|addr| JsonEntry {
                domain: &entry.host,
                ip: addr.to_string(),
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&resolvable)?)
}
