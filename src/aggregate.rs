use std::collections::HashSet;

use crate::sources::SourceReport;

/// A candidate that was the first occurrence across all sources, tagged with
/// the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueRecord {
    pub host: String,
    pub source: &'static str,
}

#[derive(Debug, Clone)]
pub struct Aggregation {
    /// Per-source first-seen subsets concatenated in source order. Not a
    /// global sort.
    pub records: Vec<UniqueRecord>,
    /// First-seen counts, one row per source in the same order, including
    /// sources that found nothing.
    pub stats: Vec<(&'static str, usize)>,
}

/// Merge buffered source reports with a first-seen-wins policy: a hostname is
/// attributed to the earliest report that produced it, and later duplicates
/// contribute neither a record nor a stats increment. Matching is exact and
/// case-sensitive.
pub fn merge_reports(reports: &[SourceReport]) -> Aggregation {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut records = Vec::new();
    let mut stats = Vec::with_capacity(reports.len());

    for report in reports {
        let mut first_seen = 0usize;
        for host in &report.candidates {
            if seen.insert(host) {
                records.push(UniqueRecord {
                    host: host.clone(),
                    source: report.source,
                });
                first_seen += 1;
            }
        }
        stats.push((report.source, first_seen));
    }

    Aggregation { records, stats }
}
