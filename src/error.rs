use thiserror::Error;

/// Everything that can go wrong while querying a single data source. None of
/// these abort the run: `run_source` folds them into a per-source report.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source requires an API key and none was configured. Reported as
    /// skipped rather than failed; no request is made.
    #[error("API key not configured")]
    MissingCredential,

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// Network error, timeout, or undecodable response body.
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}
