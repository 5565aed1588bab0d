use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} ({reason}) from {url}")]
    UnexpectedStatus {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("no hydration data element found at {url}")]
    HydrationDataMissing { url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("JSON error for {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("navigation filters not found: missing `{segment}`")]
    NavigationPathMissing { segment: String },

    #[error("catalog payload failed validation with {} issue(s)", issues.len())]
    SchemaMismatch { issues: Vec<SchemaIssue> },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("batch directory {} is missing or not a directory", path.display())]
    BatchDirMissing { path: PathBuf },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One mismatch between a payload and the expected catalog shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Dotted location inside the payload, e.g. `props.pageProps.appProps`.
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
