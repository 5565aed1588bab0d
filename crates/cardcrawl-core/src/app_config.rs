use std::path::PathBuf;

/// Everything one crawl run needs, passed explicitly into each entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Landing page; paginated catalog requests reuse it with extra query params.
    pub base_url: String,
    pub batch_dir: PathBuf,
    pub output_path: PathBuf,
    pub nav_cache_path: PathBuf,
    /// Read navigation items from `nav_cache_path` when present, and write
    /// them there after deriving them from the landing page.
    pub use_nav_cache: bool,
    /// Deduplicate all batches and write the CSV once crawling finishes.
    pub aggregate: bool,
    pub page_size: u64,
    /// `None` leaves the transport default in place.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub log_level: String,
}
