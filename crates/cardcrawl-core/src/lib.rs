pub mod app_config;
pub mod config;
pub mod products;

pub use app_config::CrawlConfig;
pub use config::{load_crawl_config, load_crawl_config_from_env};
pub use products::{FlatProduct, NavigationItem};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
