pub mod aggregate;
pub mod batch;
pub mod client;
pub mod error;
pub mod navigation;
pub mod normalize;
pub mod schema;

pub use aggregate::{aggregate_batches, to_csv};
pub use batch::BatchStore;
pub use client::{catalog_page_url, CatalogClient};
pub use error::{SchemaIssue, ScraperError};
pub use navigation::{extract_navigation_items, load_cached_items, save_cached_items};
pub use normalize::normalize_catalog;
pub use schema::{validate_catalog, CatalogEntry, ValidatedCatalog};
