//! Batch orchestration: one unit of work per (navigation item, offset).

use anyhow::Context;
use futures::future::join_all;

use cardcrawl_core::{CrawlConfig, NavigationItem};
use cardcrawl_scraper::schema::parse_catalog;
use cardcrawl_scraper::{
    catalog_page_url, extract_navigation_items, load_cached_items, normalize_catalog,
    save_cached_items, BatchStore, CatalogClient, ScraperError,
};

/// Running totals for one crawl.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct CrawlSummary {
    pub items: usize,
    /// Units launched, one per page request.
    pub dispatched: usize,
    /// Units that wrote a batch file.
    pub written: usize,
    pub failed: usize,
    /// Rows written across all batches, before deduplication.
    pub products: usize,
}

/// Crawls every navigation item, writing one batch file per successful page.
///
/// Items are processed one after another. All pages of an item are launched
/// together and awaited as a group before the next item starts; a failing
/// page is logged and counted but never stops its siblings. Batch ids start
/// at 1 and increase across the whole crawl.
///
/// # Errors
///
/// Returns an error if navigation items cannot be resolved, the batch
/// directory cannot be reset, or the base URL cannot carry query parameters.
pub(crate) async fn run_crawl(
    config: &CrawlConfig,
    client: &CatalogClient,
) -> anyhow::Result<CrawlSummary> {
    let items = resolve_navigation_items(config, client).await?;
    tracing::info!(count = items.len(), "resolved navigation items");

    let store = BatchStore::new(&config.batch_dir);
    store.reset().await?;

    let mut summary = CrawlSummary {
        items: items.len(),
        ..CrawlSummary::default()
    };
    let mut last_batch_id: u64 = 0;

    for item in &items {
        let filter = item.filter_value();
        let mut units = Vec::new();

        for offset in item.offsets(config.page_size) {
            last_batch_id += 1;
            let batch_id = last_batch_id;
            let url = catalog_page_url(&config.base_url, offset, &filter)?;
            tracing::info!(batch_id, %url, "fetching catalog page");

            let store = &store;
            let subcategory = item.parent_key.as_str();
            units.push(async move {
                let result = process_page(client, store, batch_id, &url, subcategory).await;
                (batch_id, url, result)
            });
        }

        summary.dispatched += units.len();

        for (batch_id, url, result) in join_all(units).await {
            match result {
                Ok(rows) => {
                    summary.written += 1;
                    summary.products += rows;
                }
                Err(e) => {
                    summary.failed += 1;
                    log_page_failure(batch_id, &url, &e);
                }
            }
        }

        tracing::debug!(%filter, count = item.count, "navigation item settled");
    }

    Ok(summary)
}

/// Fetch, validate, normalize, and save one page. Returns the row count.
async fn process_page(
    client: &CatalogClient,
    store: &BatchStore,
    batch_id: u64,
    url: &str,
    subcategory: &str,
) -> Result<usize, ScraperError> {
    let raw = client.fetch_hydration_data(url).await?;
    let catalog = parse_catalog(&raw)?;
    let products = normalize_catalog(&catalog, subcategory);
    store.save(batch_id, &products).await?;
    Ok(products.len())
}

fn log_page_failure(batch_id: u64, url: &str, error: &ScraperError) {
    match error {
        ScraperError::SchemaMismatch { issues } => {
            tracing::warn!(
                batch_id,
                url,
                issue_count = issues.len(),
                "catalog page failed validation; discarding its products"
            );
            for issue in issues {
                tracing::warn!(batch_id, path = %issue.path, problem = %issue.message, "schema mismatch");
            }
        }
        ScraperError::UnexpectedStatus { status, reason, .. } => {
            tracing::warn!(batch_id, url, status, reason = %reason, "catalog page fetch was not successful");
        }
        other => {
            tracing::error!(batch_id, url, error = %other, "catalog page failed");
        }
    }
}

/// Navigation items from the cache when enabled and populated, otherwise
/// from the landing page.
async fn resolve_navigation_items(
    config: &CrawlConfig,
    client: &CatalogClient,
) -> anyhow::Result<Vec<NavigationItem>> {
    let cache_path = config.nav_cache_path.as_path();

    if config.use_nav_cache {
        match load_cached_items(cache_path).await {
            Ok(Some(items)) if !items.is_empty() => {
                tracing::info!(path = %cache_path.display(), "using cached navigation items");
                return Ok(items);
            }
            Ok(_) => {
                tracing::debug!(path = %cache_path.display(), "navigation cache absent or empty");
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable navigation cache");
            }
        }
    }

    let landing = client
        .fetch_hydration_data(&config.base_url)
        .await
        .with_context(|| format!("failed to fetch landing page {}", config.base_url))?;
    let items = extract_navigation_items(&landing)
        .context("could not get navigation items from landing page")?;

    if config.use_nav_cache {
        if let Err(e) = save_cached_items(cache_path, &items).await {
            tracing::warn!(error = %e, "could not write navigation cache");
        }
    }

    Ok(items)
}
