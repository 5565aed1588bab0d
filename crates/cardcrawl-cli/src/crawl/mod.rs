//! Crawl and aggregation command handlers for the CLI.
//!
//! Per-page failures are logged and skipped rather than propagated so a
//! single broken page does not abort the full crawl. Failing to derive the
//! navigation items, or to aggregate at the end, fails the run.

mod runner;

use std::path::PathBuf;

use anyhow::Context;
use cardcrawl_core::CrawlConfig;
use cardcrawl_scraper::{aggregate_batches, to_csv, CatalogClient};

use runner::run_crawl;

/// Builds the catalog client from config.
pub(crate) fn build_catalog_client(config: &CrawlConfig) -> anyhow::Result<CatalogClient> {
    CatalogClient::new(config.request_timeout_secs, &config.user_agent)
        .context("failed to build catalog client")
}

/// Crawls every navigation item and, when enabled, writes the aggregated CSV.
///
/// # Errors
///
/// Returns an error if navigation items cannot be resolved, the batch
/// directory cannot be reset, or aggregation fails.
pub(crate) async fn run_crawl_command(config: &CrawlConfig) -> anyhow::Result<()> {
    let client = build_catalog_client(config)?;
    let summary = run_crawl(config, &client).await?;

    tracing::info!(
        items = summary.items,
        dispatched = summary.dispatched,
        written = summary.written,
        failed = summary.failed,
        products = summary.products,
        "crawl finished"
    );

    if config.aggregate {
        write_csv(config).await?;
    } else {
        tracing::info!(
            batch_dir = %config.batch_dir.display(),
            "aggregation disabled; leaving batches in place"
        );
    }

    Ok(())
}

/// Deduplicates every batch into one CSV at `config.output_path`.
///
/// # Errors
///
/// Returns an error if the batch directory is missing, the CSV cannot be
/// rendered, or the output file cannot be written.
pub(crate) async fn write_csv(config: &CrawlConfig) -> anyhow::Result<PathBuf> {
    let products = aggregate_batches(&config.batch_dir)
        .await
        .context("could not aggregate batches into CSV")?;
    let csv = to_csv(&products)?;

    if let Some(parent) = config
        .output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(&config.output_path, csv)
        .await
        .with_context(|| format!("failed to write {}", config.output_path.display()))?;

    tracing::info!(
        path = %config.output_path.display(),
        products = products.len(),
        "wrote CSV"
    );
    Ok(config.output_path.clone())
}

#[cfg(test)]
#[path = "crawl_test.rs"]
mod tests;
