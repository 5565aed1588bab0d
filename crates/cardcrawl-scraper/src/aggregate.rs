//! Merging of all batch files into one deduplicated product set, and CSV
//! rendering of the result.

use std::collections::HashSet;
use std::path::Path;

use cardcrawl_core::FlatProduct;

use crate::error::ScraperError;

/// Reads every batch file in `dir` and keeps the first product seen for each
/// name.
///
/// Files are visited in directory-listing order, which is not necessarily
/// the order they were written. Entries that are not regular files are
/// skipped, and so is any file that does not hold a JSON array of products
/// (after logging it).
///
/// # Errors
///
/// - [`ScraperError::BatchDirMissing`] — `dir` is absent or not a directory.
/// - [`ScraperError::Io`] — the directory or a batch file cannot be read.
pub async fn aggregate_batches(dir: &Path) -> Result<Vec<FlatProduct>, ScraperError> {
    let is_dir = tokio::fs::metadata(dir)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(ScraperError::BatchDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let mut listing = tokio::fs::read_dir(dir).await.map_err(io_error(dir))?;
    let mut seen: HashSet<String> = HashSet::new();
    let mut products: Vec<FlatProduct> = Vec::new();
    let mut files = 0usize;

    while let Some(entry) = listing.next_entry().await.map_err(io_error(dir))? {
        let path = entry.path();
        let file_type = entry.file_type().await.map_err(io_error(&path))?;
        if !file_type.is_file() {
            continue;
        }

        let raw = tokio::fs::read(&path).await.map_err(io_error(&path))?;
        let batch: Vec<FlatProduct> = match serde_json::from_slice(&raw) {
            Ok(batch) => batch,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "skipping unreadable batch file");
                continue;
            }
        };
        files += 1;

        for product in batch {
            if seen.insert(product.name.clone()) {
                products.push(product);
            }
        }
    }

    tracing::info!(
        dir = %dir.display(),
        files,
        products = products.len(),
        "aggregated batches"
    );
    Ok(products)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ScraperError {
    let path = path.to_path_buf();
    move |source| ScraperError::Io { path, source }
}

/// Renders products as CSV with a fixed header row.
///
/// The header is written even when `products` is empty.
///
/// # Errors
///
/// Returns [`ScraperError::Csv`] if a record cannot be written.
pub fn to_csv(products: &[FlatProduct]) -> Result<String, ScraperError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(FlatProduct::CSV_HEADERS)?;
    for product in products {
        writer.serialize(product)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScraperError::Csv(csv::Error::from(e.into_error())))?;
    // Fields are UTF-8 already.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
