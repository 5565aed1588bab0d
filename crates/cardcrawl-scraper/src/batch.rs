//! One JSON file per fetched page, written independently so a failed page
//! never costs the ones already saved.

use std::path::{Path, PathBuf};

use cardcrawl_core::FlatProduct;

use crate::error::ScraperError;

/// Directory of `{batch_id}.json` files, each a JSON array of [`FlatProduct`].
///
/// Concurrent writers never collide as long as each uses its own batch id.
#[derive(Debug, Clone)]
pub struct BatchStore {
    dir: PathBuf,
}

impl BatchStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn batch_path(&self, batch_id: u64) -> PathBuf {
        self.dir.join(format!("{batch_id}.json"))
    }

    /// Removes batches left over from a previous run.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Io`] if an existing directory cannot be removed.
    pub async fn reset(&self) -> Result<(), ScraperError> {
        match tokio::fs::remove_dir_all(&self.dir).await {
            Ok(()) => {
                tracing::debug!(dir = %self.dir.display(), "removed stale batch directory");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ScraperError::Io {
                path: self.dir.clone(),
                source,
            }),
        }
    }

    /// Writes one batch, creating the directory on first use.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Io`] — the directory or file cannot be written.
    /// - [`ScraperError::Json`] — the products cannot be serialized.
    pub async fn save(
        &self,
        batch_id: u64,
        products: &[FlatProduct],
    ) -> Result<PathBuf, ScraperError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ScraperError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.batch_path(batch_id);
        let body = serde_json::to_vec(products).map_err(|e| ScraperError::Json {
            context: format!("batch {batch_id}"),
            source: e,
        })?;
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| ScraperError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(batch_id, path = %path.display(), products = products.len(), "saved batch");
        Ok(path)
    }
}
