//! HTTP client for server-rendered catalog pages.

mod hydration;

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

pub use hydration::extract_hydration_data;

/// Fetches catalog pages and pulls out their embedded hydration JSON.
///
/// One GET per call, no retries. Non-2xx responses come back as typed errors
/// so the caller decides whether to log and continue or abort.
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with an optional request timeout and the
    /// given `User-Agent`.
    ///
    /// With `timeout_secs` set to `None` the transport default applies.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: Option<u64>, user_agent: &str) -> Result<Self, ScraperError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetches `url` and returns the raw text of its hydration data element.
    ///
    /// A body that cannot be decoded is logged and treated as empty, which
    /// then surfaces as [`ScraperError::HydrationDataMissing`].
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] — network or TLS failure.
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status.
    /// - [`ScraperError::HydrationDataMissing`] — the page has no (or an empty)
    ///   hydration data element.
    pub async fn fetch_hydration_data(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_owned(),
                url: url.to_owned(),
            });
        }

        let html = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(url, error = %e, "could not decode response body");
                String::new()
            }
        };

        extract_hydration_data(&html).ok_or_else(|| ScraperError::HydrationDataMissing {
            url: url.to_owned(),
        })
    }
}

/// Builds the paginated catalog URL for one facet and offset.
///
/// Existing `offset`/`filters` parameters on `base_url` are replaced; any
/// other query parameters are kept.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `base_url` cannot be parsed.
pub fn catalog_page_url(base_url: &str, offset: u64, filter: &str) -> Result<String, ScraperError> {
    let mut url = reqwest::Url::parse(base_url).map_err(|e| ScraperError::InvalidUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })?;

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "offset" && key != "filters")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("offset", &offset.to_string())
        .append_pair("filters", filter);

    Ok(url.to_string())
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
