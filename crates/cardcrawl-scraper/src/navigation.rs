//! Crawlable facets from the landing page's filter list, plus the optional
//! on-disk cache of them.

use std::path::Path;

use cardcrawl_core::NavigationItem;
use serde_json::Value;

use crate::error::ScraperError;

/// Object path from the landing payload root to the filter groups.
const FILTERS_PATH: [&str; 7] = [
    "props",
    "pageProps",
    "pageProps",
    "content",
    "props",
    "initialFiltersResponse",
    "filters",
];

/// Filter group labels worth crawling, compared case-insensitively.
const ALLOWED_FILTER_GROUPS: [&str; 2] = ["occasion", "topic"];

/// Extracts navigation items from the landing page's hydration JSON.
///
/// Items keep document order. The same facet appearing in two groups is
/// returned twice.
///
/// # Errors
///
/// - [`ScraperError::Json`] — `hydration_json` is not JSON.
/// - [`ScraperError::NavigationPathMissing`] — a segment of the filter path
///   is absent, or the filters are not an array.
pub fn extract_navigation_items(hydration_json: &str) -> Result<Vec<NavigationItem>, ScraperError> {
    let payload: Value = serde_json::from_str(hydration_json).map_err(|e| ScraperError::Json {
        context: "landing page hydration data".to_owned(),
        source: e,
    })?;

    let mut current = &payload;
    for segment in FILTERS_PATH {
        current = current
            .get(segment)
            .ok_or_else(|| ScraperError::NavigationPathMissing {
                segment: segment.to_owned(),
            })?;
    }
    let groups = current
        .as_array()
        .ok_or_else(|| ScraperError::NavigationPathMissing {
            segment: "filters".to_owned(),
        })?;

    let items = groups
        .iter()
        .filter(|group| is_allowed_group(group))
        .filter_map(|group| group.get("children").and_then(Value::as_array))
        .flatten()
        .filter_map(navigation_item)
        .collect();

    Ok(items)
}

fn is_allowed_group(group: &Value) -> bool {
    group
        .get("label")
        .and_then(Value::as_str)
        .is_some_and(|label| {
            ALLOWED_FILTER_GROUPS
                .iter()
                .any(|allowed| label.eq_ignore_ascii_case(allowed))
        })
}

/// Converts one filter child; children missing `parent`, `count`, or `id`
/// are skipped.
fn navigation_item(child: &Value) -> Option<NavigationItem> {
    let parent_key = scalar_text(child.get("parent")?)?;
    let id = scalar_text(child.get("id")?)?;
    let Some(count) = child.get("count").and_then(page_bound) else {
        tracing::debug!(%parent_key, %id, "skipping filter child without a usable count");
        return None;
    };
    let label = child
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    Some(NavigationItem {
        parent_key,
        id,
        count,
        label,
    })
}

/// Result count as an exclusive offset bound.
///
/// Fractional counts round up, since `offset < count` still admits the next
/// whole offset. Numeric strings are accepted; negatives crawl nothing.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn page_bound(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.max(0.0).ceil() as u64)
}

/// Strings pass through; numbers are rendered as text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads previously derived navigation items.
///
/// Returns `Ok(None)` when the file does not exist or is empty, so the caller
/// falls back to deriving items from the landing page.
///
/// # Errors
///
/// - [`ScraperError::Io`] — the file exists but cannot be read.
/// - [`ScraperError::Json`] — the file is not a JSON array of items.
pub async fn load_cached_items(path: &Path) -> Result<Option<Vec<NavigationItem>>, ScraperError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ScraperError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if raw.trim().is_empty() {
        return Ok(None);
    }

    let items = serde_json::from_str(&raw).map_err(|e| ScraperError::Json {
        context: format!("navigation cache {}", path.display()),
        source: e,
    })?;
    Ok(Some(items))
}

/// Writes navigation items so later runs can skip the landing page.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] if the file cannot be written.
pub async fn save_cached_items(path: &Path, items: &[NavigationItem]) -> Result<(), ScraperError> {
    let body = serde_json::to_vec(items).map_err(|e| ScraperError::Json {
        context: format!("navigation cache {}", path.display()),
        source: e,
    })?;
    tokio::fs::write(path, body)
        .await
        .map_err(|source| ScraperError::Io {
            path: path.to_path_buf(),
            source,
        })
}
