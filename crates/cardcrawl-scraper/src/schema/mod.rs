//! Validation of a listing page's hydration payload.
//!
//! The payload is accepted only if the whole keyed entry mapping under
//! [`CATALOG_PATH`] matches: every entry must be a complete product or
//! category record. One bad entry rejects the page.

pub mod types;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{SchemaIssue, ScraperError};

pub use types::{NextCategory, NextProduct};

/// Object path from the payload root to the keyed entry mapping.
pub const CATALOG_PATH: [&str; 5] = [
    "props",
    "pageProps",
    "appProps",
    "graphQLInitialState",
    "apolloInitialState",
];

/// Type literal a product entry must carry.
pub const PRODUCT_TYPENAME: &str = "NEXT_PRODUCT";
/// Type literal a category entry must carry.
pub const CATEGORY_TYPENAME: &str = "NEXT_CATEGORY";

/// Which schema an entry is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Category,
    Product,
}

impl EntryKind {
    /// Classifies a `__typename` by case-insensitive substring, checking
    /// `category` before `product`.
    ///
    /// `"ProductCategory"` classifies as a category. Validation still requires
    /// the exact literal; this only picks the schema a mismatch is reported
    /// against.
    #[must_use]
    pub fn classify(typename: &str) -> Option<Self> {
        let lowered = typename.to_lowercase();
        if lowered.contains("category") {
            Some(Self::Category)
        } else if lowered.contains("product") {
            Some(Self::Product)
        } else {
            None
        }
    }

    #[must_use]
    pub fn literal(self) -> &'static str {
        match self {
            Self::Category => CATEGORY_TYPENAME,
            Self::Product => PRODUCT_TYPENAME,
        }
    }
}

/// A single validated entry of the keyed mapping.
#[derive(Debug, Clone)]
pub enum CatalogEntry {
    Product(Box<NextProduct>),
    Category(NextCategory),
}

/// Entries of one page's payload, in document order.
#[derive(Debug, Clone, Default)]
pub struct ValidatedCatalog {
    pub entries: Vec<(String, CatalogEntry)>,
}

impl ValidatedCatalog {
    pub fn products(&self) -> impl Iterator<Item = &NextProduct> {
        self.entries.iter().filter_map(|(_, entry)| match entry {
            CatalogEntry::Product(product) => Some(product.as_ref()),
            CatalogEntry::Category(_) => None,
        })
    }

    pub fn categories(&self) -> impl Iterator<Item = &NextCategory> {
        self.entries.iter().filter_map(|(_, entry)| match entry {
            CatalogEntry::Category(category) => Some(category),
            CatalogEntry::Product(_) => None,
        })
    }
}

/// Parses raw hydration JSON and validates it.
///
/// # Errors
///
/// - [`ScraperError::Json`] — `raw` is not JSON.
/// - [`ScraperError::SchemaMismatch`] — see [`validate_catalog`].
pub fn parse_catalog(raw: &str) -> Result<ValidatedCatalog, ScraperError> {
    let payload: Value = serde_json::from_str(raw).map_err(|e| ScraperError::Json {
        context: "catalog hydration data".to_owned(),
        source: e,
    })?;
    validate_catalog(&payload)
}

/// Validates an untyped payload against the catalog shape.
///
/// # Errors
///
/// Returns [`ScraperError::SchemaMismatch`] carrying every issue found. No
/// partially valid result is ever returned.
pub fn validate_catalog(payload: &Value) -> Result<ValidatedCatalog, ScraperError> {
    let entries = locate_entries(payload).map_err(|issue| ScraperError::SchemaMismatch {
        issues: vec![issue],
    })?;

    let base_path = CATALOG_PATH.join(".");
    let mut issues = Vec::new();
    let mut validated = Vec::with_capacity(entries.len());

    for (key, value) in entries {
        let path = format!("{base_path}.{key}");
        match validate_entry(value) {
            Ok(entry) => validated.push((key.clone(), entry)),
            Err(message) => issues.push(SchemaIssue { path, message }),
        }
    }

    if issues.is_empty() {
        Ok(ValidatedCatalog { entries: validated })
    } else {
        Err(ScraperError::SchemaMismatch { issues })
    }
}

/// Walks [`CATALOG_PATH`], requiring an object at every step.
fn locate_entries(payload: &Value) -> Result<&Map<String, Value>, SchemaIssue> {
    let mut current = payload;
    let mut walked: Vec<&str> = Vec::with_capacity(CATALOG_PATH.len());

    for segment in CATALOG_PATH {
        walked.push(segment);
        let parent = current.as_object().ok_or_else(|| SchemaIssue {
            path: parent_path(&walked),
            message: format!("expected object, found {}", json_kind(current)),
        })?;
        current = parent.get(segment).ok_or_else(|| SchemaIssue {
            path: walked.join("."),
            message: "required".to_owned(),
        })?;
    }

    current.as_object().ok_or_else(|| SchemaIssue {
        path: walked.join("."),
        message: format!("expected object, found {}", json_kind(current)),
    })
}

fn parent_path(walked: &[&str]) -> String {
    match walked.split_last() {
        Some((_, [])) | None => "(root)".to_owned(),
        Some((_, parents)) => parents.join("."),
    }
}

fn validate_entry(value: &Value) -> Result<CatalogEntry, String> {
    let typename = value
        .get("__typename")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing string field `__typename`".to_owned())?;

    let kind = EntryKind::classify(typename).ok_or_else(|| {
        format!(
            "unrecognized entry type `{typename}`, expected `{PRODUCT_TYPENAME}` or `{CATEGORY_TYPENAME}`"
        )
    })?;

    if typename != kind.literal() {
        return Err(format!(
            "expected `__typename` to be `{}`, found `{typename}`",
            kind.literal()
        ));
    }

    match kind {
        EntryKind::Product => NextProduct::deserialize(value)
            .map(|product| CatalogEntry::Product(Box::new(product)))
            .map_err(|e| e.to_string()),
        EntryKind::Category => NextCategory::deserialize(value)
            .map(CatalogEntry::Category)
            .map_err(|e| e.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../schema_test.rs"]
mod tests;
