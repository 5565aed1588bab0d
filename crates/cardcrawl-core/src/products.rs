use serde::{Deserialize, Serialize};

/// A catalog product flattened into one CSV-ready row.
///
/// `name` is the deduplication key across a whole crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatProduct {
    /// Never populated by the catalog payload; kept so the column exists.
    pub url: String,
    pub name: String,
    /// Master variant price in minor units, e.g. `"1599"` for 15.99.
    pub price: String,
    pub cover_image: String,
    /// Every gallery image except the cover, joined with `|`.
    pub all_images: String,
    pub subcategory: String,
    pub category: String,
}

impl FlatProduct {
    /// Column order of the emitted CSV; matches the field order above.
    pub const CSV_HEADERS: [&'static str; 7] = [
        "url",
        "name",
        "price",
        "cover_image",
        "all_images",
        "subcategory",
        "category",
    ];
}

/// One crawlable catalog facet (an occasion or topic filter).
///
/// Serialized with the landing page's own field names so a cached
/// navigation file round-trips through the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    #[serde(rename = "parent")]
    pub parent_key: String,
    pub id: String,
    /// Number of products the facet advertises.
    pub count: u64,
    #[serde(default)]
    pub label: String,
}

impl NavigationItem {
    /// Value of the `filters` query parameter, e.g. `"occasion:5"`.
    #[must_use]
    pub fn filter_value(&self) -> String {
        format!("{}:{}", self.parent_key, self.id)
    }

    /// Pagination offsets covering `count` products in steps of `page_size`.
    ///
    /// A `page_size` of zero yields no offsets.
    #[must_use]
    pub fn offsets(&self, page_size: u64) -> Vec<u64> {
        let mut offsets = Vec::new();
        if page_size == 0 {
            return offsets;
        }
        let mut offset = 0;
        while offset < self.count {
            offsets.push(offset);
            offset = offset.saturating_add(page_size);
        }
        offsets
    }
}
