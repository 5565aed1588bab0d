//! Flattening of validated catalog entries into [`FlatProduct`] rows.

use cardcrawl_core::FlatProduct;
use serde_json::Number;

use crate::schema::{NextCategory, NextProduct, ValidatedCatalog};

/// Prefix of the back-reference a product uses to point at its category.
const CATEGORY_REF_PREFIX: &str = "ProductCategory:";

/// A category entry paired with the join key products refer to it by.
struct KeyedCategory<'a> {
    reference_key: String,
    category: &'a NextCategory,
}

/// Flattens every product of one page, in encounter order.
///
/// `subcategory` is the facet the page was fetched under and is copied onto
/// every row. Products whose category reference matches nothing on the page
/// get an empty `category`.
#[must_use]
pub fn normalize_catalog(catalog: &ValidatedCatalog, subcategory: &str) -> Vec<FlatProduct> {
    let categories: Vec<KeyedCategory<'_>> = catalog
        .categories()
        .map(|category| KeyedCategory {
            reference_key: category_reference_key(category),
            category,
        })
        .collect();

    catalog
        .products()
        .map(|product| normalize_product(product, &categories, subcategory))
        .collect()
}

/// `"ProductCategory:{id}"`, the key a product's `category.__ref` carries.
#[must_use]
pub fn category_reference_key(category: &NextCategory) -> String {
    format!("{CATEGORY_REF_PREFIX}{}", category.id)
}

fn normalize_product(
    product: &NextProduct,
    categories: &[KeyedCategory<'_>],
    subcategory: &str,
) -> FlatProduct {
    let category = categories
        .iter()
        .find(|c| c.reference_key == product.category.reference)
        .map(|c| c.category.name.clone())
        .unwrap_or_default();

    let images = &product.master_variant.images;
    let cover_image = images.first().map(|i| i.url.clone()).unwrap_or_default();

    // Anything sharing the cover's URL is the cover again.
    let all_images = images
        .iter()
        .filter(|i| i.url != cover_image)
        .map(|i| i.url.as_str())
        .collect::<Vec<_>>()
        .join("|");

    FlatProduct {
        url: String::new(),
        name: product.title.clone(),
        price: number_text(&product.master_variant.price.cent_amount),
        cover_image,
        all_images,
        subcategory: subcategory.to_owned(),
        category,
    }
}

/// Integers render as-is; whole floats drop their `.0` (`999.0` -> `"999"`).
fn number_text(number: &Number) -> String {
    if let Some(n) = number.as_i64() {
        n.to_string()
    } else if let Some(n) = number.as_u64() {
        n.to_string()
    } else if let Some(f) = number.as_f64() {
        f.to_string()
    } else {
        number.to_string()
    }
}
