//! Typed shape of the catalog entries embedded in a listing page's
//! hydration data.
//!
//! Every field listed here is required. Fields typed `Option<_>` with
//! `deserialize_with = "nullable"` must still be present but may be `null`.
//! Keys not listed are ignored.

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Requires the key to be present while accepting `null`.
///
/// Serde treats a field with `deserialize_with` and no `default` as required,
/// unlike a bare `Option<T>` which would also accept a missing key.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// A product entry (`__typename == "NEXT_PRODUCT"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextProduct {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub id: String,
    pub title: String,
    pub slug: String,
    pub dependencies: Vec<Value>,
    pub customisable: bool,
    pub is_landscape: bool,
    pub click_rank_document_count: f64,
    /// Back-reference to a category entry on the same page.
    pub category: CategoryRef,
    pub rating: Rating,
    pub master_variant: MasterVariant,
    pub variants: Vec<ProductVariant>,
    pub has_augmented_reality: bool,
    pub product_pills: Vec<Value>,
    #[serde(default)]
    pub primary_product_pill: Option<Value>,
    pub publish_date: String,
    pub is_sponsored: bool,
}

/// A category entry (`__typename == "NEXT_CATEGORY"`).
#[derive(Debug, Clone, Deserialize)]
pub struct NextCategory {
    #[serde(rename = "__typename")]
    pub typename: String,
    /// Kept as a JSON number so the join key renders it exactly as sent.
    pub id: Number,
    pub slug: String,
    pub name: String,
    pub department: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRef {
    /// e.g. `"ProductCategory:12"`.
    #[serde(rename = "__ref")]
    pub reference: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rating {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub count: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterVariant {
    pub key: String,
    pub title: String,
    pub subtitle: String,
    pub in_stock: bool,
    pub sku: String,
    pub minimum_quantity: f64,
    pub price: Money,
    pub full_price: Money,
    #[serde(deserialize_with = "nullable")]
    pub discounted_percentage: Option<f64>,
    pub bundles: Vec<Value>,
    pub dimensions: Dimensions,
    pub capabilities: Capabilities,
    pub product_images: ProductImages,
    /// Gallery in display order; the first entry is the cover.
    pub images: Vec<Image>,
    pub master_image: Image,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub key: String,
    pub title: String,
    pub subtitle: String,
    pub in_stock: bool,
    pub sku: String,
    pub minimum_quantity: f64,
    pub price: Money,
    pub full_price: Money,
    #[serde(deserialize_with = "nullable")]
    pub discounted_percentage: Option<f64>,
    pub bundles: Vec<Value>,
    #[serde(deserialize_with = "nullable")]
    pub dimensions: Option<Dimensions>,
    pub capabilities: Capabilities,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    #[serde(rename = "__typename")]
    pub typename: String,
    /// Amount in minor units (cents), kept as sent.
    pub cent_amount: Number,
    pub currency_code: String,
    pub fraction_digits: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dimensions {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Capabilities {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub video: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImages {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub main_image: MainImage,
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainImage {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub medium: SizedImage,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub thumb: SizedImage,
    pub small: SizedImage,
    pub medium: SizedImage,
    pub large: SizedImage,
    pub extra_large: SizedImage,
    pub original: SizedImage,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizedImage {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub jpg_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub url: String,
}
