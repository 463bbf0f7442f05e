//! Product Models

use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<CatalogProduct>;

/// The catalog fields a cart line snapshots when a product is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub images: Vec<ProductImage>,
}

impl CatalogProduct {
    /// URL of the first image, or an empty string when the product has none.
    #[must_use]
    pub fn primary_image_url(&self) -> &str {
        self.images.first().map_or("", |image| image.url.as_str())
    }
}

/// Product Image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,

    #[serde(default)]
    pub alt_text: Option<String>,
}
