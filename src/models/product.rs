use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductCategory;

/// Catalog product record. Read-only to the cart; line items hold a
/// denormalized snapshot of this record taken at add time, so a later
/// catalog change never rewrites what a cart already holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: ProductCategory,
    pub brand: String,
    pub rating: Option<f32>,
    pub in_stock: bool,
}

/// Response model for catalog listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total_count: usize,
}

impl Product {
    pub fn matches_category(&self, category: &ProductCategory) -> bool {
        &self.category == category
    }
}
