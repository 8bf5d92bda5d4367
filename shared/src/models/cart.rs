//! Cart line items and discount configuration

use serde::{Deserialize, Serialize};

use super::product::Product;

/// Discount kind: percentage of the subtotal, or a fixed amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percent,
    #[default]
    Fixed,
}

/// Cart line item: product fields plus a quantity
///
/// Invariant (held by the customer registry): at most one line per
/// product id within a cart, quantity ≥ 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub image_ref: String,
    pub quantity: u32,
}

impl CartItem {
    /// A quantity-1 line for the given product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            image_ref: product.image_ref.clone(),
            quantity: 1,
        }
    }

    /// Copy with the image reference removed (order-history form).
    pub fn without_image(&self) -> Self {
        Self {
            image_ref: String::new(),
            ..self.clone()
        }
    }
}
