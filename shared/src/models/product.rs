//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity (menu item)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unit price in currency units
    pub price: f64,
    /// Category reference (by name; may name a category absent from
    /// the category list, rendered as "Other")
    pub category: String,
    /// Image reference ('default', a data URL, or a path).
    /// Stripped from order items on persist.
    #[serde(default)]
    pub image_ref: String,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub image_ref: String,
}
