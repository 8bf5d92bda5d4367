//! Order Model

use serde::{Deserialize, Serialize};

use super::cart::{CartItem, DiscountType};

/// Committed order (sales history record)
///
/// Immutable once written, except through the restore → edit → re-pay
/// path which replaces items/totals/name/date in place under the same
/// id. The discount fields and `customer_name` default on deserialize
/// so backups that predate them import cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Snapshot of the cart at payment time; never aliases a live cart
    pub items: Vec<CartItem>,
    pub subtotal: f64,
    /// Effective discount amount, already clamped to [0, subtotal]
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub discount_type: DiscountType,
    /// Configured discount value (percent or fixed), as entered
    #[serde(default)]
    pub discount_value: f64,
    pub total: f64,
    /// Flat tax field; 0 for orders created by this engine
    #[serde(default)]
    pub tax: f64,
    /// ISO-8601 timestamp; reset to the edit time when re-saved
    pub date: String,
    #[serde(default)]
    pub customer_name: String,
}
