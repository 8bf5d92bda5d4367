//! Cart pricing
//!
//! Pure functions over a cart and its discount configuration.
//! Uses rust_decimal for the arithmetic, stores as f64.

use rust_decimal::prelude::*;

use shared::models::{CartItem, DiscountType};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Priced cart: subtotal, effective discount, total
///
/// Invariants: `0 ≤ discount ≤ subtotal` and `total = subtotal −
/// discount ≥ 0`, for any discount configuration, including fixed
/// values above the subtotal and percentages above 100.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

/// Sum of `price × quantity` over the cart.
pub fn cart_subtotal(items: &[CartItem]) -> f64 {
    to_f64(subtotal_decimal(items))
}

fn subtotal_decimal(items: &[CartItem]) -> Decimal {
    items
        .iter()
        .map(|item| to_decimal(item.price) * Decimal::from(item.quantity))
        .sum()
}

/// Price a cart under the given discount configuration.
///
/// 1. subtotal = Σ price × quantity
/// 2. raw = percent ? subtotal × value / 100 : value
/// 3. effective = clamp(raw, 0, subtotal)
/// 4. total = max(subtotal − effective, 0)
pub fn compute_totals(
    items: &[CartItem],
    discount_type: DiscountType,
    discount_value: f64,
) -> Totals {
    let subtotal = subtotal_decimal(items);

    let raw = match discount_type {
        DiscountType::Percent => subtotal * to_decimal(discount_value) / Decimal::ONE_HUNDRED,
        DiscountType::Fixed => to_decimal(discount_value),
    };
    let effective = raw.min(subtotal).max(Decimal::ZERO);
    let total = (subtotal - effective).max(Decimal::ZERO);

    Totals {
        subtotal: to_f64(subtotal),
        discount: to_f64(effective),
        total: to_f64(total),
    }
}
