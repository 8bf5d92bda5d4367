//! Checkout and order-lifecycle engine
//!
//! Pure pricing in [`pricing`], the commit and restore paths in
//! [`engine`]. The same totals computation backs cart preview, payment
//! confirmation, and receipt regeneration.

pub mod engine;
pub mod pricing;

pub use engine::{Checkout, confirm_payment, restore_order};
pub use pricing::{Totals, cart_subtotal, compute_totals};
