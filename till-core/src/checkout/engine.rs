//! Checkout commit and restore paths
//!
//! The two operations that cross the customer registry and the order
//! history. `confirm_payment` turns a cart into a committed order and
//! retires the session; `restore_order` is the sole entry point into
//! edit mode.
//!
//! # Commit flow
//!
//! ```text
//! confirm_payment(id)
//!     ├─ 1. Preconditions (session exists, cart non-empty)
//!     ├─ 2. Price the cart
//!     ├─ 3. Edit mode? overwrite the target order : prepend a new one
//!     ├─ 4. Persist orders + customers in ONE transaction
//!     ├─ 5. Install persisted state, drop the session and selection
//!     └─ 6. Return the order and the loyalty award
//! ```

use shared::models::{CartItem, Order, SessionMode};
use shared::util::{new_id, now_iso};

use crate::core::{CoreError, CoreResult};
use crate::customers::CustomerRegistry;
use crate::history::OrderHistory;
use crate::store::Store;

use super::pricing::compute_totals;

/// Loyalty rule: one point per 100 currency units of the paid total
const LOYALTY_POINT_UNIT: f64 = 100.0;

/// Result of a confirmed payment
///
/// `loyalty_points_awarded` is handed to the caller for the receipt;
/// the session it would have accrued on is retired by the commit, so
/// the award has no durable home.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub order: Order,
    pub loyalty_points_awarded: u64,
}

/// Commit the session's cart as an order and retire the session.
///
/// The UI must have collected cash and verified `cash ≥ total` before
/// calling; amount tendered and change are presentation concerns.
pub fn confirm_payment(
    store: &Store,
    customers: &mut CustomerRegistry,
    history: &mut OrderHistory,
    customer_id: &str,
) -> CoreResult<Checkout> {
    let Some(customer) = customers.customer(customer_id) else {
        return Err(CoreError::not_found(format!("customer {customer_id}")));
    };
    if customer.cart.is_empty() {
        return Err(CoreError::invalid_state("cart is empty"));
    }

    let totals = compute_totals(&customer.cart, customer.discount_type, customer.discount_value);
    // Order items never carry image data
    let items: Vec<CartItem> = customer.cart.iter().map(CartItem::without_image).collect();

    let (order, next_orders) = match &customer.mode {
        SessionMode::EditingOrder(order_id) => {
            let Some(existing) = history.order(order_id) else {
                return Err(CoreError::invalid_state(format!(
                    "order {order_id} being edited no longer exists"
                )));
            };
            let order = Order {
                id: order_id.clone(),
                items,
                subtotal: totals.subtotal,
                discount: totals.discount,
                discount_type: customer.discount_type,
                discount_value: customer.discount_value,
                total: totals.total,
                tax: existing.tax,
                // The date reflects the edit; the creation time is not
                // retained separately
                date: now_iso(),
                customer_name: customer.name.clone(),
            };
            (order.clone(), history.orders_with_replacement(order))
        }
        SessionMode::NewOrder => {
            let order = Order {
                id: new_id(),
                items,
                subtotal: totals.subtotal,
                discount: totals.discount,
                discount_type: customer.discount_type,
                discount_value: customer.discount_value,
                total: totals.total,
                tax: 0.0,
                date: now_iso(),
                customer_name: customer.name.clone(),
            };
            (order.clone(), history.orders_with_head(order))
        }
    };

    let was_edit = customer.mode.is_editing();
    let next_customers = customers.snapshot_without(customer_id);

    // Write-before-acknowledge: both collections land in one commit
    let persisted = store.put_orders_with_customers(&next_orders, &next_customers)?;
    history.commit(persisted);
    customers.commit_retired(next_customers, customer_id);

    let loyalty_points_awarded = (totals.total / LOYALTY_POINT_UNIT).floor() as u64;
    tracing::info!(
        order_id = %order.id,
        total = order.total,
        points = loyalty_points_awarded,
        edit = was_edit,
        "payment confirmed"
    );

    Ok(Checkout {
        order,
        loyalty_points_awarded,
    })
}

/// Reopen a committed order for editing.
///
/// With no current selection a fresh session is created first. The
/// target session's cart becomes a deep copy of the order's items and
/// the session enters edit mode on the order's id, so the next
/// `confirm_payment` will overwrite instead of insert.
pub fn restore_order(
    customers: &mut CustomerRegistry,
    history: &OrderHistory,
    order_id: &str,
) -> CoreResult<()> {
    let Some(order) = history.order(order_id).cloned() else {
        return Err(CoreError::not_found(format!("order {order_id}")));
    };

    let target = match customers.selected_id() {
        Some(id) => id.to_string(),
        None => customers.add_customer()?.id.clone(),
    };
    customers.apply_restore(&target, &order)?;

    tracing::info!(order_id = %order_id, customer_id = %target, "order restored for editing");
    Ok(())
}
