//! Order History Store
//!
//! Committed orders, newest first. Append-only by default: orders get
//! in through the checkout engine, change only through the
//! restore → edit → re-pay path, and leave only through an explicit
//! delete (admin-gated by the caller, not here).

use shared::models::Order;

use crate::core::{CoreError, CoreResult};
use crate::store::Store;

/// Sales dashboard figures
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SalesSummary {
    pub total_sales: f64,
    pub order_count: usize,
    pub average_order_value: f64,
}

pub struct OrderHistory {
    store: Store,
    orders: Vec<Order>,
}

impl OrderHistory {
    /// Load committed orders from the store.
    pub fn load(store: Store) -> CoreResult<Self> {
        let orders = store.get_orders()?;
        Ok(Self { store, orders })
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Remove an order by id. Access control (admin-only delete) is the
    /// caller's responsibility against the user registry.
    pub fn delete_order(&mut self, id: &str) -> CoreResult<()> {
        let Some(idx) = self.orders.iter().position(|o| o.id == id) else {
            return Err(CoreError::not_found(format!("order {id}")));
        };
        let mut next = self.orders.clone();
        next.remove(idx);
        let persisted = self.store.put_orders(&next)?;
        self.orders = persisted;
        tracing::info!(order_id = %id, "order deleted");
        Ok(())
    }

    /// Totals for the sales dashboard.
    pub fn summary(&self) -> SalesSummary {
        let total_sales: f64 = self.orders.iter().map(|o| o.total).sum();
        let order_count = self.orders.len();
        SalesSummary {
            total_sales,
            order_count,
            average_order_value: if order_count > 0 {
                total_sales / order_count as f64
            } else {
                0.0
            },
        }
    }

    // ── Checkout-engine hooks ───────────────────────────────────────

    /// The collection with `order` prepended (new-order commit).
    pub(crate) fn orders_with_head(&self, order: Order) -> Vec<Order> {
        let mut next = Vec::with_capacity(self.orders.len() + 1);
        next.push(order);
        next.extend(self.orders.iter().cloned());
        next
    }

    /// The collection with the order of the same id replaced in place
    /// (edit-mode commit).
    pub(crate) fn orders_with_replacement(&self, order: Order) -> Vec<Order> {
        self.orders
            .iter()
            .map(|o| if o.id == order.id { order.clone() } else { o.clone() })
            .collect()
    }

    /// Install the collection the store actually persisted.
    pub(crate) fn commit(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CapacityPolicy;
    use shared::models::DiscountType;

    fn order(id: &str, total: f64) -> Order {
        Order {
            id: id.to_string(),
            items: vec![],
            subtotal: total,
            discount: 0.0,
            discount_type: DiscountType::Fixed,
            discount_value: 0.0,
            total,
            tax: 0.0,
            date: shared::util::now_iso(),
            customer_name: "Customer 1".to_string(),
        }
    }

    fn history_with(orders: &[Order]) -> OrderHistory {
        let store = Store::open_in_memory(CapacityPolicy::default()).unwrap();
        store.put_orders(orders).unwrap();
        OrderHistory::load(store).unwrap()
    }

    #[test]
    fn delete_removes_exactly_one_order() {
        let mut history = history_with(&[order("o1", 100.0), order("o2", 50.0)]);
        history.delete_order("o1").unwrap();
        assert_eq!(history.orders().len(), 1);
        assert_eq!(history.orders()[0].id, "o2");
    }

    #[test]
    fn delete_unknown_order_is_not_found() {
        let mut history = history_with(&[]);
        assert!(matches!(
            history.delete_order("ghost"),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn summary_averages_totals() {
        let history = history_with(&[order("o1", 100.0), order("o2", 50.0)]);
        let summary = history.summary();
        assert_eq!(summary.total_sales, 150.0);
        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.average_order_value, 75.0);

        assert_eq!(history_with(&[]).summary(), SalesSummary::default());
    }
}
