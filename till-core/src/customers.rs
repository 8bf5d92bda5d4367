//! Customer/Cart Registry
//!
//! Owns the set of active customer sessions (open tabs) and the single
//! current selection. Each session carries a live cart, discount
//! configuration, and a [`SessionMode`] flag; it exists from the moment
//! a tab is opened until its order is paid.
//!
//! Mutation discipline: every operation builds the next collection
//! value, persists it, and only then swaps it into memory; a failed
//! write leaves memory exactly where it was.

use shared::models::{
    CartItem, Customer, CustomerUpdate, DiscountType, Order, Product, SessionMode,
};
use shared::util::{new_id, now_iso};

use crate::core::{CoreError, CoreResult};
use crate::store::Store;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative,
    validate_required_text,
};

/// Order customer names equal to this sentinel never overwrite a
/// session name on restore.
pub const GUEST_NAME: &str = "Guest";

pub struct CustomerRegistry {
    store: Store,
    customers: Vec<Customer>,
    selected_id: Option<String>,
}

impl CustomerRegistry {
    /// Load active sessions from the store. Selection starts empty.
    pub fn load(store: Store) -> CoreResult<Self> {
        let customers = store.get_customers()?;
        Ok(Self {
            store,
            customers,
            selected_id: None,
        })
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected(&self) -> Option<&Customer> {
        self.selected_id
            .as_deref()
            .and_then(|id| self.customer(id))
    }

    pub fn select_customer(&mut self, id: &str) -> CoreResult<()> {
        if self.customer(id).is_none() {
            return Err(CoreError::not_found(format!("customer {id}")));
        }
        self.selected_id = Some(id.to_string());
        Ok(())
    }

    /// Open a new tab named `Customer {n}`, where n is the smallest
    /// positive integer unused among currently active sessions (past
    /// orders do not constrain n). The new session becomes selected.
    pub fn add_customer(&mut self) -> CoreResult<&Customer> {
        let customer = Customer {
            id: new_id(),
            name: self.next_customer_name(),
            email: String::new(),
            phone: String::new(),
            visits: 1,
            last_visit: now_iso(),
            loyalty_points: 0,
            cart: vec![],
            discount_type: DiscountType::Fixed,
            discount_value: 0.0,
            mode: SessionMode::NewOrder,
        };
        let id = customer.id.clone();

        let mut next = self.customers.clone();
        next.insert(0, customer);
        self.persist(next)?;
        self.selected_id = Some(id);

        tracing::info!(name = %self.customers[0].name, "tab opened");
        Ok(&self.customers[0])
    }

    fn next_customer_name(&self) -> String {
        let mut n = 1u32;
        loop {
            let candidate = format!("Customer {n}");
            if !self.customers.iter().any(|c| c.name == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Add a product to the selected session's cart, merging the
    /// quantity when the product is already there.
    ///
    /// No selection with zero sessions: a session is created, selected,
    /// and the item lands in its cart. No selection with sessions
    /// present: the caller must pick one first.
    pub fn add_to_cart(&mut self, product: &Product) -> CoreResult<()> {
        let target = match self.selected_id.clone() {
            Some(id) => id,
            None if self.customers.is_empty() => self.add_customer()?.id.clone(),
            None => return Err(CoreError::invalid_state("no customer selected")),
        };

        let mut next = self.customers.clone();
        let customer = customer_mut(&mut next, &target)?;
        match customer.cart.iter_mut().find(|i| i.id == product.id) {
            Some(line) => line.quantity += 1,
            None => customer.cart.push(CartItem::from_product(product)),
        }
        self.persist(next)
    }

    /// Add `delta` to a cart line's quantity, clamping at 0; a line at
    /// 0 is removed entirely.
    pub fn update_quantity(
        &mut self,
        customer_id: &str,
        product_id: &str,
        delta: i32,
    ) -> CoreResult<()> {
        let mut next = self.customers.clone();
        let customer = customer_mut(&mut next, customer_id)?;
        let Some(idx) = customer.cart.iter().position(|i| i.id == product_id) else {
            return Err(CoreError::not_found(format!(
                "cart line for product {product_id}"
            )));
        };

        let quantity = (i64::from(customer.cart[idx].quantity) + i64::from(delta)).max(0);
        if quantity == 0 {
            customer.cart.remove(idx);
        } else {
            customer.cart[idx].quantity = quantity as u32;
        }
        self.persist(next)
    }

    /// Remove a cart line entirely.
    pub fn remove_from_cart(&mut self, customer_id: &str, product_id: &str) -> CoreResult<()> {
        let mut next = self.customers.clone();
        let customer = customer_mut(&mut next, customer_id)?;
        let Some(idx) = customer.cart.iter().position(|i| i.id == product_id) else {
            return Err(CoreError::not_found(format!(
                "cart line for product {product_id}"
            )));
        };
        customer.cart.remove(idx);
        self.persist(next)
    }

    /// Empty the cart, reset the discount value, and leave edit mode.
    /// The discount *type* is retained.
    pub fn clear_cart(&mut self, customer_id: &str) -> CoreResult<()> {
        let mut next = self.customers.clone();
        let customer = customer_mut(&mut next, customer_id)?;
        customer.cart.clear();
        customer.discount_value = 0.0;
        customer.mode = SessionMode::NewOrder;
        self.persist(next)
    }

    /// Set the discount configuration. The effective discount amount is
    /// computed at pricing time, never stored pre-clamped.
    pub fn set_discount(
        &mut self,
        customer_id: &str,
        discount_type: DiscountType,
        value: f64,
    ) -> CoreResult<()> {
        validate_non_negative(value, "discount value")?;
        let mut next = self.customers.clone();
        let customer = customer_mut(&mut next, customer_id)?;
        customer.discount_type = discount_type;
        customer.discount_value = value;
        self.persist(next)
    }

    /// Contact-detail edits from the sidebar.
    pub fn update_customer_details(
        &mut self,
        customer_id: &str,
        update: CustomerUpdate,
    ) -> CoreResult<()> {
        if let Some(name) = &update.name {
            validate_required_text(name, "customer name", MAX_NAME_LEN)?;
        }
        let mut next = self.customers.clone();
        let customer = customer_mut(&mut next, customer_id)?;
        if let Some(name) = update.name {
            customer.name = name;
        }
        if let Some(email) = update.email {
            if email.len() > MAX_EMAIL_LEN {
                return Err(CoreError::validation("email is too long"));
            }
            customer.email = email;
        }
        if let Some(phone) = update.phone {
            if phone.len() > MAX_SHORT_TEXT_LEN {
                return Err(CoreError::validation("phone is too long"));
            }
            customer.phone = phone;
        }
        self.persist(next)
    }

    /// Close a tab without payment. Selection becomes none if it
    /// pointed at the removed session.
    pub fn delete_customer(&mut self, id: &str) -> CoreResult<()> {
        let Some(idx) = self.customers.iter().position(|c| c.id == id) else {
            return Err(CoreError::not_found(format!("customer {id}")));
        };
        let mut next = self.customers.clone();
        next.remove(idx);
        self.persist(next)?;
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        Ok(())
    }

    fn persist(&mut self, next: Vec<Customer>) -> CoreResult<()> {
        self.store.put_customers(&next)?;
        self.customers = next;
        Ok(())
    }

    // ── Checkout-engine hooks ───────────────────────────────────────

    /// The collection as it will look with `id` retired. Persistence of
    /// this snapshot is the checkout engine's one-transaction commit.
    pub(crate) fn snapshot_without(&self, id: &str) -> Vec<Customer> {
        self.customers
            .iter()
            .filter(|c| c.id != id)
            .cloned()
            .collect()
    }

    /// Install an already-persisted collection and drop the selection
    /// of the retired session.
    pub(crate) fn commit_retired(&mut self, customers: Vec<Customer>, retired_id: &str) {
        self.customers = customers;
        if self.selected_id.as_deref() == Some(retired_id) {
            self.selected_id = None;
        }
    }

    /// Put a session into edit mode from an order: deep-copy the items,
    /// adopt the order's discount configuration, and take the order's
    /// customer name unless it is empty or the Guest sentinel.
    pub(crate) fn apply_restore(&mut self, customer_id: &str, order: &Order) -> CoreResult<()> {
        let mut next = self.customers.clone();
        let customer = customer_mut(&mut next, customer_id)?;
        customer.cart = order.items.clone();
        customer.discount_value = order.discount_value;
        customer.discount_type = order.discount_type;
        if !order.customer_name.is_empty() && order.customer_name != GUEST_NAME {
            customer.name = order.customer_name.clone();
        }
        customer.mode = SessionMode::EditingOrder(order.id.clone());
        self.persist(next)
    }
}

fn customer_mut<'a>(customers: &'a mut [Customer], id: &str) -> CoreResult<&'a mut Customer> {
    customers
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| CoreError::not_found(format!("customer {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CapacityPolicy;

    fn registry() -> CustomerRegistry {
        let store = Store::open_in_memory(CapacityPolicy::default()).unwrap();
        CustomerRegistry::load(store).unwrap()
    }

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Item {id}"),
            price,
            category: "Drinks".to_string(),
            image_ref: String::new(),
        }
    }

    #[test]
    fn names_count_up_and_reuse_gaps() {
        let mut registry = registry();
        registry.add_customer().unwrap();
        let c2 = registry.add_customer().unwrap().id.clone();
        registry.add_customer().unwrap();

        let names: Vec<_> = registry.customers().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, ["Customer 3", "Customer 2", "Customer 1"]);

        registry.delete_customer(&c2).unwrap();
        registry.add_customer().unwrap();
        assert_eq!(registry.customers()[0].name, "Customer 2");
    }

    #[test]
    fn add_customer_selects_the_new_tab() {
        let mut registry = registry();
        let id = registry.add_customer().unwrap().id.clone();
        assert_eq!(registry.selected_id(), Some(id.as_str()));
    }

    #[test]
    fn repeated_adds_merge_into_one_line() {
        let mut registry = registry();
        registry.add_customer().unwrap();
        let espresso = product("p1", 120.0);
        registry.add_to_cart(&espresso).unwrap();
        registry.add_to_cart(&espresso).unwrap();
        registry.add_to_cart(&product("p2", 90.0)).unwrap();

        let cart = &registry.selected().unwrap().cart;
        assert_eq!(cart.len(), 2);
        assert_eq!(cart[0].quantity, 2);
        assert_eq!(cart[1].quantity, 1);
    }

    #[test]
    fn add_to_cart_with_no_sessions_opens_a_tab_and_keeps_the_add() {
        let mut registry = registry();
        registry.add_to_cart(&product("p1", 120.0)).unwrap();

        assert_eq!(registry.customers().len(), 1);
        let selected = registry.selected().unwrap();
        assert_eq!(selected.name, "Customer 1");
        assert_eq!(selected.cart.len(), 1);
    }

    #[test]
    fn add_to_cart_without_selection_fails_when_tabs_exist() {
        let mut registry = registry();
        registry.add_customer().unwrap();
        // Deleting the selected tab leaves a tab open but nothing selected
        let selected = registry.add_customer().unwrap().id.clone();
        registry.delete_customer(&selected).unwrap();
        assert!(registry.selected_id().is_none());
        assert!(!registry.customers().is_empty());

        assert!(matches!(
            registry.add_to_cart(&product("p1", 120.0)),
            Err(CoreError::InvalidState(_))
        ));
    }

    #[test]
    fn quantity_clamps_at_zero_and_removes_the_line() {
        let mut registry = registry();
        let id = registry.add_customer().unwrap().id.clone();
        registry.add_to_cart(&product("p1", 120.0)).unwrap();
        registry.update_quantity(&id, "p1", 2).unwrap();
        assert_eq!(registry.selected().unwrap().cart[0].quantity, 3);

        registry.update_quantity(&id, "p1", -10).unwrap();
        assert!(registry.selected().unwrap().cart.is_empty());
    }

    #[test]
    fn unknown_cart_line_is_not_found() {
        let mut registry = registry();
        let id = registry.add_customer().unwrap().id.clone();
        assert!(matches!(
            registry.update_quantity(&id, "ghost", 1),
            Err(CoreError::NotFound(_))
        ));
        assert!(matches!(
            registry.remove_from_cart(&id, "ghost"),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn clear_cart_resets_discount_value_and_exits_edit_mode() {
        let mut registry = registry();
        let id = registry.add_customer().unwrap().id.clone();
        registry.add_to_cart(&product("p1", 120.0)).unwrap();
        registry
            .set_discount(&id, DiscountType::Percent, 10.0)
            .unwrap();

        // Simulate a restored session
        let order = Order {
            id: "o1".to_string(),
            items: vec![],
            subtotal: 0.0,
            discount: 0.0,
            discount_type: DiscountType::Fixed,
            discount_value: 0.0,
            total: 0.0,
            tax: 0.0,
            date: now_iso(),
            customer_name: String::new(),
        };
        registry.apply_restore(&id, &order).unwrap();
        assert!(registry.customer(&id).unwrap().mode.is_editing());

        registry.clear_cart(&id).unwrap();
        let customer = registry.customer(&id).unwrap();
        assert!(customer.cart.is_empty());
        assert_eq!(customer.discount_value, 0.0);
        assert_eq!(customer.mode, SessionMode::NewOrder);
        // Type survives a clear
        assert_eq!(customer.discount_type, DiscountType::Percent);
    }

    #[test]
    fn negative_discount_is_rejected() {
        let mut registry = registry();
        let id = registry.add_customer().unwrap().id.clone();
        assert!(matches!(
            registry.set_discount(&id, DiscountType::Fixed, -5.0),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn deleting_the_selected_tab_clears_the_selection() {
        let mut registry = registry();
        let id = registry.add_customer().unwrap().id.clone();
        registry.delete_customer(&id).unwrap();
        assert!(registry.selected_id().is_none());
        assert!(matches!(
            registry.delete_customer(&id),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn restore_keeps_session_name_for_guest_orders() {
        let mut registry = registry();
        let id = registry.add_customer().unwrap().id.clone();

        let mut order = Order {
            id: "o1".to_string(),
            items: vec![CartItem {
                id: "p1".to_string(),
                name: "Espresso".to_string(),
                price: 120.0,
                category: "Drinks".to_string(),
                image_ref: String::new(),
                quantity: 2,
            }],
            subtotal: 240.0,
            discount: 0.0,
            discount_type: DiscountType::Percent,
            discount_value: 5.0,
            total: 228.0,
            tax: 0.0,
            date: now_iso(),
            customer_name: GUEST_NAME.to_string(),
        };
        registry.apply_restore(&id, &order).unwrap();
        assert_eq!(registry.customer(&id).unwrap().name, "Customer 1");

        order.customer_name = "Ana".to_string();
        registry.apply_restore(&id, &order).unwrap();
        let customer = registry.customer(&id).unwrap();
        assert_eq!(customer.name, "Ana");
        assert_eq!(customer.discount_value, 5.0);
        assert_eq!(customer.discount_type, DiscountType::Percent);
        assert_eq!(customer.mode, SessionMode::EditingOrder("o1".to_string()));
    }
}
