//! Expense Ledger
//!
//! Expenses are independent of order history; the only invariant is a
//! positive amount.

use shared::models::{Expense, ExpenseCreate};
use shared::util::{new_id, now_iso};

use crate::core::{CoreError, CoreResult};
use crate::store::Store;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, validate_positive, validate_required_text,
};

pub struct ExpenseLedger {
    store: Store,
    expenses: Vec<Expense>,
}

impl ExpenseLedger {
    pub fn load(store: Store) -> CoreResult<Self> {
        let expenses = store.get_expenses()?;
        Ok(Self { store, expenses })
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Record an expense at the head of the ledger.
    pub fn add_expense(&mut self, create: ExpenseCreate) -> CoreResult<&Expense> {
        validate_required_text(&create.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_positive(create.amount, "amount")?;

        let expense = Expense {
            id: new_id(),
            description: create.description,
            amount: create.amount,
            category: create.category,
            date: create.date.unwrap_or_else(now_iso),
        };

        let mut next = self.expenses.clone();
        next.insert(0, expense);
        self.store.put_expenses(&next)?;
        self.expenses = next;
        Ok(&self.expenses[0])
    }

    pub fn delete_expense(&mut self, id: &str) -> CoreResult<()> {
        let Some(idx) = self.expenses.iter().position(|e| e.id == id) else {
            return Err(CoreError::not_found(format!("expense {id}")));
        };
        let mut next = self.expenses.clone();
        next.remove(idx);
        self.store.put_expenses(&next)?;
        self.expenses = next;
        Ok(())
    }
}
