//! Expense Model

use serde::{Deserialize, Serialize};

/// Expense record, independent of order history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub description: String,
    /// Amount in currency units, strictly positive
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    /// ISO-8601 timestamp
    pub date: String,
}

/// Create expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCreate {
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    /// Stamped with the current time when absent
    #[serde(default)]
    pub date: Option<String>,
}
