//! Backup snapshot wire format
//!
//! `{version, timestamp, data: {orders, products, categories, settings,
//! expenses, users, customers}}`. Export always produces the full
//! shape; import requires `version` and `data` to be present, while
//! every sub-collection is optional and defaults to empty.

use serde::{Deserialize, Serialize};

use shared::models::{AppSettings, Customer, Expense, Order, Product, User};

/// Current backup format version
pub const BACKUP_VERSION: u32 = 1;

/// Whole-database snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupSnapshot {
    pub version: u32,
    #[serde(default)]
    pub timestamp: String,
    pub data: BackupData,
}

/// The seven persisted collections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupData {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub settings: AppSettings,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub customers: Vec<Customer>,
}

impl BackupSnapshot {
    /// Parse a backup file. Fails when `version` or `data` is missing
    /// or malformed; missing sub-collections default to empty.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pretty-printed JSON, the on-disk backup file format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
