//! redb-based persistent store adapter
//!
//! Every entity collection is read and written as a whole: one JSON
//! blob per collection under a fixed key in a single `collections`
//! table. There are no partial or delta writes.
//!
//! | Key | Value | Purpose |
//! |-----|-------|---------|
//! | `orders` | `Vec<Order>` | Committed orders, newest first |
//! | `products` | `Vec<Product>` | Catalog products |
//! | `categories` | `Vec<String>` | Ordered category names |
//! | `settings` | `AppSettings` | Settings singleton |
//! | `expenses` | `Vec<Expense>` | Expense ledger |
//! | `users` | `Vec<User>` | User accounts |
//! | `customers` | `Vec<Customer>` | Active sessions (open tabs) |
//!
//! # Durability
//!
//! redb commits are durable as soon as `commit()` returns (copy-on-write
//! with atomic pointer swap), which carries the engine's
//! write-before-acknowledge guarantee. Multi-collection commits
//! (checkout, cascade delete, import) go through one transaction.
//!
//! # Capacity policy
//!
//! Order-history writes are checked against a configured byte budget
//! before touching the database. Over budget: truncate the collection
//! to the newest `keep_recent` records and retry once; still over
//! budget: fail with [`StoreError::CapacityExceeded`] and leave storage
//! untouched. No other write is retried.

mod backup;

pub use backup::{BACKUP_VERSION, BackupData, BackupSnapshot};

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::de::DeserializeOwned;
use thiserror::Error;

use shared::models::{AppSettings, CartItem, Customer, Expense, Order, Product, User};

/// Single table holding every collection: key = collection name,
/// value = JSON-serialized collection
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

const ORDERS_KEY: &str = "orders";
const PRODUCTS_KEY: &str = "products";
const CATEGORIES_KEY: &str = "categories";
const SETTINGS_KEY: &str = "settings";
const EXPENSES_KEY: &str = "expenses";
const USERS_KEY: &str = "users";
const CUSTOMERS_KEY: &str = "customers";

const ALL_KEYS: [&str; 7] = [
    ORDERS_KEY,
    PRODUCTS_KEY,
    CATEGORIES_KEY,
    SETTINGS_KEY,
    EXPENSES_KEY,
    USERS_KEY,
    CUSTOMERS_KEY,
];

/// Capacity policy for order-history writes
#[derive(Debug, Clone, Copy)]
pub struct CapacityPolicy {
    /// Byte budget for the serialized orders collection
    pub order_byte_budget: usize,
    /// Number of newest orders kept when truncation is forced
    pub keep_recent: usize,
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            order_byte_budget: 2_000_000,
            keep_recent: 50,
        }
    }
}

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Capacity exceeded: {needed} bytes needed, budget {budget}")]
    CapacityExceeded { needed: usize, budget: usize },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent store backed by redb
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
    policy: CapacityPolicy,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("db", &"<Database>")
            .field("policy", &self.policy)
            .finish()
    }
}

impl Store {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>, policy: CapacityPolicy) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db, policy)
    }

    /// Open an in-memory database (tests, ephemeral sessions)
    pub fn open_in_memory(policy: CapacityPolicy) -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db, policy)
    }

    fn init(db: Database, policy: CapacityPolicy) -> StoreResult<Self> {
        // Create the collections table if it doesn't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            policy,
        })
    }

    // ========== Raw Collection Access ==========

    fn read_blob(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    /// Read one collection; an absent key is the empty/default value.
    /// Corrupt JSON is an explicit error, never silently defaulted.
    fn read_collection<T: Default + DeserializeOwned>(&self, key: &str) -> StoreResult<T> {
        match self.read_blob(key)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(T::default()),
        }
    }

    /// Write the given collections in ONE committed transaction.
    fn write_collections(&self, entries: &[(&str, Vec<u8>)]) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(COLLECTIONS_TABLE)?;
            for (key, bytes) in entries {
                table.insert(*key, bytes.as_slice())?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Reads ==========

    pub fn get_orders(&self) -> StoreResult<Vec<Order>> {
        self.read_collection(ORDERS_KEY)
    }

    pub fn get_products(&self) -> StoreResult<Vec<Product>> {
        self.read_collection(PRODUCTS_KEY)
    }

    pub fn get_categories(&self) -> StoreResult<Vec<String>> {
        self.read_collection(CATEGORIES_KEY)
    }

    pub fn get_settings(&self) -> StoreResult<AppSettings> {
        self.read_collection(SETTINGS_KEY)
    }

    pub fn get_expenses(&self) -> StoreResult<Vec<Expense>> {
        self.read_collection(EXPENSES_KEY)
    }

    pub fn get_users(&self) -> StoreResult<Vec<User>> {
        self.read_collection(USERS_KEY)
    }

    pub fn get_customers(&self) -> StoreResult<Vec<Customer>> {
        self.read_collection(CUSTOMERS_KEY)
    }

    // ========== Writes ==========

    pub fn put_products(&self, products: &[Product]) -> StoreResult<()> {
        self.write_collections(&[(PRODUCTS_KEY, serde_json::to_vec(products)?)])
    }

    pub fn put_categories(&self, categories: &[String]) -> StoreResult<()> {
        self.write_collections(&[(CATEGORIES_KEY, serde_json::to_vec(categories)?)])
    }

    pub fn put_settings(&self, settings: &AppSettings) -> StoreResult<()> {
        self.write_collections(&[(SETTINGS_KEY, serde_json::to_vec(settings)?)])
    }

    pub fn put_expenses(&self, expenses: &[Expense]) -> StoreResult<()> {
        self.write_collections(&[(EXPENSES_KEY, serde_json::to_vec(expenses)?)])
    }

    pub fn put_users(&self, users: &[User]) -> StoreResult<()> {
        self.write_collections(&[(USERS_KEY, serde_json::to_vec(users)?)])
    }

    pub fn put_customers(&self, customers: &[Customer]) -> StoreResult<()> {
        self.write_collections(&[(CUSTOMERS_KEY, serde_json::to_vec(customers)?)])
    }

    /// Persist the orders collection under the capacity policy.
    ///
    /// Returns the list actually persisted (image-stripped, possibly
    /// truncated to the newest records) so in-memory state can be
    /// reconciled with what is on disk.
    pub fn put_orders(&self, orders: &[Order]) -> StoreResult<Vec<Order>> {
        let (persisted, bytes) = self.prepare_orders(orders)?;
        self.write_collections(&[(ORDERS_KEY, bytes)])?;
        Ok(persisted)
    }

    /// Persist orders and customers in ONE transaction (checkout commit).
    pub fn put_orders_with_customers(
        &self,
        orders: &[Order],
        customers: &[Customer],
    ) -> StoreResult<Vec<Order>> {
        let (persisted, order_bytes) = self.prepare_orders(orders)?;
        self.write_collections(&[
            (ORDERS_KEY, order_bytes),
            (CUSTOMERS_KEY, serde_json::to_vec(customers)?),
        ])?;
        Ok(persisted)
    }

    /// Persist products and categories in ONE transaction (cascade delete,
    /// category auto-create).
    pub fn put_products_with_categories(
        &self,
        products: &[Product],
        categories: &[String],
    ) -> StoreResult<()> {
        self.write_collections(&[
            (PRODUCTS_KEY, serde_json::to_vec(products)?),
            (CATEGORIES_KEY, serde_json::to_vec(categories)?),
        ])
    }

    /// Build the lean serialized form of the orders collection and apply
    /// the capacity policy: over budget → truncate to the newest
    /// `keep_recent` records and retry once → still over budget → fail,
    /// storage untouched.
    fn prepare_orders(&self, orders: &[Order]) -> StoreResult<(Vec<Order>, Vec<u8>)> {
        // Image references are never persisted in order history
        let lean: Vec<Order> = orders.iter().map(strip_order_images).collect();

        let bytes = serde_json::to_vec(&lean)?;
        if bytes.len() <= self.policy.order_byte_budget {
            return Ok((lean, bytes));
        }

        tracing::warn!(
            needed = bytes.len(),
            budget = self.policy.order_byte_budget,
            keep = self.policy.keep_recent,
            "order history over budget, truncating to newest records"
        );
        let trimmed: Vec<Order> = lean.into_iter().take(self.policy.keep_recent).collect();
        let bytes = serde_json::to_vec(&trimmed)?;
        if bytes.len() > self.policy.order_byte_budget {
            return Err(StoreError::CapacityExceeded {
                needed: bytes.len(),
                budget: self.policy.order_byte_budget,
            });
        }
        Ok((trimmed, bytes))
    }

    // ========== Backup / Restore ==========

    /// Bundle every collection into a snapshot.
    pub fn export_all(&self) -> StoreResult<BackupSnapshot> {
        Ok(BackupSnapshot {
            version: BACKUP_VERSION,
            timestamp: shared::util::now_iso(),
            data: BackupData {
                orders: self.get_orders()?,
                products: self.get_products()?,
                categories: self.get_categories()?,
                settings: self.get_settings()?,
                expenses: self.get_expenses()?,
                users: self.get_users()?,
                customers: self.get_customers()?,
            },
        })
    }

    /// Overwrite every collection from the snapshot in ONE transaction.
    /// Last-write-wins, no merge; missing sub-collections were already
    /// defaulted when the snapshot was parsed.
    pub fn import_all(&self, snapshot: &BackupSnapshot) -> StoreResult<()> {
        let lean: Vec<Order> = snapshot.data.orders.iter().map(strip_order_images).collect();
        self.write_collections(&[
            (ORDERS_KEY, serde_json::to_vec(&lean)?),
            (PRODUCTS_KEY, serde_json::to_vec(&snapshot.data.products)?),
            (CATEGORIES_KEY, serde_json::to_vec(&snapshot.data.categories)?),
            (SETTINGS_KEY, serde_json::to_vec(&snapshot.data.settings)?),
            (EXPENSES_KEY, serde_json::to_vec(&snapshot.data.expenses)?),
            (USERS_KEY, serde_json::to_vec(&snapshot.data.users)?),
            (CUSTOMERS_KEY, serde_json::to_vec(&snapshot.data.customers)?),
        ])?;
        tracing::info!(
            version = snapshot.version,
            orders = snapshot.data.orders.len(),
            products = snapshot.data.products.len(),
            "imported backup snapshot"
        );
        Ok(())
    }

    /// Clear every collection unconditionally.
    pub fn factory_reset(&self) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(COLLECTIONS_TABLE)?;
            for key in &ALL_KEYS {
                table.remove(*key)?;
            }
        }
        txn.commit()?;
        tracing::info!("factory reset: all collections cleared");
        Ok(())
    }
}

fn strip_order_images(order: &Order) -> Order {
    Order {
        items: order.items.iter().map(CartItem::without_image).collect(),
        ..order.clone()
    }
}
