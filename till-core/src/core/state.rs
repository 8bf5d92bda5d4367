//! `PosState` - the engine facade
//!
//! Holds the store and every manager. The store is opened once at
//! startup and injected into each component; nothing in the engine
//! reaches for globals.
//!
//! | Field | Type | Purpose |
//! |-------|------|---------|
//! | config | Config | Configuration (immutable) |
//! | catalog | CatalogManager | Products + categories |
//! | customers | CustomerRegistry | Active sessions and carts |
//! | history | OrderHistory | Committed orders |
//! | users | UserRegistry | Accounts, credential lookup |
//! | expenses | ExpenseLedger | Expense records |
//! | settings | SettingsManager | Settings singleton |

use crate::catalog::CatalogManager;
use crate::checkout::{self, Checkout};
use crate::core::{Config, CoreError, CoreResult};
use crate::customers::CustomerRegistry;
use crate::expenses::ExpenseLedger;
use crate::history::OrderHistory;
use crate::settings::SettingsManager;
use crate::store::{BackupSnapshot, Store, StoreError};
use crate::users::UserRegistry;

pub struct PosState {
    pub config: Config,
    store: Store,
    pub catalog: CatalogManager,
    pub customers: CustomerRegistry,
    pub history: OrderHistory,
    pub users: UserRegistry,
    pub expenses: ExpenseLedger,
    pub settings: SettingsManager,
}

impl PosState {
    /// Open the store in the configured work directory and load every
    /// manager.
    pub fn initialize(config: Config) -> CoreResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(StoreError::from)?;
        let store = Store::open(config.database_path(), config.capacity())?;
        Self::with_store(config, store)
    }

    /// Fully in-memory instance (tests, ephemeral demo sessions).
    pub fn initialize_in_memory(config: Config) -> CoreResult<Self> {
        let store = Store::open_in_memory(config.capacity())?;
        Self::with_store(config, store)
    }

    fn with_store(config: Config, store: Store) -> CoreResult<Self> {
        let catalog = CatalogManager::load(store.clone())?;
        let customers = CustomerRegistry::load(store.clone())?;
        let history = OrderHistory::load(store.clone())?;
        let users = UserRegistry::load(store.clone())?;
        let expenses = ExpenseLedger::load(store.clone())?;
        let settings = SettingsManager::load(store.clone())?;

        tracing::info!(
            products = catalog.products().len(),
            orders = history.orders().len(),
            tabs = customers.customers().len(),
            "engine initialized"
        );

        Ok(Self {
            config,
            store,
            catalog,
            customers,
            history,
            users,
            expenses,
            settings,
        })
    }

    // ── Checkout delegation ─────────────────────────────────────────

    /// Commit the session's cart as an order and retire the session.
    pub fn confirm_payment(&mut self, customer_id: &str) -> CoreResult<Checkout> {
        checkout::confirm_payment(&self.store, &mut self.customers, &mut self.history, customer_id)
    }

    /// Reopen a committed order for editing (enters edit mode).
    pub fn restore_order(&mut self, order_id: &str) -> CoreResult<()> {
        checkout::restore_order(&mut self.customers, &self.history, order_id)
    }

    // ── Backup / restore ────────────────────────────────────────────

    /// Snapshot every collection.
    pub fn export_all(&self) -> CoreResult<BackupSnapshot> {
        Ok(self.store.export_all()?)
    }

    /// Snapshot every collection as pretty-printed JSON (backup file
    /// content).
    pub fn export_json(&self) -> CoreResult<String> {
        let snapshot = self.export_all()?;
        snapshot
            .to_json()
            .map_err(|e| CoreError::Store(StoreError::Serialization(e)))
    }

    /// Replace every collection from a parsed snapshot, then reload the
    /// managers so memory matches disk.
    pub fn import_all(&mut self, snapshot: &BackupSnapshot) -> CoreResult<()> {
        self.store.import_all(snapshot)?;
        self.reload()
    }

    /// Parse and import a backup file. A file missing `version` or
    /// `data` is rejected before anything is touched.
    pub fn import_json(&mut self, json: &str) -> CoreResult<()> {
        let snapshot = BackupSnapshot::from_json(json)
            .map_err(|e| CoreError::validation(format!("invalid backup file: {e}")))?;
        self.import_all(&snapshot)
    }

    /// Clear every collection, then reload (which re-seeds the default
    /// admin).
    pub fn factory_reset(&mut self) -> CoreResult<()> {
        self.store.factory_reset()?;
        self.reload()
    }

    fn reload(&mut self) -> CoreResult<()> {
        self.catalog = CatalogManager::load(self.store.clone())?;
        self.customers = CustomerRegistry::load(self.store.clone())?;
        self.history = OrderHistory::load(self.store.clone())?;
        self.users = UserRegistry::load(self.store.clone())?;
        self.expenses = ExpenseLedger::load(self.store.clone())?;
        self.settings = SettingsManager::load(self.store.clone())?;
        Ok(())
    }
}
