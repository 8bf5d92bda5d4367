//! Till Core - single-terminal POS engine
//!
//! Checkout and order-lifecycle engine for a single-location
//! retail/restaurant terminal. All state lives in an embedded
//! key-value store; the UI shell is an external consumer.
//!
//! # Module structure
//!
//! ```text
//! till-core/src/
//! ├── core/          # Config, PosState facade, errors
//! ├── store/         # Embedded KV adapter, backup/restore
//! ├── catalog.rs     # Products + categories
//! ├── customers.rs   # Active sessions (open tabs) and carts
//! ├── checkout/      # Pricing and the payment/restore engine
//! ├── history.rs     # Committed orders
//! ├── users.rs       # Accounts and credential lookup
//! ├── expenses.rs    # Expense ledger
//! ├── settings.rs    # App settings singleton
//! ├── reporting.rs   # CSV export
//! └── utils/         # Logging, validation helpers
//! ```

pub mod catalog;
pub mod checkout;
pub mod core;
pub mod customers;
pub mod expenses;
pub mod history;
pub mod reporting;
pub mod settings;
pub mod store;
pub mod users;
pub mod utils;

// Re-export public types
pub use crate::catalog::CatalogManager;
pub use crate::checkout::{Checkout, Totals};
pub use crate::core::{Config, CoreError, CoreResult, PosState};
pub use crate::customers::CustomerRegistry;
pub use crate::expenses::ExpenseLedger;
pub use crate::history::{OrderHistory, SalesSummary};
pub use crate::settings::SettingsManager;
pub use crate::store::{BackupSnapshot, CapacityPolicy, Store, StoreError, StoreResult};
pub use crate::users::UserRegistry;

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};
