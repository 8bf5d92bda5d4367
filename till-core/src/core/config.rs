use std::path::{Path, PathBuf};

use crate::store::CapacityPolicy;

/// Engine configuration
///
/// # Environment variables
///
/// Every item can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | TILL_WORK_DIR | /var/lib/till | Work directory (database + logs) |
/// | TILL_ORDER_BYTE_BUDGET | 2000000 | Serialized order-history byte budget |
/// | TILL_HISTORY_KEEP_RECENT | 50 | Records kept when the budget forces truncation |
/// | TILL_LOG_LEVEL | info | Tracing filter level |
///
/// # Example
///
/// ```ignore
/// TILL_WORK_DIR=/data/till TILL_LOG_LEVEL=debug ...
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding the database file and log output
    pub work_dir: String,
    /// Byte budget for the serialized orders collection
    pub order_byte_budget: usize,
    /// Number of newest orders kept when a write exceeds the budget
    pub history_keep_recent: usize,
    /// Tracing filter level: trace | debug | info | warn | error
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("TILL_WORK_DIR").unwrap_or_else(|_| "/var/lib/till".into()),
            order_byte_budget: std::env::var("TILL_ORDER_BYTE_BUDGET")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2_000_000),
            history_keep_recent: std::env::var("TILL_HISTORY_KEEP_RECENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            log_level: std::env::var("TILL_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Override the work directory, keeping everything else env-driven.
    ///
    /// Commonly used in tests with a temporary directory.
    pub fn with_overrides(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    /// Path of the embedded database file.
    pub fn database_path(&self) -> PathBuf {
        Path::new(&self.work_dir).join("till.redb")
    }

    /// Directory for rotated log files.
    pub fn log_dir(&self) -> PathBuf {
        Path::new(&self.work_dir).join("logs")
    }

    /// Create the work directory structure if it does not exist yet.
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// The capacity policy applied to order-history writes.
    pub fn capacity(&self) -> CapacityPolicy {
        CapacityPolicy {
            order_byte_budget: self.order_byte_budget,
            keep_recent: self.history_keep_recent,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
