//! Shared types for the Till POS core
//!
//! Data models and id/time utilities used by the engine crate and by
//! UI shells embedding it.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
