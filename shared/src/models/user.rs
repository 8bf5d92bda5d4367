//! User Model

use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    /// True only for the seeded super admin
    #[serde(default)]
    pub is_default_admin: bool,
    /// Unset is treated as active; only an explicit `false` blocks login
    #[serde(default)]
    pub is_active: Option<bool>,
    /// ISO expiry timestamp; `None` means the account never expires
    #[serde(default)]
    pub valid_until: Option<String>,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub valid_until: Option<String>,
}

/// Update user payload
///
/// `valid_until` is a double option: outer `None` leaves the expiry
/// unchanged, `Some(None)` clears it, `Some(Some(ts))` sets it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub valid_until: Option<Option<String>>,
}
