//! User/Access Registry
//!
//! Credential records with role, active flag, and optional expiry. The
//! login form is an external collaborator; this module guarantees the
//! `find_by_credentials` semantics it needs. Exactly one account
//! carries `is_default_admin`: seeded when the collection is empty and
//! protected from deletion and demotion.

use chrono::{DateTime, NaiveDate, Utc};

use shared::models::{Role, User, UserCreate, UserUpdate};
use shared::util::new_id;

use crate::core::{CoreError, CoreResult};
use crate::store::Store;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};

pub struct UserRegistry {
    store: Store,
    users: Vec<User>,
}

impl UserRegistry {
    /// Load accounts from the store, seeding the default admin when the
    /// collection is empty.
    pub fn load(store: Store) -> CoreResult<Self> {
        let mut users = store.get_users()?;
        if users.is_empty() {
            users.push(default_admin());
            store.put_users(&users)?;
            tracing::info!("seeded default admin account");
        }
        Ok(Self { store, users })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Whether the given account may pass the admin-only UI gates
    /// (order deletion, settings, user management).
    pub fn is_admin(&self, id: &str) -> bool {
        self.user(id).is_some_and(|u| u.role == Role::Admin)
    }

    /// Credential lookup for the login form: exact username/password
    /// match on an account that is currently allowed to authenticate.
    pub fn find_by_credentials(&self, username: &str, password: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password && can_authenticate(u))
    }

    pub fn add_user(&mut self, create: UserCreate) -> CoreResult<&User> {
        validate_required_text(&create.username, "username", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&create.password, "password", MAX_PASSWORD_LEN)?;
        validate_required_text(&create.name, "name", MAX_NAME_LEN)?;
        if self.users.iter().any(|u| u.username == create.username) {
            return Err(CoreError::validation(format!(
                "username '{}' is already taken",
                create.username
            )));
        }

        let user = User {
            id: new_id(),
            username: create.username,
            password: create.password,
            role: create.role,
            name: create.name,
            is_default_admin: false,
            is_active: create.is_active,
            valid_until: create.valid_until,
        };

        let mut next = self.users.clone();
        next.push(user);
        self.persist(next)?;
        Ok(&self.users[self.users.len() - 1])
    }

    pub fn update_user(&mut self, id: &str, update: UserUpdate) -> CoreResult<()> {
        let Some(idx) = self.users.iter().position(|u| u.id == id) else {
            return Err(CoreError::not_found(format!("user {id}")));
        };

        if self.users[idx].is_default_admin {
            if matches!(update.role, Some(Role::User)) {
                return Err(CoreError::invalid_state(
                    "the default admin cannot be demoted",
                ));
            }
            if update.is_active == Some(false) {
                return Err(CoreError::invalid_state(
                    "the default admin cannot be deactivated",
                ));
            }
            if matches!(update.valid_until, Some(Some(_))) {
                return Err(CoreError::invalid_state(
                    "the default admin cannot be given an expiry",
                ));
            }
        }
        if let Some(username) = &update.username {
            validate_required_text(username, "username", MAX_SHORT_TEXT_LEN)?;
            if self
                .users
                .iter()
                .any(|u| u.id != id && &u.username == username)
            {
                return Err(CoreError::validation(format!(
                    "username '{username}' is already taken"
                )));
            }
        }
        if let Some(password) = &update.password {
            validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
        }

        let mut next = self.users.clone();
        let user = &mut next[idx];
        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(password) = update.password {
            user.password = password;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(is_active) = update.is_active {
            user.is_active = Some(is_active);
        }
        if let Some(valid_until) = update.valid_until {
            user.valid_until = valid_until;
        }
        self.persist(next)
    }

    pub fn delete_user(&mut self, id: &str) -> CoreResult<()> {
        let Some(idx) = self.users.iter().position(|u| u.id == id) else {
            return Err(CoreError::not_found(format!("user {id}")));
        };
        if self.users[idx].is_default_admin {
            return Err(CoreError::invalid_state(
                "the default admin cannot be deleted",
            ));
        }
        let mut next = self.users.clone();
        next.remove(idx);
        self.persist(next)
    }

    fn persist(&mut self, next: Vec<User>) -> CoreResult<()> {
        self.store.put_users(&next)?;
        self.users = next;
        Ok(())
    }
}

/// Whether an account is currently allowed to log in: `is_active` is
/// not explicitly false (unset counts as active), and any expiry lies
/// in the future. Unparseable expiry timestamps fail closed.
pub fn can_authenticate(user: &User) -> bool {
    if user.is_active == Some(false) {
        return false;
    }
    match user.valid_until.as_deref() {
        None => true,
        Some(raw) => parse_expiry(raw).is_some_and(|expiry| expiry > Utc::now()),
    }
}

/// Expiry timestamps come from the management UI as either a full
/// RFC 3339 timestamp or a bare date; a bare date expires at the end of
/// that day (UTC).
fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(23, 59, 59)?.and_utc())
}

fn default_admin() -> User {
    User {
        id: "admin1".to_string(),
        username: "admin".to_string(),
        password: "020890".to_string(),
        role: Role::Admin,
        name: "Administrator".to_string(),
        is_default_admin: true,
        is_active: Some(true),
        valid_until: None,
    }
}
