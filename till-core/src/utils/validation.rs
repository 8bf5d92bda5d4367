//! Input validation helpers
//!
//! Centralized text length constants and validation functions used at
//! the CRUD boundaries of the managers.

use crate::core::{CoreError, CoreResult};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, category, customer, user display name
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions (expenses)
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Short identifiers: phone numbers, usernames
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty (after trimming) and
/// within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(CoreError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an amount is a finite number ≥ 0.
pub fn validate_non_negative(value: f64, field: &str) -> CoreResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::validation(format!(
            "{field} must be zero or positive"
        )));
    }
    Ok(())
}

/// Validate that an amount is a finite number > 0.
pub fn validate_positive(value: f64, field: &str) -> CoreResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::validation(format!("{field} must be positive")));
    }
    Ok(())
}
