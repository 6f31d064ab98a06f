//! Field validation for users and credentials.
//!
//! Failures are collected and returned, never raised: a user with a blank
//! name is simply invalid.

use scholar_validation::{
    sanitize_handle, ValidationBuilder, ValidationError, MAX_FULL_NAME_LENGTH,
    MAX_USER_NAME_LENGTH,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ports::UserDirectory;
use crate::types::User;

/// Validates every field of `user`.
///
/// The name must be non-blank, within length, free of control characters and
/// not used by another user in `directory` (exact, case-sensitive match). The
/// email must be a well-formed address. A present handle must be well formed.
///
/// # Errors
///
/// Returns every failure found.
pub fn validate_user(
    user: &User,
    directory: &(impl UserDirectory + ?Sized),
) -> Result<(), Vec<ValidationError>> {
    let taken = directory
        .find_by_name(&user.name)
        .is_some_and(|existing| existing.id != user.id);

    ValidationBuilder::new()
        .validate_not_empty("name", &user.name)
        .validate_max_length("name", &user.name, MAX_USER_NAME_LENGTH)
        .validate_no_control_chars("name", &user.name)
        .validate_unique("name", &user.name, taken)
        .validate_max_length("full_name", &user.full_name, MAX_FULL_NAME_LENGTH)
        .validate_no_control_chars("full_name", &user.full_name)
        .validate_email("email", &user.email)
        .validate(|| match user.handle.as_deref() {
            Some(handle) if !handle.trim().is_empty() => sanitize_handle(handle).map(|_| ()),
            _ => Ok(()),
        })
        .finish()
}

/// True when [`validate_user`] finds nothing wrong.
#[must_use]
pub fn is_valid(user: &User, directory: &(impl UserDirectory + ?Sized)) -> bool {
    validate_user(user, directory).is_ok()
}

/// A password and its confirmation, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    password: String,
    confirmation: String,
}

impl Credentials {
    /// Creates credentials from a password and its confirmation.
    #[must_use]
    pub fn new(password: impl Into<String>, confirmation: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            confirmation: confirmation.into(),
        }
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Checks the password is present and confirmed.
    ///
    /// # Errors
    ///
    /// Returns every failure found.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        ValidationBuilder::new()
            .validate_not_empty("password", &self.password)
            .validate_confirmation("password", &self.password, &self.confirmation)
            .finish()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("password", &"[REDACTED]")
            .field("confirmation", &"[REDACTED]")
            .finish()
    }
}
