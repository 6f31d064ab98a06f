//! String validation and sanitization functions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::sanitized::{EmailAddress, FullName, Handle, Sanitized, UserName};
use crate::{MAX_EMAIL_LENGTH, MAX_FULL_NAME_LENGTH, MAX_HANDLE_LENGTH, MAX_USER_NAME_LENGTH};

/// Regex for email addresses: one `@`, no whitespace, at least one dot in the domain.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@([^@\s]+\.)+[^@\s]+$").unwrap_or_else(|_| unreachable!())
});

/// Regex for handles (alphanumeric, dots, hyphens, underscores).
static HANDLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9._-]*$").unwrap_or_else(|_| unreachable!()));

/// Check for null bytes in input.
fn check_null_bytes(field: &str, input: &str) -> Result<(), ValidationError> {
    if input.contains('\0') {
        return Err(ValidationError::null_byte(field));
    }
    Ok(())
}

/// Check for control characters (tabs and newlines included).
fn check_control_chars(field: &str, input: &str) -> Result<(), ValidationError> {
    if input.chars().any(char::is_control) {
        return Err(ValidationError::control_characters(field));
    }
    Ok(())
}

/// Shared checks for single-line text fields: trimmed, non-blank, bounded.
fn sanitize_line(field: &str, input: &str, max: usize) -> Result<String, ValidationError> {
    let value = input.trim();

    if value.is_empty() {
        return Err(ValidationError::empty(field));
    }

    if value.len() > max {
        return Err(ValidationError::too_long(field, max, value.len()));
    }

    check_null_bytes(field, value)?;
    check_control_chars(field, value)?;

    Ok(value.to_string())
}

/// Sanitize and validate a login name.
///
/// Names must be non-blank after trimming, at most
/// [`MAX_USER_NAME_LENGTH`] bytes, and free of control characters.
///
/// # Errors
///
/// Returns `ValidationError` if the name is invalid.
///
/// # Example
///
/// ```
/// use scholar_validation::sanitize_user_name;
///
/// assert_eq!(sanitize_user_name("abc")?.as_str(), "abc");
/// assert!(sanitize_user_name("  ").is_err());
/// # Ok::<(), scholar_validation::ValidationError>(())
/// ```
pub fn sanitize_user_name(name: &str) -> Result<Sanitized<UserName>, ValidationError> {
    sanitize_line("name", name, MAX_USER_NAME_LENGTH).map(Sanitized::new)
}

/// Sanitize and validate a full name.
///
/// # Errors
///
/// Returns `ValidationError` if the name is blank, too long or contains
/// control characters.
pub fn sanitize_full_name(name: &str) -> Result<Sanitized<FullName>, ValidationError> {
    sanitize_line("full_name", name, MAX_FULL_NAME_LENGTH).map(Sanitized::new)
}

/// Sanitize and validate an email address.
///
/// Accepts `local@domain.tld`; the domain needs at least one dot.
///
/// # Errors
///
/// Returns `ValidationError` if the address is blank or malformed.
///
/// # Example
///
/// ```
/// use scholar_validation::sanitize_email;
///
/// assert!(sanitize_email("a@x.com").is_ok());
/// assert!(sanitize_email("a@x").is_err());
/// ```
pub fn sanitize_email(email: &str) -> Result<Sanitized<EmailAddress>, ValidationError> {
    let field = "email";
    let email = sanitize_line(field, email, MAX_EMAIL_LENGTH)?;

    if !EMAIL_REGEX.is_match(&email) {
        return Err(ValidationError::invalid_format(
            field,
            "local@domain.tld",
            email,
        ));
    }

    Ok(Sanitized::new(email))
}

/// Sanitize and validate a public handle.
///
/// # Errors
///
/// Returns `ValidationError` if the handle is blank, too long or uses
/// characters other than alphanumerics, dots, hyphens and underscores.
pub fn sanitize_handle(handle: &str) -> Result<Sanitized<Handle>, ValidationError> {
    let field = "handle";
    let handle = sanitize_line(field, handle, MAX_HANDLE_LENGTH)?;

    if !HANDLE_REGEX.is_match(&handle) {
        return Err(ValidationError::invalid_format(
            field,
            "alphanumeric start, then alphanumeric/dots/hyphens/underscores",
            handle,
        ));
    }

    Ok(Sanitized::new(handle))
}

/// Returns true when `email` is a well-formed address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    sanitize_email(email).is_ok()
}
