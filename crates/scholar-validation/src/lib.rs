//! Field validation for Scholar user records.
//!
//! Validators for every free-text field a user record carries: login names,
//! full names, email addresses and handles. Two styles are offered:
//!
//! - **Sanitizers** (`sanitize_*`) validate one value and return a typed
//!   [`Sanitized<T>`] wrapper proving the check ran.
//! - **[`ValidationBuilder`]** runs many checks and collects every failure,
//!   for "report, don't raise" record validation.
//!
//! # Example
//!
//! ```
//! use scholar_validation::{sanitize_email, ValidationBuilder};
//!
//! let email = sanitize_email("a@x.com")?;
//! assert_eq!(email.as_str(), "a@x.com");
//!
//! let errors = ValidationBuilder::new()
//!     .validate_not_empty("name", "  ")
//!     .validate_email("email", "ax.com")
//!     .into_errors();
//! assert_eq!(errors.len(), 2);
//! # Ok::<(), scholar_validation::ValidationError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod error;
mod sanitized;
mod strings;

pub use builder::ValidationBuilder;
pub use error::{ValidationError, ValidationErrorKind};
pub use sanitized::{EmailAddress, FullName, Handle, Sanitized, SanitizationKind, UserName};
pub use strings::{
    is_valid_email, sanitize_email, sanitize_full_name, sanitize_handle, sanitize_user_name,
};

/// Maximum length for login names.
pub const MAX_USER_NAME_LENGTH: usize = 255;

/// Maximum length for full names.
pub const MAX_FULL_NAME_LENGTH: usize = 255;

/// Maximum length for email addresses (RFC 5321 path limit).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for handles.
pub const MAX_HANDLE_LENGTH: usize = 64;
