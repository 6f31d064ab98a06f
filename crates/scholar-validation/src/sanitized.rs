//! Sanitized value wrapper types with marker traits.

use std::fmt;
use std::marker::PhantomData;

/// Marker trait for sanitization kinds.
pub trait SanitizationKind: private::Sealed {}

mod private {
    pub trait Sealed {}
}

/// Marker for login names.
#[derive(Debug, Clone, Copy)]
pub struct UserName;
impl private::Sealed for UserName {}
impl SanitizationKind for UserName {}

/// Marker for full (display) names.
#[derive(Debug, Clone, Copy)]
pub struct FullName;
impl private::Sealed for FullName {}
impl SanitizationKind for FullName {}

/// Marker for email addresses.
#[derive(Debug, Clone, Copy)]
pub struct EmailAddress;
impl private::Sealed for EmailAddress {}
impl SanitizationKind for EmailAddress {}

/// Marker for public handles.
#[derive(Debug, Clone, Copy)]
pub struct Handle;
impl private::Sealed for Handle {}
impl SanitizationKind for Handle {}

/// A wrapper for validated values with type-level guarantees.
///
/// The type parameter `K` records which validator accepted the value, so an
/// unchecked string cannot be passed where an email address is expected.
///
/// # Example
///
/// ```
/// use scholar_validation::{sanitize_email, EmailAddress, Sanitized};
///
/// let email: Sanitized<EmailAddress> = sanitize_email(" abc@example.com ")?;
/// assert_eq!(email.as_str(), "abc@example.com");
/// # Ok::<(), scholar_validation::ValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sanitized<K: SanitizationKind> {
    value: String,
    _marker: PhantomData<K>,
}

impl<K: SanitizationKind> Sanitized<K> {
    /// Create a new sanitized value.
    ///
    /// This should only be called after the value has been validated.
    #[must_use]
    pub fn new(value: String) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the sanitized string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume the wrapper and return the inner value.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.value
    }
}

impl<K: SanitizationKind> AsRef<str> for Sanitized<K> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<K: SanitizationKind> fmt::Display for Sanitized<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
