//! Validation error types with detailed rejection reasons.

use std::fmt;
use thiserror::Error;

/// The kind of validation error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Input was blank when a value was required.
    Empty,
    /// Input exceeded maximum allowed length.
    TooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length of input.
        actual: usize,
    },
    /// Input did not match expected format.
    InvalidFormat {
        /// Expected format description.
        expected: String,
        /// What was actually provided.
        actual: String,
    },
    /// Value is already taken by another record.
    Taken {
        /// The duplicated value.
        value: String,
    },
    /// Value does not match its confirmation field.
    Mismatch {
        /// The field this value should have matched.
        other: String,
    },
    /// Input contained null bytes.
    NullByte,
    /// Input contained control characters.
    ControlCharacters,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "can't be blank"),
            Self::TooLong { max, actual } => {
                write!(f, "input too long: {actual} chars exceeds max of {max}")
            }
            Self::InvalidFormat { expected, actual } => {
                write!(f, "invalid format: expected {expected}, got '{actual}'")
            }
            Self::Taken { value } => write!(f, "'{value}' has already been taken"),
            Self::Mismatch { other } => write!(f, "doesn't match {other}"),
            Self::NullByte => write!(f, "input contains null byte"),
            Self::ControlCharacters => write!(f, "input contains control characters"),
        }
    }
}

/// Error returned when validation fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed for '{field}': {kind}")]
pub struct ValidationError {
    /// The name of the field that failed validation.
    pub field: String,
    /// The kind of validation error.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// Create an "empty" validation error.
    #[must_use]
    pub fn empty(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::Empty)
    }

    /// Create a "too long" validation error.
    #[must_use]
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        Self::new(field, ValidationErrorKind::TooLong { max, actual })
    }

    /// Create an "invalid format" validation error.
    #[must_use]
    pub fn invalid_format(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(
            field,
            ValidationErrorKind::InvalidFormat {
                expected: expected.into(),
                actual: actual.into(),
            },
        )
    }

    /// Create a "taken" validation error for a uniqueness violation.
    #[must_use]
    pub fn taken(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            field,
            ValidationErrorKind::Taken {
                value: value.into(),
            },
        )
    }

    /// Create a "mismatch" validation error for a confirmation field.
    #[must_use]
    pub fn mismatch(field: impl Into<String>, other: impl Into<String>) -> Self {
        Self::new(
            field,
            ValidationErrorKind::Mismatch {
                other: other.into(),
            },
        )
    }

    /// Create a "null byte" validation error.
    #[must_use]
    pub fn null_byte(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::NullByte)
    }

    /// Create a "control characters" validation error.
    #[must_use]
    pub fn control_characters(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::ControlCharacters)
    }

    /// Check if this is an empty error.
    #[must_use]
    pub fn is_empty_error(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::Empty)
    }

    /// Check if this is a uniqueness violation.
    #[must_use]
    pub fn is_taken(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::Taken { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_error() {
        let err = ValidationError::empty("name");
        assert_eq!(err.field, "name");
        assert!(err.is_empty_error());
        assert_eq!(err.to_string(), "validation failed for 'name': can't be blank");
    }

    #[test]
    fn test_too_long_error() {
        let err = ValidationError::too_long("name", 10, 20);
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_taken_error() {
        let err = ValidationError::taken("name", "abc");
        assert!(err.is_taken());
        assert!(err.to_string().contains("'abc' has already been taken"));
    }

    #[test]
    fn test_mismatch_error() {
        let err = ValidationError::mismatch("password_confirmation", "password");
        assert_eq!(
            err.to_string(),
            "validation failed for 'password_confirmation': doesn't match password"
        );
    }

    #[test]
    fn test_invalid_format_error() {
        let err = ValidationError::invalid_format("email", "local@domain.tld", "axc");
        assert!(err.to_string().contains("got 'axc'"));
        assert!(!err.is_empty_error());
    }
}
