//! Validation builder for fluent validation chains.

use crate::error::ValidationError;

/// A builder for performing multiple validations with error collection.
///
/// Every check runs; failures are collected rather than short-circuiting, so a
/// caller can report all problems with a record at once.
///
/// # Example
///
/// ```
/// use scholar_validation::ValidationBuilder;
///
/// let result = ValidationBuilder::new()
///     .validate_not_empty("name", "abc")
///     .validate_email("email", "abc@example.com")
///     .finish();
///
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Default)]
pub struct ValidationBuilder {
    errors: Vec<ValidationError>,
}

impl ValidationBuilder {
    /// Create a new validation builder.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add a validation check.
    ///
    /// The closure should return `Ok(())` if validation passes,
    /// or `Err(ValidationError)` if it fails.
    #[must_use]
    pub fn validate<F>(mut self, check: F) -> Self
    where
        F: FnOnce() -> Result<(), ValidationError>,
    {
        if let Err(e) = check() {
            self.errors.push(e);
        }
        self
    }

    /// Validate that a value is not blank.
    #[must_use]
    pub fn validate_not_empty(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(ValidationError::empty(field));
        }
        self
    }

    /// Validate that a value is within a maximum length.
    #[must_use]
    pub fn validate_max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        if value.len() > max {
            self.errors.push(ValidationError::too_long(field, max, value.len()));
        }
        self
    }

    /// Validate that a value contains no control characters anywhere,
    /// including leading or trailing newlines and tabs.
    #[must_use]
    pub fn validate_no_control_chars(mut self, field: &str, value: &str) -> Self {
        if value.contains('\0') {
            self.errors.push(ValidationError::null_byte(field));
        } else if value.chars().any(char::is_control) {
            self.errors.push(ValidationError::control_characters(field));
        }
        self
    }

    /// Validate an email address.
    ///
    /// Blank addresses are reported as empty, anything else that fails the
    /// address pattern as an invalid format. The value is checked as stored:
    /// surrounding whitespace is an invalid format too.
    #[must_use]
    pub fn validate_email(mut self, field: &str, value: &str) -> Self {
        match crate::sanitize_email(value) {
            Ok(email) if email.as_str() != value => {
                self.errors
                    .push(ValidationError::invalid_format(field, "local@domain.tld", value));
            }
            Ok(_) => {}
            Err(mut e) => {
                e.field = field.to_string();
                self.errors.push(e);
            }
        }
        self
    }

    /// Validate that a value is not already used by another record.
    #[must_use]
    pub fn validate_unique(mut self, field: &str, value: &str, taken: bool) -> Self {
        if taken {
            self.errors.push(ValidationError::taken(field, value));
        }
        self
    }

    /// Validate that a value equals its confirmation.
    #[must_use]
    pub fn validate_confirmation(
        mut self,
        field: &str,
        value: &str,
        confirmation: &str,
    ) -> Self {
        if value != confirmation {
            self.errors
                .push(ValidationError::mismatch(format!("{field}_confirmation"), field));
        }
        self
    }

    /// Check if any errors have been collected.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the number of errors collected.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Finish validation and return result.
    ///
    /// Returns `Ok(())` if all validations passed, or `Err` with all errors
    /// if any validation failed.
    pub fn finish(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    /// Consume and return all collected errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}
