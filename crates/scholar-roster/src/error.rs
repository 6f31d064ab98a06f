//! Error types for roster import and export.

use scholar_validation::ValidationError;
use thiserror::Error;

/// Errors that can occur while importing or exporting users.
#[derive(Debug, Error)]
pub enum RosterError {
    /// An import row does not have the expected number of columns.
    #[error("expected {expected} columns, found {found}")]
    ColumnCount {
        /// Columns present in the row.
        found: usize,
        /// Columns an import row must have.
        expected: usize,
    },

    /// An import row holds invalid field values.
    #[error("invalid row: {}", join(.errors))]
    InvalidRow {
        /// Every failure found in the row.
        errors: Vec<ValidationError>,
    },

    /// A row of a batch import failed.
    #[error("row {row}: {source}")]
    AtRow {
        /// 1-based row number.
        row: usize,
        /// The failure.
        #[source]
        source: Box<RosterError>,
    },

    /// The user directory rejected a change.
    #[error(transparent)]
    Directory(#[from] scholar_auth::Error),
}

impl RosterError {
    /// Returns the 1-based row a batch import stopped at, if any.
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::AtRow { row, .. } => Some(*row),
            _ => None,
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_count_display() {
        let err = RosterError::ColumnCount {
            found: 2,
            expected: 3,
        };
        assert_eq!(
            err.to_string(),
            "expected 3 columns, found 2"
        );
    }

    #[test]
    fn at_row_display_and_row() {
        let err = RosterError::AtRow {
            row: 4,
            source: Box::new(RosterError::InvalidRow {
                errors: vec![ValidationError::empty("email")],
            }),
        };
        assert_eq!(err.row(), Some(4));
        assert!(err.to_string().starts_with("row 4: invalid row:"));
    }
}
