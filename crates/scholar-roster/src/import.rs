//! Three-column user import.
//!
//! Each row carries a login name, a full name and an email address. Rows
//! naming an existing user update it; other rows create a student. Either way
//! the importing user becomes the parent.

use scholar_auth::{validate_user, EmailPreferences, Role, User, UserStore};
use scholar_validation::{sanitize_email, sanitize_full_name, sanitize_user_name, ValidationError};
use tracing::{debug, info};

use crate::error::{Result, RosterError};

/// Number of columns an import row must have.
pub const IMPORT_COLUMNS: usize = 3;

/// One parsed import row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// Login name.
    pub name: String,
    /// Full name.
    pub full_name: String,
    /// Email address.
    pub email: String,
}

impl ImportRow {
    /// Builds a row from its columns.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::ColumnCount`] unless exactly three columns are
    /// given, and [`RosterError::InvalidRow`] if any value is malformed.
    pub fn from_columns<S: AsRef<str>>(columns: &[S]) -> Result<Self> {
        let [name, full_name, email] = columns else {
            return Err(RosterError::ColumnCount {
                found: columns.len(),
                expected: IMPORT_COLUMNS,
            });
        };

        let mut errors: Vec<ValidationError> = Vec::new();
        let name = sanitize_user_name(name.as_ref()).map_err(|e| errors.push(e)).ok();
        let full_name = match full_name.as_ref().trim() {
            "" => Some(String::new()),
            value => sanitize_full_name(value)
                .map(scholar_validation::Sanitized::into_inner)
                .map_err(|e| errors.push(e))
                .ok(),
        };
        let email = sanitize_email(email.as_ref()).map_err(|e| errors.push(e)).ok();

        match (name, full_name, email) {
            (Some(name), Some(full_name), Some(email)) if errors.is_empty() => Ok(Self {
                name: name.into_inner(),
                full_name,
                email: email.into_inner(),
            }),
            _ => Err(RosterError::InvalidRow { errors }),
        }
    }
}

/// What importing a row did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// A new student was created.
    Created(User),
    /// An existing user was updated.
    Updated(User),
}

impl ImportOutcome {
    /// The user after the import.
    #[must_use]
    pub fn user(&self) -> &User {
        match self {
            Self::Created(user) | Self::Updated(user) => user,
        }
    }
}

/// Counts of a finished batch import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Users created.
    pub created: usize,
    /// Users updated.
    pub updated: usize,
    /// Names of the imported users, in row order.
    pub users: Vec<String>,
}

/// Imports one row on behalf of `importer`.
///
/// # Errors
///
/// Returns [`RosterError::ColumnCount`] for a row without exactly three
/// columns, [`RosterError::InvalidRow`] for invalid values, and
/// [`RosterError::Directory`] if the store rejects the change.
pub fn import_row<S: AsRef<str>>(
    store: &dyn UserStore,
    importer: &User,
    columns: &[S],
) -> Result<ImportOutcome> {
    let row = ImportRow::from_columns(columns)?;

    if let Some(mut existing) = store.find_by_name(&row.name) {
        existing.set_contact(row.full_name, row.email);
        existing.set_parent(&importer.id);
        validate_user(&existing, store).map_err(|errors| RosterError::InvalidRow { errors })?;
        store.update(existing.clone())?;
        info!(user = %existing.name, importer = %importer.name, "updated user from import");
        return Ok(ImportOutcome::Updated(existing));
    }

    let user = User::new(row.name, row.email, Role::Student)
        .with_full_name(row.full_name)
        .with_parent(&importer.id)
        .with_email_preferences(EmailPreferences::default());
    validate_user(&user, store).map_err(|errors| RosterError::InvalidRow { errors })?;
    store.insert(user.clone())?;
    info!(user = %user.name, importer = %importer.name, "created user from import");
    Ok(ImportOutcome::Created(user))
}

/// Imports `rows` in order, stopping at the first failure.
///
/// Rows already imported stay imported when a later row fails.
///
/// # Errors
///
/// Returns [`RosterError::AtRow`] carrying the 1-based number of the failing
/// row.
pub fn import_rows<S: AsRef<str>>(
    store: &dyn UserStore,
    importer: &User,
    rows: &[Vec<S>],
) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();
    for (index, row) in rows.iter().enumerate() {
        let outcome =
            import_row(store, importer, row).map_err(|e| RosterError::AtRow {
                row: index + 1,
                source: Box::new(e),
            })?;
        match outcome {
            ImportOutcome::Created(_) => summary.created += 1,
            ImportOutcome::Updated(_) => summary.updated += 1,
        }
        summary.users.push(outcome.user().name.clone());
    }

    debug!(
        importer = %importer.name,
        created = summary.created,
        updated = summary.updated,
        "import finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_auth::{InMemoryDirectory, UserDirectory};
    use test_case::test_case;

    fn setup() -> (InMemoryDirectory, User) {
        let directory = InMemoryDirectory::new();
        let importer = User::new("inst", "inst@x.com", Role::Instructor);
        assert!(directory.insert(importer.clone()).is_ok());
        (directory, importer)
    }

    #[test_case(&[] ; "empty row")]
    #[test_case(&["abc", "abc xyz"] ; "two columns")]
    #[test_case(&["abc", "abc xyz", "a@x.com", "extra"] ; "four columns")]
    fn wrong_column_count_fails(columns: &[&str]) {
        let (directory, importer) = setup();
        let result = import_row(&directory, &importer, columns);
        assert!(matches!(
            result,
            Err(RosterError::ColumnCount { found, expected: 3 }) if found == columns.len()
        ));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn creates_new_student() {
        let (directory, importer) = setup();
        let outcome = import_row(&directory, &importer, &["abc", "abc xyz", "abcxyz@gmail.com"]);
        assert!(matches!(outcome, Ok(ImportOutcome::Created(_))));

        let user = directory.find_by_name("abc");
        assert!(user.is_some());
        if let Some(user) = user {
            assert_eq!(user.role, Role::Student);
            assert_eq!(user.full_name, "abc xyz");
            assert_eq!(user.parent_id, Some(importer.id.clone()));
            assert!(user.email_preferences.on_submission);
            assert!(user.email_preferences.on_review);
            assert!(user.email_preferences.on_review_of_review);
            assert!(!user.email_preferences.copy_of_emails);
        }
    }

    #[test]
    fn updates_existing_user() {
        let (directory, importer) = setup();
        let existing = User::new("abc", "old@x.com", Role::TeachingAssistant);
        assert!(directory.insert(existing.clone()).is_ok());

        let outcome = import_row(&directory, &importer, &["abc", "abc bbc", "abcbbc@gmail.com"]);
        assert!(matches!(outcome, Ok(ImportOutcome::Updated(_))));

        let user = directory.find(&existing.id);
        assert_eq!(user.as_ref().map(|u| u.email.as_str()), Some("abcbbc@gmail.com"));
        assert_eq!(user.as_ref().map(|u| u.full_name.as_str()), Some("abc bbc"));
        assert_eq!(user.as_ref().and_then(|u| u.parent_id.clone()), Some(importer.id));
        assert_eq!(user.map(|u| u.role), Some(Role::TeachingAssistant));
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn invalid_email_is_rejected() {
        let (directory, importer) = setup();
        let result = import_row(&directory, &importer, &["abc", "abc xyz", "ax.com"]);
        let errors = match result {
            Err(RosterError::InvalidRow { errors }) => errors,
            _ => Vec::new(),
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
        assert!(directory.find_by_name("abc").is_none());
    }

    #[test]
    fn row_values_are_trimmed() {
        let row = ImportRow::from_columns(&["  abc ", " abc xyz ", " a@x.com "]);
        assert_eq!(
            row.ok(),
            Some(ImportRow {
                name: "abc".to_string(),
                full_name: "abc xyz".to_string(),
                email: "a@x.com".to_string(),
            })
        );
    }

    #[test]
    fn blank_full_name_is_allowed() {
        let row = ImportRow::from_columns(&["abc", "", "a@x.com"]);
        assert_eq!(row.map(|r| r.full_name).ok(), Some(String::new()));
    }

    // ===================
    // Batch Import Tests
    // ===================

    #[test]
    fn batch_import_counts() {
        let (directory, importer) = setup();
        assert!(directory.insert(User::new("old", "old@x.com", Role::Student)).is_ok());
        let rows = vec![
            vec!["abc", "abc xyz", "abc@x.com"],
            vec!["old", "old timer", "old@y.com"],
            vec!["xyz", "xyz abc", "xyz@x.com"],
        ];

        let summary = import_rows(&directory, &importer, &rows);
        assert_eq!(
            summary.ok(),
            Some(ImportSummary {
                created: 2,
                updated: 1,
                users: vec!["abc".into(), "old".into(), "xyz".into()],
            })
        );
    }

    #[test]
    fn batch_import_stops_at_first_bad_row() {
        let (directory, importer) = setup();
        let rows = vec![
            vec!["abc", "abc xyz", "abc@x.com"],
            vec!["bad", "only two"],
            vec!["xyz", "xyz abc", "xyz@x.com"],
        ];

        let err = import_rows(&directory, &importer, &rows).err();
        assert_eq!(err.as_ref().and_then(RosterError::row), Some(2));
        assert!(directory.find_by_name("abc").is_some());
        assert!(directory.find_by_name("xyz").is_none());
    }
}
