//! Configurable user export.

use serde::{Deserialize, Serialize};

use scholar_auth::{User, UserDirectory};

/// Which column groups an export contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Name, full name and email.
    pub personal_details: bool,
    /// Role name and parent name.
    pub role_and_parent: bool,
    /// The four notification switches.
    pub email_options: bool,
    /// Public handle.
    pub handle: bool,
}

impl ExportOptions {
    /// Every column group.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            personal_details: true,
            role_and_parent: true,
            email_options: true,
            handle: true,
        }
    }

    /// True when no column group is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.personal_details || self.role_and_parent || self.email_options || self.handle)
    }
}

const PERSONAL_DETAILS: [&str; 3] = ["name", "full name", "email"];
const ROLE_AND_PARENT: [&str; 2] = ["role", "parent"];
const EMAIL_OPTIONS: [&str; 4] = [
    "email on submission",
    "email on review",
    "email on metareview",
    "copy of emails",
];
const HANDLE: [&str; 1] = ["handle"];

/// Header labels for the selected column groups.
#[must_use]
pub fn export_fields(options: &ExportOptions) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if options.personal_details {
        fields.extend(PERSONAL_DETAILS);
    }
    if options.role_and_parent {
        fields.extend(ROLE_AND_PARENT);
    }
    if options.email_options {
        fields.extend(EMAIL_OPTIONS);
    }
    if options.handle {
        fields.extend(HANDLE);
    }
    fields
}

/// One row per user in directory order, columns matching [`export_fields`].
#[must_use]
pub fn export(directory: &dyn UserDirectory, options: &ExportOptions) -> Vec<Vec<String>> {
    directory
        .all()
        .iter()
        .map(|user| export_user(directory, user, options))
        .collect()
}

fn export_user(directory: &dyn UserDirectory, user: &User, options: &ExportOptions) -> Vec<String> {
    let mut row = Vec::new();
    if options.personal_details {
        row.extend([user.name.clone(), user.full_name.clone(), user.email.clone()]);
    }
    if options.role_and_parent {
        let parent = user
            .parent_id
            .as_ref()
            .and_then(|id| directory.find(id))
            .map(|p| p.name)
            .unwrap_or_default();
        row.extend([user.role.name().to_string(), parent]);
    }
    if options.email_options {
        let prefs = &user.email_preferences;
        row.extend(
            [
                prefs.on_submission,
                prefs.on_review,
                prefs.on_review_of_review,
                prefs.copy_of_emails,
            ]
            .map(|flag| yes_or_no(Some(flag)).to_string()),
        );
    }
    if options.handle {
        row.push(user.handle.clone().unwrap_or_default());
    }
    row
}

/// Renders a flag as `"yes"`, `"no"`, or `""` when unset.
#[must_use]
pub const fn yes_or_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "",
    }
}
