//! User query command implementation.
//!
//! Handles listing, lookup, impersonation checks, instructor resolution and
//! validation.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use scholar_auth::{validate_user, EmailPreferences, User, UserDirectory};

use crate::cli::UserCommands;
use crate::error::CliError;
use crate::output::{write_columns, OutputFormat, TableDisplay};
use crate::snapshot::Workspace;

/// Handler for user subcommands.
pub struct UsersCommand<'a> {
    workspace: &'a Workspace,
}

impl<'a> UsersCommand<'a> {
    /// Creates a new user command handler.
    #[must_use]
    pub const fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Executes the user subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if a user cannot be resolved, impersonation is denied,
    /// validation finds invalid users, or output fails.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &UserCommands,
    ) -> Result<(), CliError> {
        match command {
            UserCommands::List { actor } => self.list(out, format, actor),
            UserCommands::Available { actor, prefix } => self.available(out, format, actor, prefix),
            UserCommands::Show { login } => self.show(out, format, login),
            UserCommands::CanImpersonate { actor, target } => {
                self.can_impersonate(out, format, actor, target)
            }
            UserCommands::Instructor { login } => self.instructor(out, format, login),
            UserCommands::Validate => self.validate(out, format),
        }
    }

    fn list<W: Write>(&self, out: &mut W, format: &OutputFormat, actor: &str) -> Result<(), CliError> {
        let actor = self.workspace.resolve(actor)?;
        let users = self.workspace.policy()?.user_list(&actor);
        format.write(out, &self.summarize(&users))
    }

    fn available<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        actor: &str,
        prefix: &str,
    ) -> Result<(), CliError> {
        let actor = self.workspace.resolve(actor)?;
        let users = self.workspace.policy()?.available_users(&actor, prefix);
        format.write(out, &self.summarize(&users))
    }

    fn show<W: Write>(&self, out: &mut W, format: &OutputFormat, login: &str) -> Result<(), CliError> {
        let user = self.workspace.resolve(login)?;
        let ancestry = self
            .workspace
            .policy()?
            .ancestors_of(&user)
            .into_iter()
            .map(|u| u.name)
            .collect();
        let detail = UserDetail {
            id: user.id.to_string(),
            name: user.name.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            parent: self.parent_name(&user),
            ancestry,
            instructor: user
                .instructor_id
                .as_ref()
                .and_then(|id| self.workspace.directory.find(id))
                .map(|u| u.name),
            handle: user.handle.clone(),
            email_preferences: user.email_preferences,
            created_at: user.created_at.to_rfc3339(),
        };
        format.write(out, &detail)
    }

    fn can_impersonate<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        actor: &str,
        target: &str,
    ) -> Result<(), CliError> {
        let actor = self.workspace.resolve(actor)?;
        let target = self.workspace.resolve(target)?;
        let decision = self.workspace.policy()?.require_impersonation(&actor, &target);

        let check = ImpersonationCheck {
            actor: actor.name.clone(),
            target: target.name.clone(),
            allowed: decision.is_ok(),
        };
        format.write(out, &check)?;
        decision.map_err(CliError::from)
    }

    fn instructor<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        login: &str,
    ) -> Result<(), CliError> {
        let user = self.workspace.resolve(login)?;
        let instructor = self.workspace.policy()?.get_instructor(&user)?;
        let info = InstructorInfo {
            user: user.name,
            instructor: instructor.name,
            instructor_id: instructor.id.to_string(),
        };
        format.write(out, &info)
    }

    fn validate<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let users = self.workspace.directory.all();
        let invalid: Vec<InvalidUser> = users
            .iter()
            .filter_map(|user| {
                validate_user(user, &self.workspace.directory)
                    .err()
                    .map(|errors| InvalidUser {
                        name: user.name.clone(),
                        errors: errors.iter().map(ToString::to_string).collect(),
                    })
            })
            .collect();

        let report = ValidationReport {
            checked: users.len(),
            invalid,
        };
        info!(checked = report.checked, invalid = report.invalid.len(), "validated users");
        format.write(out, &report)?;

        if report.invalid.is_empty() {
            Ok(())
        } else {
            Err(CliError::Command(format!(
                "{} of {} users are invalid",
                report.invalid.len(),
                report.checked
            )))
        }
    }

    fn summarize(&self, users: &[User]) -> UserList {
        UserList {
            users: users
                .iter()
                .map(|u| UserSummary {
                    name: u.name.clone(),
                    full_name: u.full_name.clone(),
                    email: u.email.clone(),
                    role: u.role.to_string(),
                    parent: self.parent_name(u),
                })
                .collect(),
        }
    }

    fn parent_name(&self, user: &User) -> Option<String> {
        user.parent_id
            .as_ref()
            .and_then(|id| self.workspace.directory.find(id))
            .map(|p| p.name)
    }
}

// Output types

/// List of users.
#[derive(Debug, Clone, Serialize)]
pub struct UserList {
    /// Users.
    pub users: Vec<UserSummary>,
}

/// User information for listing.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    /// Login name.
    pub name: String,
    /// Full name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Role name.
    pub role: String,
    /// Parent name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Detailed user information.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    /// User ID.
    pub id: String,
    /// Login name.
    pub name: String,
    /// Full name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Role name.
    pub role: String,
    /// Parent name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Creators above the user, nearest first.
    pub ancestry: Vec<String>,
    /// Stored instructor name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    /// Public handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// Notification switches.
    pub email_preferences: EmailPreferences,
    /// Creation timestamp.
    pub created_at: String,
}

/// Result of an impersonation check.
#[derive(Debug, Clone, Serialize)]
pub struct ImpersonationCheck {
    /// Acting user.
    pub actor: String,
    /// Target user.
    pub target: String,
    /// Whether the actor may impersonate the target.
    pub allowed: bool,
}

/// Instructor a user works under.
#[derive(Debug, Clone, Serialize)]
pub struct InstructorInfo {
    /// The user asked about.
    pub user: String,
    /// Instructor name.
    pub instructor: String,
    /// Instructor ID.
    pub instructor_id: String,
}

/// Validation results for the whole directory.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Users checked.
    pub checked: usize,
    /// Users that failed validation.
    pub invalid: Vec<InvalidUser>,
}

/// A user that failed validation.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidUser {
    /// Login name.
    pub name: String,
    /// Failure messages.
    pub errors: Vec<String>,
}

impl TableDisplay for UserList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.users.is_empty() {
            writeln!(writer, "No users")?;
            return Ok(());
        }

        let headers = ["name", "full name", "email", "role", "parent"].map(String::from);
        let rows: Vec<Vec<String>> = self
            .users
            .iter()
            .map(|u| {
                vec![
                    u.name.clone(),
                    u.full_name.clone(),
                    u.email.clone(),
                    u.role.clone(),
                    u.parent.clone().unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        write_columns(writer, &headers, &rows)?;
        writeln!(writer)?;
        writeln!(writer, "{} user(s)", self.users.len())?;
        Ok(())
    }
}

impl TableDisplay for UserDetail {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "User: {}", self.name)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer, "ID:               {}", self.id)?;
        writeln!(writer, "Full Name:        {}", self.full_name)?;
        writeln!(writer, "Email:            {}", self.email)?;
        writeln!(writer, "Role:             {}", self.role)?;
        writeln!(writer, "Parent:           {}", self.parent.as_deref().unwrap_or("-"))?;
        if !self.ancestry.is_empty() {
            writeln!(writer, "Ancestry:         {}", self.ancestry.join(" > "))?;
        }
        if let Some(instructor) = &self.instructor {
            writeln!(writer, "Instructor:       {instructor}")?;
        }
        if let Some(handle) = &self.handle {
            writeln!(writer, "Handle:           {handle}")?;
        }
        writeln!(writer, "Created:          {}", self.created_at)?;
        writeln!(writer)?;
        writeln!(writer, "Email")?;
        let prefs = &self.email_preferences;
        writeln!(writer, "  On Submission:  {}", scholar_roster::yes_or_no(Some(prefs.on_submission)))?;
        writeln!(writer, "  On Review:      {}", scholar_roster::yes_or_no(Some(prefs.on_review)))?;
        writeln!(
            writer,
            "  On Metareview:  {}",
            scholar_roster::yes_or_no(Some(prefs.on_review_of_review))
        )?;
        writeln!(writer, "  Copy of Emails: {}", scholar_roster::yes_or_no(Some(prefs.copy_of_emails)))?;
        Ok(())
    }
}

impl TableDisplay for ImpersonationCheck {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.allowed {
            writeln!(writer, "✓ {} can impersonate {}", self.actor, self.target)?;
        } else {
            writeln!(writer, "✗ {} cannot impersonate {}", self.actor, self.target)?;
        }
        Ok(())
    }
}

impl TableDisplay for InstructorInfo {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{} works under {} ({})", self.user, self.instructor, self.instructor_id)?;
        Ok(())
    }
}

impl TableDisplay for ValidationReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.invalid.is_empty() {
            writeln!(writer, "✓ all {} user(s) valid", self.checked)?;
            return Ok(());
        }
        for user in &self.invalid {
            writeln!(writer, "✗ {}", user.name)?;
            for error in &user.errors {
                writeln!(writer, "    {error}")?;
            }
        }
        Ok(())
    }
}
