//! Core types for users and roles.
//!
//! This module defines the fundamental types:
//! - [`Role`]: A privilege tier, ordered from student to super administrator
//! - [`UserId`]: A validated user identifier
//! - [`EmailPreferences`]: Per-user notification switches
//! - [`User`]: A user with a role and an optional creator (parent)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Privilege tiers, declared from least to most privileged.
///
/// The derived ordering is the privilege order:
/// `Student < TeachingAssistant < Instructor < Administrator < SuperAdministrator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Enrolled participant.
    #[serde(rename = "Student")]
    Student,
    /// Assists an instructor with one or more courses.
    #[serde(rename = "Teaching Assistant")]
    TeachingAssistant,
    /// Owns courses and assignments.
    #[serde(rename = "Instructor")]
    Instructor,
    /// Manages instructors and their users.
    #[serde(rename = "Administrator")]
    Administrator,
    /// Unrestricted access.
    #[serde(rename = "Super-Administrator")]
    SuperAdministrator,
}

impl Role {
    /// Returns all roles, least privileged first.
    #[must_use]
    pub fn all() -> &'static [Role] {
        &[
            Role::Student,
            Role::TeachingAssistant,
            Role::Instructor,
            Role::Administrator,
            Role::SuperAdministrator,
        ]
    }

    /// Returns the canonical role name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::TeachingAssistant => "Teaching Assistant",
            Self::Instructor => "Instructor",
            Self::Administrator => "Administrator",
            Self::SuperAdministrator => "Super-Administrator",
        }
    }

    /// True for the super administrator tier.
    #[must_use]
    pub const fn is_super_admin(self) -> bool {
        matches!(self, Self::SuperAdministrator)
    }

    /// True for administrators and super administrators.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Administrator | Self::SuperAdministrator)
    }

    /// True for the instructor tier.
    #[must_use]
    pub const fn is_instructor(self) -> bool {
        matches!(self, Self::Instructor)
    }

    /// True for the teaching assistant tier.
    #[must_use]
    pub const fn is_teaching_assistant(self) -> bool {
        matches!(self, Self::TeachingAssistant)
    }

    /// True for the student tier.
    #[must_use]
    pub const fn is_student(self) -> bool {
        matches!(self, Self::Student)
    }

    /// Checks whether this role holds every privilege of `other`.
    ///
    /// A role always has all privileges of itself and of every tier below it.
    #[must_use]
    pub fn has_all_privileges_of(self, other: Role) -> bool {
        self >= other
    }

    /// Returns the roles this role has all privileges of, itself included.
    #[must_use]
    pub fn lesser_roles(self) -> Vec<Role> {
        Self::all()
            .iter()
            .copied()
            .filter(|r| self.has_all_privileges_of(*r))
            .collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|r| r.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidRole {
                reason: format!("unknown role: {s}"),
            })
    }
}

/// A validated user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Maximum length of a user identifier.
    pub const MAX_LENGTH: usize = 128;

    /// Creates a new `UserId` from a UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates a `UserId` from an existing string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid user ID.
    pub fn from_string(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(Error::InvalidUserId {
                reason: "user id cannot be empty".to_string(),
            });
        }
        if id.len() > Self::MAX_LENGTH {
            return Err(Error::InvalidUserId {
                reason: format!(
                    "user id exceeds maximum length of {} characters",
                    Self::MAX_LENGTH
                ),
            });
        }
        Ok(())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_string(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which notification emails a user receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailPreferences {
    /// Email when someone submits work the user reviews.
    pub on_submission: bool,
    /// Email when the user's work is reviewed.
    pub on_review: bool,
    /// Email when the user's review is itself reviewed.
    pub on_review_of_review: bool,
    /// Receive a copy of emails the user sends.
    pub copy_of_emails: bool,
}

impl EmailPreferences {
    /// Every notification switched off.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            on_submission: false,
            on_review: false,
            on_review_of_review: false,
            copy_of_emails: false,
        }
    }
}

impl Default for EmailPreferences {
    /// Review notifications on, copies off.
    fn default() -> Self {
        Self {
            on_submission: true,
            on_review: true,
            on_review_of_review: true,
            copy_of_emails: false,
        }
    }
}

/// A user in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    #[serde(default)]
    pub id: UserId,
    /// Login name, unique across users.
    pub name: String,
    /// Human-readable full name.
    #[serde(default)]
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// The user's privilege tier.
    pub role: Role,
    /// The user that created this one, if any.
    #[serde(default)]
    pub parent_id: Option<UserId>,
    /// Stored instructor for teaching assistants.
    #[serde(default)]
    pub instructor_id: Option<UserId>,
    /// Optional public handle.
    #[serde(default)]
    pub handle: Option<String>,
    /// Notification switches.
    #[serde(default)]
    pub email_preferences: EmailPreferences,
    /// When the user was created.
    #[serde(default = "chrono::Utc::now")]
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    #[serde(default = "chrono::Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh ID.
    ///
    /// No validation happens here; see [`crate::validate_user`].
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self::with_id(UserId::new(), name, email, role)
    }

    /// Creates a new user with a specific ID.
    #[must_use]
    pub fn with_id(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            full_name: String::new(),
            email: email.into(),
            role,
            parent_id: None,
            instructor_id: None,
            handle: None,
            email_preferences: EmailPreferences::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the full name.
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    /// Sets the creator (parent) of this user.
    #[must_use]
    pub fn with_parent(mut self, parent: &UserId) -> Self {
        self.parent_id = Some(parent.clone());
        self
    }

    /// Sets the stored instructor (meaningful for teaching assistants).
    #[must_use]
    pub fn with_instructor(mut self, instructor: &UserId) -> Self {
        self.instructor_id = Some(instructor.clone());
        self
    }

    /// Sets the public handle.
    #[must_use]
    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    /// Sets the notification switches.
    #[must_use]
    pub fn with_email_preferences(mut self, prefs: EmailPreferences) -> Self {
        self.email_preferences = prefs;
        self
    }

    /// True when the user's role is `Super-Administrator`.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role.name() == Role::SuperAdministrator.name()
    }

    /// True when the user's role is teaching assistant.
    #[must_use]
    pub fn is_teaching_assistant(&self) -> bool {
        self.role.is_teaching_assistant()
    }

    /// Checks whether this user created `other`.
    ///
    /// Only the direct parent counts; see
    /// [`crate::AccessPolicy::is_recursively_parent_of`] for the transitive form.
    #[must_use]
    pub fn is_creator_of(&self, other: &User) -> bool {
        other.parent_id.as_ref() == Some(&self.id)
    }

    /// Resolves the instructor this user works under.
    ///
    /// Administrators, super administrators and instructors are their own
    /// instructor; teaching assistants report their stored instructor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InstructorNotAssigned`] for a teaching assistant with
    /// no stored instructor, and [`Error::InvalidRole`] for any other role.
    pub fn instructor_id(&self) -> Result<UserId> {
        match self.role {
            Role::SuperAdministrator | Role::Administrator | Role::Instructor => {
                Ok(self.id.clone())
            }
            Role::TeachingAssistant => {
                self.instructor_id
                    .clone()
                    .ok_or_else(|| Error::InstructorNotAssigned {
                        id: self.id.to_string(),
                    })
            }
            Role::Student => Err(Error::InvalidRole {
                reason: format!("no instructor for role {}", self.role),
            }),
        }
    }

    /// Moves the user under a new creator.
    pub fn set_parent(&mut self, parent: &UserId) {
        self.parent_id = Some(parent.clone());
        self.updated_at = Utc::now();
    }

    /// Updates the contact details.
    pub fn set_contact(&mut self, full_name: impl Into<String>, email: impl Into<String>) {
        self.full_name = full_name.into();
        self.email = email.into();
        self.updated_at = Utc::now();
    }
}
