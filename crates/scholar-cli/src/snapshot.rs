//! JSON snapshots of users, courses and assignments.
//!
//! The CLI has no database; it loads a snapshot into the in-memory adapters
//! and, for imports, writes the result back.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use scholar_auth::{
    find_by_login, AccessPolicy, Assignment, Course, InMemoryCatalog, InMemoryDirectory,
    PolicyConfig, User, UserDirectory,
};

use crate::error::CliError;

/// Serialized form of the data a command works on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Users in directory order.
    #[serde(default)]
    pub users: Vec<User>,
    /// Courses.
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Assignments.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Snapshot {
    /// Reads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let raw = fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&raw).map_err(|e| {
            CliError::Config(format!("invalid snapshot {}: {e}", path.display()))
        })?;
        debug!(
            path = %path.display(),
            users = snapshot.users.len(),
            courses = snapshot.courses.len(),
            assignments = snapshot.assignments.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Writes the snapshot to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
        fs::write(path, raw)?;
        info!(path = %path.display(), users = self.users.len(), "saved snapshot");
        Ok(())
    }
}

/// Loads a policy configuration from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_config(path: &Path) -> Result<PolicyConfig, CliError> {
    let raw = fs::read_to_string(path)?;
    let config: PolicyConfig = serde_json::from_str(&raw)
        .map_err(|e| CliError::Config(format!("invalid config {}: {e}", path.display())))?;
    config.validate()?;
    Ok(config)
}

/// Loaded data plus the policy configuration.
#[derive(Debug)]
pub struct Workspace {
    /// Users.
    pub directory: InMemoryDirectory,
    /// Courses and assignments.
    pub catalog: InMemoryCatalog,
    /// Policy limits.
    pub config: PolicyConfig,
}

impl Workspace {
    /// Builds a workspace from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot repeats a user ID or name, or the
    /// configuration is invalid.
    pub fn from_snapshot(snapshot: Snapshot, config: PolicyConfig) -> Result<Self, CliError> {
        config.validate()?;
        let directory = InMemoryDirectory::with_users(snapshot.users)?;
        let catalog = InMemoryCatalog::with_records(snapshot.courses, snapshot.assignments);
        Ok(Self {
            directory,
            catalog,
            config,
        })
    }

    /// Loads the snapshot at `data` with the configuration at `config`, or
    /// the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either file is unreadable or invalid.
    pub fn load(data: &Path, config: Option<&Path>) -> Result<Self, CliError> {
        let config = config.map(load_config).transpose()?.unwrap_or_default();
        Self::from_snapshot(Snapshot::load(data)?, config)
    }

    /// Builds the access policy over this workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn policy(&self) -> Result<AccessPolicy<'_>, CliError> {
        Ok(AccessPolicy::with_config(
            &self.directory,
            &self.catalog,
            self.config.clone(),
        )?)
    }

    /// Resolves a user by login (email, or name).
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UserNotFound`] if no single user matches.
    pub fn resolve(&self, login: &str) -> Result<User, CliError> {
        find_by_login(&self.directory, login)
            .ok_or_else(|| CliError::UserNotFound(login.to_string()))
    }

    /// Captures the current state as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            users: self.directory.all(),
            courses: self.catalog.courses(),
            assignments: self.catalog.assignments(),
        }
    }
}
