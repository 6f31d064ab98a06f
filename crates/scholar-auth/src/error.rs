//! Error types for user authorization and lookup.

use thiserror::Error;

/// Errors that can occur in the authorization system.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user identifier.
    #[error("invalid user id: {reason}")]
    InvalidUserId {
        /// The reason the user ID is invalid.
        reason: String,
    },

    /// User not found.
    #[error("user not found: {id}")]
    UserNotFound {
        /// The ID or name that could not be resolved.
        id: String,
    },

    /// A user with this name already exists.
    #[error("user name already exists: {name}")]
    UserNameExists {
        /// The duplicated name.
        name: String,
    },

    /// Role is unknown or unsupported for the requested operation.
    #[error("invalid role: {reason}")]
    InvalidRole {
        /// The reason the role is invalid.
        reason: String,
    },

    /// A teaching assistant has no instructor on record.
    #[error("no instructor assigned to teaching assistant: {id}")]
    InstructorNotAssigned {
        /// The teaching assistant's ID.
        id: String,
    },

    /// Permission denied.
    #[error("permission denied: {reason}")]
    PermissionDenied {
        /// The reason permission was denied.
        reason: String,
    },

    /// Invalid policy configuration.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },
}

/// Result type alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;
