//! CLI error types.

use std::fmt;

use scholar_auth::Error as AuthError;
use scholar_roster::RosterError;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Invalid configuration or snapshot.
    Config(String),
    /// Command execution failed.
    Command(String),
    /// Output formatting error.
    Format(String),
    /// User not found.
    UserNotFound(String),
    /// Authorization or lookup failure.
    Auth(AuthError),
    /// Roster import or export failure.
    Roster(RosterError),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
            Self::Command(msg) => write!(f, "command error: {msg}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::UserNotFound(login) => write!(f, "user not found: {login}"),
            Self::Auth(e) => write!(f, "{e}"),
            Self::Roster(e) => write!(f, "roster error: {e}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Auth(e) => Some(e),
            Self::Roster(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<AuthError> for CliError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl From<RosterError> for CliError {
    fn from(err: RosterError) -> Self {
        Self::Roster(err)
    }
}
