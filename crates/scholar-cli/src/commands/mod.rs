//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`users`] - User queries and authorization checks
//! - [`roster`] - Roster import and export

pub mod roster;
pub mod users;

pub use roster::RosterCommand;
pub use users::UsersCommand;
