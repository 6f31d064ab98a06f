//! # scholar-cli
//!
//! Scholar command-line interface.
//!
//! Provides commands for:
//! - Listing the users an actor may see or pick
//! - Impersonation checks and instructor resolution
//! - User validation
//! - Roster import and export
//!
//! # Architecture
//!
//! There is no server: every invocation loads a JSON [`snapshot::Snapshot`]
//! into the in-memory adapters of `scholar-auth`, evaluates the request with
//! [`scholar_auth::AccessPolicy`], and prints the result.
//!
//! ```text
//! ┌──────────────┐   load    ┌─────────────┐   query   ┌──────────────┐
//! │ data.json    │──────────►│  Workspace  │──────────►│ AccessPolicy │
//! └──────────────┘◄──────────└─────────────┘           └──────────────┘
//!                  import --write
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod snapshot;

pub use cli::{Cli, Commands, ExportArgs, Format, RosterCommands, UserCommands};
pub use error::CliError;
pub use output::OutputFormat;
pub use snapshot::{Snapshot, Workspace};
