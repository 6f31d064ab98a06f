//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Scholar CLI - user authorization and roster tools.
#[derive(Parser, Debug, Clone)]
#[command(name = "scholar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON snapshot holding users, courses and assignments.
    #[arg(short, long, env = "SCHOLAR_DATA")]
    pub data: PathBuf,

    /// JSON policy configuration.
    #[arg(short, long, env = "SCHOLAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// User queries and authorization checks.
    Users {
        /// Users subcommand to execute.
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Roster import and export.
    Roster {
        /// Roster subcommand to execute.
        #[command(subcommand)]
        command: RosterCommands,
    },
}

/// User subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum UserCommands {
    /// List the users visible to an actor.
    List {
        /// Login (name or email) of the acting user.
        #[arg(long = "as", value_name = "LOGIN")]
        actor: String,
    },

    /// List users an actor may pick, by name prefix.
    Available {
        /// Login (name or email) of the acting user.
        #[arg(long = "as", value_name = "LOGIN")]
        actor: String,

        /// Name prefix to match.
        #[arg(short, long, default_value = "")]
        prefix: String,
    },

    /// Show one user.
    Show {
        /// Login (name or email).
        login: String,
    },

    /// Check whether an actor may impersonate a target.
    ///
    /// Exits with failure when impersonation is denied.
    CanImpersonate {
        /// Login (name or email) of the acting user.
        #[arg(long = "as", value_name = "LOGIN")]
        actor: String,

        /// Login (name or email) of the target user.
        target: String,
    },

    /// Show the instructor a user works under.
    Instructor {
        /// Login (name or email).
        login: String,
    },

    /// Validate every user in the snapshot.
    Validate,
}

/// Roster subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum RosterCommands {
    /// Export users with the selected column groups.
    Export(ExportArgs),

    /// Import users from a JSON array of three-column rows.
    Import {
        /// Login (name or email) of the importing user.
        #[arg(long = "as", value_name = "LOGIN")]
        importer: String,

        /// File holding `[["name", "full name", "email"], ...]`.
        file: PathBuf,

        /// Write the updated snapshot back to the data file.
        #[arg(short, long)]
        write: bool,
    },
}

/// Column groups for roster export.
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Name, full name and email.
    #[arg(long)]
    pub personal_details: bool,

    /// Role and parent name.
    #[arg(long)]
    pub role_and_parent: bool,

    /// Notification switches.
    #[arg(long)]
    pub email_options: bool,

    /// Public handle.
    #[arg(long)]
    pub handle: bool,

    /// Every column group.
    #[arg(short, long)]
    pub all: bool,
}
