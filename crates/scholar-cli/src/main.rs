//! Scholar CLI binary entrypoint.
//!
//! This is the main entry point for the `scholar` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scholar_cli::cli::{Cli, Commands};
use scholar_cli::commands::{RosterCommand, UsersCommand};
use scholar_cli::output::OutputFormat;
use scholar_cli::snapshot::Workspace;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), scholar_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let workspace = Workspace::load(&cli.data, cli.config.as_deref())?;
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Commands::Users { command } => {
            let cmd = UsersCommand::new(&workspace);
            cmd.execute(&mut stdout, &format, command)?;
        }
        Commands::Roster { command } => {
            let cmd = RosterCommand::new(&workspace, &cli.data);
            cmd.execute(&mut stdout, &format, command)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_cli::cli::{Format, RosterCommands, UserCommands};

    #[test]
    fn cli_parses_users_list() {
        let cli = Cli::parse_from(["scholar", "--data", "d.json", "users", "list", "--as", "inst"]);
        assert!(matches!(
            cli.command,
            Commands::Users {
                command: UserCommands::List { ref actor }
            } if actor == "inst"
        ));
    }

    #[test]
    fn cli_parses_can_impersonate() {
        let cli = Cli::parse_from([
            "scholar",
            "-d",
            "d.json",
            "users",
            "can-impersonate",
            "--as",
            "ta",
            "stu",
        ]);
        assert!(matches!(
            cli.command,
            Commands::Users {
                command: UserCommands::CanImpersonate { ref actor, ref target }
            } if actor == "ta" && target == "stu"
        ));
    }

    #[test]
    fn cli_parses_roster_export_flags() {
        let cli = Cli::parse_from([
            "scholar",
            "-d",
            "d.json",
            "roster",
            "export",
            "--personal-details",
            "--handle",
        ]);
        let Commands::Roster {
            command: RosterCommands::Export(args),
        } = cli.command
        else {
            unreachable!("expected roster export");
        };
        assert!(args.personal_details && args.handle);
        assert!(!args.role_and_parent && !args.email_options && !args.all);
    }

    #[test]
    fn cli_respects_format_flag() {
        let cli = Cli::parse_from(["scholar", "-d", "d.json", "--format", "json", "users", "validate"]);
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn run_with_missing_data_file_fails() {
        let cli = Cli::parse_from(["scholar", "-d", "/nonexistent/data.json", "users", "validate"]);
        assert!(matches!(run(&cli), Err(scholar_cli::CliError::Io(_))));
    }
}
