//! Roster command implementation.
//!
//! Handles user export and three-column import.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use scholar_roster::{export, export_fields, import_rows, ExportOptions, ImportSummary};

use crate::cli::{ExportArgs, RosterCommands};
use crate::error::CliError;
use crate::output::{write_columns, OutputFormat, TableDisplay};
use crate::snapshot::Workspace;

/// Handler for roster subcommands.
pub struct RosterCommand<'a> {
    workspace: &'a Workspace,
    data_path: &'a Path,
}

impl<'a> RosterCommand<'a> {
    /// Creates a new roster command handler.
    ///
    /// `data_path` is where `import --write` saves the updated snapshot.
    #[must_use]
    pub const fn new(workspace: &'a Workspace, data_path: &'a Path) -> Self {
        Self {
            workspace,
            data_path,
        }
    }

    /// Executes the roster subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the import file is unreadable, a row fails to import,
    /// or output fails.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &RosterCommands,
    ) -> Result<(), CliError> {
        match command {
            RosterCommands::Export(args) => self.export(out, format, args),
            RosterCommands::Import {
                importer,
                file,
                write,
            } => self.import(out, format, importer, file, *write),
        }
    }

    fn export<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &ExportArgs,
    ) -> Result<(), CliError> {
        let options = export_options(args);
        if options.is_empty() {
            return Err(CliError::Command(
                "select at least one column group (or --all)".to_string(),
            ));
        }

        let table = ExportTable {
            fields: export_fields(&options).into_iter().map(String::from).collect(),
            rows: export(&self.workspace.directory, &options),
        };
        format.write(out, &table)
    }

    fn import<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        importer: &str,
        file: &Path,
        write: bool,
    ) -> Result<(), CliError> {
        let importer = self.workspace.resolve(importer)?;
        let raw = fs::read_to_string(file)?;
        let rows: Vec<Vec<String>> = serde_json::from_str(&raw).map_err(|e| {
            CliError::Command(format!("invalid import file {}: {e}", file.display()))
        })?;

        let summary = import_rows(&self.workspace.directory, &importer, &rows)?;
        if write {
            self.workspace.snapshot().save(self.data_path)?;
        }

        let report = ImportReport::from((importer.name.as_str(), summary, write));
        format.write(out, &report)
    }
}

fn export_options(args: &ExportArgs) -> ExportOptions {
    if args.all {
        return ExportOptions::all();
    }
    ExportOptions {
        personal_details: args.personal_details,
        role_and_parent: args.role_and_parent,
        email_options: args.email_options,
        handle: args.handle,
    }
}

// Output types

/// Exported users.
#[derive(Debug, Clone, Serialize)]
pub struct ExportTable {
    /// Header labels.
    pub fields: Vec<String>,
    /// One row per user.
    pub rows: Vec<Vec<String>>,
}

/// Result of an import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    /// Importing user.
    pub importer: String,
    /// Users created.
    pub created: usize,
    /// Users updated.
    pub updated: usize,
    /// Imported user names, in row order.
    pub users: Vec<String>,
    /// Whether the snapshot was written back.
    pub written: bool,
}

impl From<(&str, ImportSummary, bool)> for ImportReport {
    fn from((importer, summary, written): (&str, ImportSummary, bool)) -> Self {
        Self {
            importer: importer.to_string(),
            created: summary.created,
            updated: summary.updated,
            users: summary.users,
            written,
        }
    }
}

impl TableDisplay for ExportTable {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        write_columns(writer, &self.fields, &self.rows)
    }
}

impl TableDisplay for ImportReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(
            writer,
            "✓ {} imported: {} created, {} updated",
            self.importer, self.created, self.updated
        )?;
        for name in &self.users {
            writeln!(writer, "  {name}")?;
        }
        if !self.written {
            writeln!(writer, "  (dry run, pass --write to save)")?;
        }
        Ok(())
    }
}
