//! Roster import and export for Scholar.
//!
//! - [`import_row`] / [`import_rows`]: three-column rows (name, full name,
//!   email) create students or update existing users under the importer
//! - [`export`] / [`export_fields`]: one row per user with the column groups
//!   chosen in [`ExportOptions`]

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod export;
pub mod import;

pub use error::{Result, RosterError};
pub use export::{export, export_fields, yes_or_no, ExportOptions};
pub use import::{
    import_row, import_rows, ImportOutcome, ImportRow, ImportSummary, IMPORT_COLUMNS,
};
