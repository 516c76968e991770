//! I/O module
//!
//! Handles CSV input for catalog data and CSV output for the ledger.
//!
//! # Components
//!
//! - `csv_format` - Row types, row conversion and ledger serialization
//! - `reader` - Streaming CSV reader and library loaders
//! - `export` - Writing the ledger to a file

pub mod csv_format;
pub mod export;
pub mod reader;

pub use csv_format::{write_ledger_csv, BookRow, CsvRow, UserRow};
pub use export::export_ledger;
pub use reader::{load_books, load_users, RowReader};
