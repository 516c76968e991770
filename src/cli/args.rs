use crate::core::Library;
use crate::io::{load_books, load_users};
use crate::seed::{sample_books, sample_users};
use crate::types::LibraryError;
use clap::Parser;
use std::path::PathBuf;

/// Interactive in-memory library catalog
#[derive(Parser, Debug)]
#[command(name = "library-catalog")]
#[command(about = "Interactive in-memory library catalog", long_about = None)]
pub struct CliArgs {
    /// Books CSV replacing the sample books
    #[arg(
        long = "books",
        value_name = "CSV",
        help = "Load books from CSV (id,title,author,category,available) instead of the sample set"
    )]
    pub books_file: Option<PathBuf>,

    /// Users CSV replacing the sample users
    #[arg(
        long = "users",
        value_name = "CSV",
        help = "Load users from CSV (id,name,email,type) instead of the sample set"
    )]
    pub users_file: Option<PathBuf>,

    /// Where to export the ledger on exit
    #[arg(
        long = "ledger-out",
        value_name = "CSV",
        help = "Write the transaction ledger to this CSV file when the session ends"
    )]
    pub ledger_out: Option<PathBuf>,

    /// Start without sample data
    #[arg(long = "no-seed", help = "Start with an empty catalog (CSV files still load)")]
    pub no_seed: bool,
}

impl CliArgs {
    /// Build the starting catalog from sample data and any CSV files
    ///
    /// Each CSV file replaces the matching sample set. With `--no-seed` the
    /// sample data is skipped entirely.
    pub fn build_library(&self) -> Result<Library, LibraryError> {
        let mut library = Library::new();

        if !self.no_seed {
            if self.books_file.is_none() {
                for book in sample_books() {
                    library.add_book(book)?;
                }
            }
            if self.users_file.is_none() {
                for user in sample_users()? {
                    library.add_user(user)?;
                }
            }
        }

        if let Some(path) = &self.books_file {
            load_books(path, &mut library)?;
        }
        if let Some(path) = &self.users_file {
            load_users(path, &mut library)?;
        }

        Ok(library)
    }
}
