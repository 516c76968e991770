//! CSV format handling for catalog input and ledger output
//!
//! This module centralizes all CSV format concerns, providing:
//! - Row structures for deserializing books and users
//! - Conversion from rows to domain types
//! - Ledger output serialization
//!
//! All functions are pure (no file access) for easy testing.

use crate::types::{Book, LibraryError, MembershipTier, Transaction, TransactionType, User};
use csv::WriterBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Timestamp layout used in ledger output
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A CSV row that converts into a catalog entity
pub trait CsvRow: DeserializeOwned {
    /// The domain type produced by this row
    type Output;

    /// Validate the row and build the domain value
    fn convert(self) -> Result<Self::Output, LibraryError>;
}

/// Book row with columns: id, title, author, category, available
///
/// `available` is optional and defaults to `true` when blank.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BookRow {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub available: Option<String>,
}

/// User row with columns: id, name, email, type
///
/// An unknown `type` fails deserialization, so the row never reaches
/// [`CsvRow::convert`].
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub tier: MembershipTier,
}

/// Ledger output row with columns: id, type, user, book, timestamp
#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    tx_type: TransactionType,
    user: &'a str,
    book: &'a str,
    timestamp: String,
}

fn row_error(message: String) -> LibraryError {
    LibraryError::CsvError {
        line: None,
        message,
    }
}

impl CsvRow for BookRow {
    type Output = Book;

    fn convert(self) -> Result<Book, LibraryError> {
        if self.id.trim().is_empty() {
            return Err(row_error("Book id cannot be empty".to_string()));
        }

        let available = match self.available.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(flag) => match flag.to_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => true,
                "false" | "no" | "n" | "0" => false,
                _ => {
                    return Err(row_error(format!(
                        "Invalid availability '{}' for book {}",
                        flag, self.id
                    )))
                }
            },
        };

        Ok(Book::new(
            self.id.trim(),
            self.title.trim(),
            self.author.trim(),
            self.category.trim(),
            available,
        ))
    }
}

impl CsvRow for UserRow {
    type Output = User;

    fn convert(self) -> Result<User, LibraryError> {
        User::new(&self.id, &self.name, &self.email, self.tier)
    }
}

/// Write ledger entries in CSV format
///
/// Columns: id, type, user, book, timestamp. Entries are written in ledger
/// order.
pub fn write_ledger_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), LibraryError> {
    // Header written by hand so an empty ledger still gets one
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer.write_record(["id", "type", "user", "book", "timestamp"])?;

    for tx in transactions {
        writer.serialize(LedgerRow {
            id: tx.id(),
            tx_type: tx.tx_type(),
            user: tx.user_id(),
            book: tx.book_id(),
            timestamp: tx.timestamp().format(TIMESTAMP_FORMAT).to_string(),
        })?;
    }

    writer.flush()?;
    Ok(())
}
