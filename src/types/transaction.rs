//! Transaction-related types for the library catalog
//!
//! Transactions are the immutable records appended to the ledger each time a
//! book is issued or returned. They refer to users and books by id only; the
//! [`Library`](crate::core::Library) resolves ids to current state on demand.

use super::book::BookId;
use super::user::UserId;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Transaction identifier (short hex token, unique within a ledger)
pub type TransactionId = String;

/// Kinds of ledger events
///
/// Serializes as `BORROW` / `RETURN` in ledger exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// A book was issued to a user
    Borrow,

    /// A book came back from a user
    Return,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Borrow => f.write_str("BORROW"),
            TransactionType::Return => f.write_str("RETURN"),
        }
    }
}

/// A single ledger entry
///
/// Fields are private so an entry cannot be altered after it is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: TransactionId,
    user_id: UserId,
    book_id: BookId,
    tx_type: TransactionType,
    timestamp: NaiveDateTime,
}

impl Transaction {
    pub(crate) fn new(
        id: TransactionId,
        user_id: &str,
        book_id: &str,
        tx_type: TransactionType,
        timestamp: NaiveDateTime,
    ) -> Self {
        Transaction {
            id,
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            tx_type,
            timestamp,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    pub fn tx_type(&self) -> TransactionType {
        self.tx_type
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}
