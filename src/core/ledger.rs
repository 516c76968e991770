//! Append-only transaction ledger
//!
//! This module provides the Ledger component that records every issue and
//! return as an immutable [`Transaction`]. Entries are kept in the order they
//! were recorded and are never modified or removed.
//!
//! # Identifiers
//!
//! Each entry gets an 8-character hex token taken from a random UUID. Tokens
//! are checked against the ids already recorded and regenerated on collision,
//! so ids are unique within a ledger.
//!
//! # Outstanding Borrows
//!
//! [`Ledger::outstanding_borrow`] answers "who has this book right now" by
//! looking at the most recent entry for the book: a BORROW means the loan is
//! still open, a RETURN (or no entry at all) means it is not.

use crate::types::{Transaction, TransactionId, TransactionType};
use chrono::{Local, NaiveDateTime};
use std::collections::HashSet;
use uuid::Uuid;

const ID_LENGTH: usize = 8;

/// Ledger of borrow and return events
#[derive(Debug, Default)]
pub struct Ledger {
    /// Entries in recording order
    transactions: Vec<Transaction>,

    /// Ids already handed out
    ids: HashSet<TransactionId>,
}

impl Ledger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Ledger {
            transactions: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Record that `book_id` was issued to `user_id` now
    pub fn record_borrow(&mut self, user_id: &str, book_id: &str) -> &Transaction {
        self.record_at(user_id, book_id, TransactionType::Borrow, Local::now().naive_local())
    }

    /// Record that `user_id` returned `book_id` now
    pub fn record_return(&mut self, user_id: &str, book_id: &str) -> &Transaction {
        self.record_at(user_id, book_id, TransactionType::Return, Local::now().naive_local())
    }

    /// Append an entry with an explicit timestamp
    pub(crate) fn record_at(
        &mut self,
        user_id: &str,
        book_id: &str,
        tx_type: TransactionType,
        timestamp: NaiveDateTime,
    ) -> &Transaction {
        let id = self.next_id();
        self.ids.insert(id.clone());

        let index = self.transactions.len();
        self.transactions
            .push(Transaction::new(id, user_id, book_id, tx_type, timestamp));
        &self.transactions[index]
    }

    fn next_id(&self) -> TransactionId {
        loop {
            let mut id = Uuid::new_v4().simple().to_string();
            id.truncate(ID_LENGTH);
            if !self.ids.contains(&id) {
                return id;
            }
        }
    }

    /// The open BORROW entry for a book, if the book is currently out
    ///
    /// Repeated borrow/return cycles of the same book are handled by looking
    /// only at the latest entry for it.
    pub fn outstanding_borrow(&self, book_id: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .rev()
            .find(|tx| tx.book_id() == book_id)
            .filter(|tx| tx.tx_type() == TransactionType::Borrow)
    }

    /// Look up an entry by its id
    pub fn get(&self, tx_id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id() == tx_id)
    }

    /// All entries in recording order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Entries that mention the given book, oldest first
    pub fn for_book<'a>(&'a self, book_id: &'a str) -> impl Iterator<Item = &'a Transaction> {
        self.transactions
            .iter()
            .filter(move |tx| tx.book_id() == book_id)
    }

    /// Entries that mention the given user, oldest first
    pub fn for_user<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Transaction> {
        self.transactions
            .iter()
            .filter(move |tx| tx.user_id() == user_id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
