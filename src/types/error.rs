//! Error types for the library catalog
//!
//! This module defines all error types that can occur while building the
//! catalog or running lending operations against it.
//!
//! # Error Categories
//!
//! - **Validation Errors**: Empty user id or name, malformed email
//! - **Lookup Errors**: Unknown book or user id
//! - **Lending Errors**: Book unavailable, borrow limit reached, renewal refused, etc.
//! - **I/O Errors**: File not found, CSV parsing failures

use thiserror::Error;

/// Main error type for the library catalog
///
/// Validation variants are fatal to the construction call that produced them.
/// Lending variants describe expected business outcomes: the operation was
/// refused and no state was changed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LibraryError {
    /// User id was empty or whitespace-only
    #[error("User ID cannot be empty")]
    EmptyUserId,

    /// User name was empty or whitespace-only
    #[error("Name cannot be empty")]
    EmptyName,

    /// Email did not match the `local@domain.tld` format
    #[error("Invalid email format: '{email}'")]
    InvalidEmail {
        /// The rejected email as supplied
        email: String,
    },

    /// No book with the given id exists in the catalog
    #[error("Book {book_id} not found")]
    BookNotFound {
        /// The id that was looked up
        book_id: String,
    },

    /// No user with the given id exists in the catalog
    #[error("User {user_id} not found")]
    UserNotFound {
        /// The id that was looked up
        user_id: String,
    },

    /// The book is currently issued to someone
    #[error("Book {book_id} is not available")]
    BookUnavailable {
        /// The requested book
        book_id: String,
    },

    /// The user's lending policy refused the borrow
    ///
    /// Either the user is at their borrowing limit or already holds the book.
    #[error("User {user_id} cannot borrow book {book_id}: {reason}")]
    BorrowNotPermitted {
        /// The borrowing user
        user_id: String,
        /// The requested book
        book_id: String,
        /// Why the policy refused
        reason: String,
    },

    /// Return requested for a book that is already on the shelf
    #[error("Book {book_id} is already available")]
    BookAlreadyAvailable {
        /// The book being returned
        book_id: String,
    },

    /// Return requested by a user who does not hold the book
    #[error("User {user_id} has not borrowed book {book_id}")]
    BookNotHeldByUser {
        /// The user attempting the return
        user_id: String,
        /// The book being returned
        book_id: String,
    },

    /// The user's lending policy refused a renewal
    #[error("User {user_id} cannot renew book {book_id}: {reason}")]
    RenewalNotPermitted {
        /// The renewing user
        user_id: String,
        /// The book to renew
        book_id: String,
        /// Why the policy refused
        reason: String,
    },

    /// A book with this id is already catalogued
    #[error("Book {book_id} already exists")]
    DuplicateBook {
        /// The duplicated id
        book_id: String,
    },

    /// A user with this id is already registered
    #[error("User {user_id} already exists")]
    DuplicateUser {
        /// The duplicated id
        user_id: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing or serialization error
    #[error("CSV error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    CsvError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the error
        message: String,
    },
}

impl From<std::io::Error> for LibraryError {
    fn from(error: std::io::Error) -> Self {
        LibraryError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LibraryError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LibraryError::CsvError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LibraryError {
    /// Create an InvalidEmail error
    pub fn invalid_email(email: &str) -> Self {
        LibraryError::InvalidEmail {
            email: email.to_string(),
        }
    }

    /// Create a BookNotFound error
    pub fn book_not_found(book_id: &str) -> Self {
        LibraryError::BookNotFound {
            book_id: book_id.to_string(),
        }
    }

    /// Create a UserNotFound error
    pub fn user_not_found(user_id: &str) -> Self {
        LibraryError::UserNotFound {
            user_id: user_id.to_string(),
        }
    }

    /// Create a BookUnavailable error
    pub fn book_unavailable(book_id: &str) -> Self {
        LibraryError::BookUnavailable {
            book_id: book_id.to_string(),
        }
    }

    /// Create a BorrowNotPermitted error
    pub fn borrow_not_permitted(user_id: &str, book_id: &str, reason: &str) -> Self {
        LibraryError::BorrowNotPermitted {
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a BookAlreadyAvailable error
    pub fn book_already_available(book_id: &str) -> Self {
        LibraryError::BookAlreadyAvailable {
            book_id: book_id.to_string(),
        }
    }

    /// Create a BookNotHeldByUser error
    pub fn book_not_held(user_id: &str, book_id: &str) -> Self {
        LibraryError::BookNotHeldByUser {
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
        }
    }

    /// Create a RenewalNotPermitted error
    pub fn renewal_not_permitted(user_id: &str, book_id: &str, reason: &str) -> Self {
        LibraryError::RenewalNotPermitted {
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a DuplicateBook error
    pub fn duplicate_book(book_id: &str) -> Self {
        LibraryError::DuplicateBook {
            book_id: book_id.to_string(),
        }
    }

    /// Create a DuplicateUser error
    pub fn duplicate_user(user_id: &str) -> Self {
        LibraryError::DuplicateUser {
            user_id: user_id.to_string(),
        }
    }

    /// Whether this error came from validating user input at construction
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LibraryError::EmptyUserId | LibraryError::EmptyName | LibraryError::InvalidEmail { .. }
        )
    }
}
