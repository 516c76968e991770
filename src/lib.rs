//! Library Catalog
//! # Overview
//!
//! This library provides an in-memory library catalog: books, users with
//! tiered lending policies, and an append-only ledger of borrow/return events,
//! driven by an interactive text menu.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Book, User, Transaction, etc.)
//! - [`core`] - Business logic components:
//!   - [`core::library`] - Issue/return/renew orchestration
//!   - [`core::ledger`] - Transaction history
//! - [`cli`] - Argument parsing, menu loop and text rendering
//! - [`io`] - CSV loading of books/users and ledger export
//! - [`seed`] - Sample catalog data
//!
//! # Membership Tiers
//!
//! - **Regular**: up to 3 books, 14-day loans, 0.50 late fee per day, no renewals
//! - **Premium**: up to 10 books, 30-day loans, 0.25 late fee per day, 2 renewals
//!
//! # Lending Rules
//!
//! - A book can be issued only while it is available
//! - A user can never hold more books than their tier allows, nor the same book twice
//! - Only the user holding a book can return it; unloaned stock that is out
//!   with no holder is accepted back from any user
//! - Every successful issue and return appends exactly one ledger entry

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod seed;
pub mod types;

pub use core::{Ledger, Library};
pub use io::export_ledger;
pub use types::{
    Book, BookId, LendingPolicy, LibraryError, MembershipTier, Transaction, TransactionId,
    TransactionType, User, UserId,
};
