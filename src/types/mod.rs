//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `book`: Book records
//! - `user`: Users, membership tiers and lending policies
//! - `transaction`: Ledger entries and identifiers
//! - `error`: Error types for the catalog

pub mod book;
pub mod error;
pub mod transaction;
pub mod user;

pub use book::{Book, BookId};
pub use error::LibraryError;
pub use transaction::{Transaction, TransactionId, TransactionType};
pub use user::{normalize_email, normalize_user_id, LendingPolicy, MembershipTier, User, UserId};
