//! Core business logic module
//!
//! This module contains the lending components:
//! - `library` - Catalog ownership and issue/return/renew orchestration
//! - `ledger` - Append-only history of borrow and return events

pub mod ledger;
pub mod library;

pub use ledger::Ledger;
pub use library::Library;
