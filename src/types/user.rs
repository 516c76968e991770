//! User and lending policy types for the library catalog
//!
//! A [`User`] carries identity, the set of books currently held and a
//! [`MembershipTier`]. Every policy decision (borrowing limit, loan length,
//! late-fee rate, renewal rights) is read from the tier's [`LendingPolicy`],
//! so adding behaviour for a tier means editing one table in
//! [`MembershipTier::policy`].
//!
//! # Tiers
//!
//! | Tier    | Max books | Loan (days) | Late fee / day | Renewals |
//! |---------|-----------|-------------|----------------|----------|
//! | Regular | 3         | 14          | 0.50           | none     |
//! | Premium | 10        | 30          | 0.25           | 2        |

use super::book::BookId;
use super::error::LibraryError;
use chrono::{Local, NaiveDate};
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::sync::OnceLock;

/// User identifier (trimmed, upper-case)
pub type UserId = String;

/// Membership tiers supported by the catalog
///
/// Deserializes from the `type` column of a users CSV (`regular` or
/// `premium`, capitalized forms accepted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    /// Standard membership with a small borrowing limit and no renewals
    #[serde(alias = "Regular", alias = "REGULAR")]
    Regular,

    /// Paid membership with a larger limit, longer loans and renewals
    #[serde(alias = "Premium", alias = "PREMIUM")]
    Premium,
}

/// Fixed lending rules attached to a membership tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LendingPolicy {
    /// Human-readable user type
    pub label: &'static str,
    /// Maximum number of books held at once
    pub max_books: usize,
    /// Loan period in days
    pub loan_duration_days: u32,
    /// Late fee charged per overdue day
    pub late_fee_rate: Decimal,
    /// Whether the tier may renew loans at all
    pub renewal_privilege: bool,
    /// Renewals allowed over the lifetime of the account
    pub max_renewals: u32,
}

impl MembershipTier {
    /// Lending policy for this tier
    pub fn policy(self) -> LendingPolicy {
        match self {
            MembershipTier::Regular => LendingPolicy {
                label: "Regular User",
                max_books: 3,
                loan_duration_days: 14,
                late_fee_rate: Decimal::new(50, 2),
                renewal_privilege: false,
                max_renewals: 0,
            },
            MembershipTier::Premium => LendingPolicy {
                label: "Premium User",
                max_books: 10,
                loan_duration_days: 30,
                late_fee_rate: Decimal::new(25, 2),
                renewal_privilege: true,
                max_renewals: 2,
            },
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.policy().label)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalize a user id the way it is stored: trimmed and upper-cased
pub fn normalize_user_id(raw: &str) -> UserId {
    raw.trim().to_uppercase()
}

/// Normalize an email the way it is stored: trimmed and lower-cased
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A registered library user
///
/// Equality is by id alone. The borrowed set keeps insertion order and never
/// grows past the tier's `max_books`.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    tier: MembershipTier,
    borrowed_book_ids: Vec<BookId>,
    registration_date: NaiveDate,
    renewal_count: u32,
}

impl User {
    /// Create a validated user registered today
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `id` is empty or whitespace-only
    /// - `name` is empty or whitespace-only
    /// - `email` does not look like `local@domain.tld`
    pub fn new(
        id: &str,
        name: &str,
        email: &str,
        tier: MembershipTier,
    ) -> Result<Self, LibraryError> {
        Self::registered_on(id, name, email, tier, Local::now().date_naive())
    }

    /// Create a validated user with an explicit registration date
    pub fn registered_on(
        id: &str,
        name: &str,
        email: &str,
        tier: MembershipTier,
        registration_date: NaiveDate,
    ) -> Result<Self, LibraryError> {
        if id.trim().is_empty() {
            return Err(LibraryError::EmptyUserId);
        }
        if name.trim().is_empty() {
            return Err(LibraryError::EmptyName);
        }
        if !email_regex().is_match(email.trim()) {
            return Err(LibraryError::invalid_email(email));
        }

        Ok(User {
            id: normalize_user_id(id),
            name: name.trim().to_string(),
            email: normalize_email(email),
            tier,
            borrowed_book_ids: Vec::new(),
            registration_date,
            renewal_count: 0,
        })
    }

    /// Shorthand for a [`MembershipTier::Regular`] user
    pub fn regular(id: &str, name: &str, email: &str) -> Result<Self, LibraryError> {
        Self::new(id, name, email, MembershipTier::Regular)
    }

    /// Shorthand for a [`MembershipTier::Premium`] user
    pub fn premium(id: &str, name: &str, email: &str) -> Result<Self, LibraryError> {
        Self::new(id, name, email, MembershipTier::Premium)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn tier(&self) -> MembershipTier {
        self.tier
    }

    pub fn registration_date(&self) -> NaiveDate {
        self.registration_date
    }

    /// Ids of the books currently held, in borrow order
    pub fn borrowed_book_ids(&self) -> &[BookId] {
        &self.borrowed_book_ids
    }

    pub fn current_books_count(&self) -> usize {
        self.borrowed_book_ids.len()
    }

    pub fn renewal_count(&self) -> u32 {
        self.renewal_count
    }

    pub fn policy(&self) -> LendingPolicy {
        self.tier.policy()
    }

    pub fn max_books_allowed(&self) -> usize {
        self.policy().max_books
    }

    pub fn loan_duration_days(&self) -> u32 {
        self.policy().loan_duration_days
    }

    pub fn user_type(&self) -> &'static str {
        self.policy().label
    }

    pub fn late_fee_rate(&self) -> Decimal {
        self.policy().late_fee_rate
    }

    pub fn has_renewal_privilege(&self) -> bool {
        self.policy().renewal_privilege
    }

    /// Whether another book fits under the borrowing limit
    pub fn can_borrow_book(&self) -> bool {
        self.current_books_count() < self.max_books_allowed()
    }

    pub fn has_borrowed_book(&self, book_id: &str) -> bool {
        self.borrowed_book_ids.iter().any(|id| id == book_id)
    }

    /// Add a book to the borrowed set
    ///
    /// Returns `false` without changing anything when the user is at their
    /// limit or already holds the book.
    pub fn borrow_book(&mut self, book_id: &str) -> bool {
        if !self.can_borrow_book() || self.has_borrowed_book(book_id) {
            return false;
        }
        self.borrowed_book_ids.push(book_id.to_string());
        true
    }

    /// Remove a book from the borrowed set, returning whether it was held
    pub fn return_book(&mut self, book_id: &str) -> bool {
        match self.borrowed_book_ids.iter().position(|id| id == book_id) {
            Some(index) => {
                self.borrowed_book_ids.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether the account still has renewals available
    pub fn can_renew_books(&self) -> bool {
        let policy = self.policy();
        policy.renewal_privilege && self.renewal_count < policy.max_renewals
    }

    /// Renew a held book, consuming one of the account's renewals
    ///
    /// The counter is account-wide, not per book, and never decreases.
    pub fn renew_book(&mut self, book_id: &str) -> bool {
        if !self.can_renew_books() || !self.has_borrowed_book(book_id) {
            return false;
        }
        self.renewal_count += 1;
        true
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}
