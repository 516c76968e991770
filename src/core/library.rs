//! Library coordinator
//!
//! This module provides the Library that owns every book, user and ledger
//! entry, and orchestrates lending by coordinating between them.
//!
//! The coordinator enforces business rules such as:
//! - Both ids must resolve before anything is touched
//! - A book can only be issued while it is on the shelf
//! - The user's lending policy decides whether a borrow or renewal is allowed
//! - Only the user holding a book can return it; unloaned stock that is out
//!   with no holder is accepted back from any user
//!
//! Every operation either applies all of its effects (user state, book state,
//! ledger entry) or returns an error having changed nothing.

use crate::core::ledger::Ledger;
use crate::types::{normalize_user_id, Book, LibraryError, Transaction, User};
use chrono::{Days, NaiveDate};
use tracing::{debug, info};

/// In-memory library catalog
#[derive(Debug, Default)]
pub struct Library {
    books: Vec<Book>,
    users: Vec<User>,
    ledger: Ledger,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Library {
            books: Vec::new(),
            users: Vec::new(),
            ledger: Ledger::new(),
        }
    }

    /// Add a book to the catalog
    ///
    /// # Errors
    ///
    /// Returns `DuplicateBook` if a book with the same id is already catalogued.
    pub fn add_book(&mut self, book: Book) -> Result<(), LibraryError> {
        if self.find_book_by_id(book.id()).is_some() {
            return Err(LibraryError::duplicate_book(book.id()));
        }
        debug!(book = book.id(), title = book.title(), "Book added");
        self.books.push(book);
        Ok(())
    }

    /// Register a user
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUser` if a user with the same id is already registered.
    pub fn add_user(&mut self, user: User) -> Result<(), LibraryError> {
        if self.find_user_by_id(user.id()).is_some() {
            return Err(LibraryError::duplicate_user(user.id()));
        }
        debug!(user = user.id(), tier = %user.tier(), "User added");
        self.users.push(user);
        Ok(())
    }

    /// First book whose id matches (surrounding whitespace ignored)
    pub fn find_book_by_id(&self, book_id: &str) -> Option<&Book> {
        let book_id = book_id.trim();
        self.books.iter().find(|book| book.id() == book_id)
    }

    /// First user whose id matches after normalization
    pub fn find_user_by_id(&self, user_id: &str) -> Option<&User> {
        let user_id = normalize_user_id(user_id);
        self.users.iter().find(|user| user.id() == user_id)
    }

    fn book_index(&self, book_id: &str) -> Result<usize, LibraryError> {
        let trimmed = book_id.trim();
        self.books
            .iter()
            .position(|book| book.id() == trimmed)
            .ok_or_else(|| LibraryError::book_not_found(trimmed))
    }

    fn user_index(&self, user_id: &str) -> Result<usize, LibraryError> {
        let normalized = normalize_user_id(user_id);
        self.users
            .iter()
            .position(|user| user.id() == normalized)
            .ok_or_else(|| LibraryError::user_not_found(&normalized))
    }

    /// Issue a book to a user
    ///
    /// # Returns
    ///
    /// The BORROW entry appended to the ledger
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The book or user id does not resolve
    /// - The book is not available
    /// - The user is at their borrowing limit or already holds the book
    pub fn issue_book(
        &mut self,
        book_id: &str,
        user_id: &str,
    ) -> Result<&Transaction, LibraryError> {
        let book_idx = self.book_index(book_id)?;
        let user_idx = self.user_index(user_id)?;

        let book = &mut self.books[book_idx];
        let user = &mut self.users[user_idx];

        if !book.is_available() {
            debug!(book = book.id(), user = user.id(), "Issue refused: book is out");
            return Err(LibraryError::book_unavailable(book.id()));
        }

        if !user.borrow_book(book.id()) {
            let reason = if user.has_borrowed_book(book.id()) {
                "book already borrowed".to_string()
            } else {
                format!("borrowing limit of {} reached", user.max_books_allowed())
            };
            debug!(book = book.id(), user = user.id(), %reason, "Issue refused by policy");
            return Err(LibraryError::borrow_not_permitted(
                user.id(),
                book.id(),
                &reason,
            ));
        }

        book.set_available(false);
        let tx = self.ledger.record_borrow(user.id(), book.id());

        info!(
            tx = tx.id(),
            book = book.id(),
            user = user.id(),
            held = user.current_books_count(),
            "Book issued"
        );
        Ok(tx)
    }

    /// Take a book back
    ///
    /// The caller must hold the book, unless the book is out with no open
    /// loan and no holder (as seeded unavailable stock is). Such a book is
    /// accepted back from any registered user.
    ///
    /// # Returns
    ///
    /// The RETURN entry appended to the ledger
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The book or user id does not resolve
    /// - The book is already available
    /// - The book is on loan to, or held by, another user
    pub fn return_book(
        &mut self,
        book_id: &str,
        user_id: &str,
    ) -> Result<&Transaction, LibraryError> {
        let book_idx = self.book_index(book_id)?;
        let user_idx = self.user_index(user_id)?;

        let book = &self.books[book_idx];
        let user = &self.users[user_idx];

        if book.is_available() {
            debug!(book = book.id(), user = user.id(), "Return refused: book is in");
            return Err(LibraryError::book_already_available(book.id()));
        }

        let borrow_tx = self
            .ledger
            .outstanding_borrow(book.id())
            .map(|tx| tx.id().to_string());

        if !user.has_borrowed_book(book.id()) {
            let held_elsewhere = self.users.iter().any(|u| u.has_borrowed_book(book.id()));
            if borrow_tx.is_some() || held_elsewhere {
                debug!(book = book.id(), user = user.id(), "Return refused: not held by user");
                return Err(LibraryError::book_not_held(user.id(), book.id()));
            }
        }

        let book = &mut self.books[book_idx];
        let user = &mut self.users[user_idx];

        user.return_book(book.id());
        book.set_available(true);
        let tx = self.ledger.record_return(user.id(), book.id());

        info!(
            tx = tx.id(),
            borrow_tx = borrow_tx.as_deref().unwrap_or("-"),
            book = book.id(),
            user = user.id(),
            "Book returned"
        );
        Ok(tx)
    }

    /// Renew a loan for a user whose policy allows it
    ///
    /// Renewal does not touch book availability or the ledger.
    ///
    /// # Returns
    ///
    /// The number of renewals the user has now used
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The book or user id does not resolve
    /// - The user's tier has no renewal privilege or no renewals left
    /// - The user does not hold the book
    pub fn renew_book(&mut self, book_id: &str, user_id: &str) -> Result<u32, LibraryError> {
        let book_idx = self.book_index(book_id)?;
        let user_idx = self.user_index(user_id)?;

        let book = &self.books[book_idx];
        let user = &mut self.users[user_idx];

        if !user.renew_book(book.id()) {
            let reason = if !user.has_renewal_privilege() {
                format!("{} accounts cannot renew", user.user_type())
            } else if !user.has_borrowed_book(book.id()) {
                "book not borrowed by user".to_string()
            } else {
                format!(
                    "renewal limit of {} reached",
                    user.policy().max_renewals
                )
            };
            debug!(book = book.id(), user = user.id(), %reason, "Renewal refused");
            return Err(LibraryError::renewal_not_permitted(
                user.id(),
                book.id(),
                &reason,
            ));
        }

        info!(
            book = book.id(),
            user = user.id(),
            renewals = user.renewal_count(),
            "Loan renewed"
        );
        Ok(user.renewal_count())
    }

    /// Date an outstanding loan falls due
    ///
    /// Computed from the open BORROW entry and the borrower's loan duration.
    /// Returns `None` when the book is not out or the borrower is unknown.
    pub fn due_date(&self, book_id: &str) -> Option<NaiveDate> {
        let borrow = self.ledger.outstanding_borrow(book_id.trim())?;
        let user = self.find_user_by_id(borrow.user_id())?;
        borrow
            .timestamp()
            .date()
            .checked_add_days(Days::new(u64::from(user.loan_duration_days())))
    }

    /// All books in catalog order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All users in registration order
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seeded_library;
    use crate::types::TransactionType;
    use chrono::Local;
    use rstest::{fixture, rstest};

    #[fixture]
    fn library() -> Library {
        seeded_library().unwrap()
    }

    /// Snapshot of everything an operation could mutate
    fn state(library: &Library) -> (Vec<bool>, Vec<Vec<String>>, usize) {
        (
            library.books().iter().map(Book::is_available).collect(),
            library
                .users()
                .iter()
                .map(|u| u.borrowed_book_ids().to_vec())
                .collect(),
            library.ledger().len(),
        )
    }

    #[rstest]
    fn test_issue_book_success(mut library: Library) {
        let tx = library.issue_book("B001", "U001").unwrap().clone();

        assert_eq!(tx.tx_type(), TransactionType::Borrow);
        assert_eq!(tx.user_id(), "U001");
        assert_eq!(tx.book_id(), "B001");

        assert!(!library.find_book_by_id("B001").unwrap().is_available());
        assert!(library.find_user_by_id("U001").unwrap().has_borrowed_book("B001"));
        assert_eq!(library.ledger().len(), 1);
    }

    #[rstest]
    fn test_issue_then_return_restores_state(mut library: Library) {
        library.issue_book("B001", "U001").unwrap();
        let tx = library.return_book("B001", "U001").unwrap().clone();

        assert_eq!(tx.tx_type(), TransactionType::Return);
        assert_eq!(tx.user_id(), "U001");
        assert!(library.find_book_by_id("B001").unwrap().is_available());
        assert!(!library.find_user_by_id("U001").unwrap().has_borrowed_book("B001"));
        assert_eq!(library.ledger().len(), 2);
    }

    #[rstest]
    #[case::unknown_book("B999", "U001", LibraryError::book_not_found("B999"))]
    #[case::unknown_user("B001", "U999", LibraryError::user_not_found("U999"))]
    #[case::seeded_unavailable("B004", "U001", LibraryError::book_unavailable("B004"))]
    fn test_issue_book_failures_leave_state_untouched(
        mut library: Library,
        #[case] book_id: &str,
        #[case] user_id: &str,
        #[case] expected: LibraryError,
    ) {
        let before = state(&library);

        let result = library.issue_book(book_id, user_id);
        assert_eq!(result.unwrap_err(), expected);

        assert_eq!(state(&library), before);
    }

    #[rstest]
    fn test_second_user_cannot_take_issued_book(mut library: Library) {
        library.issue_book("B001", "U001").unwrap();

        let result = library.issue_book("B001", "U002");
        assert_eq!(result.unwrap_err(), LibraryError::book_unavailable("B001"));
        assert!(!library.find_user_by_id("U002").unwrap().has_borrowed_book("B001"));
    }

    #[rstest]
    fn test_issue_at_capacity_is_refused_without_mutation(mut library: Library) {
        for id in ["C1", "C2", "C3", "C4"] {
            library
                .add_book(Book::new(id, "Title", "Author", "Category", true))
                .unwrap();
        }
        for id in ["C1", "C2", "C3"] {
            library.issue_book(id, "U001").unwrap();
        }
        let before = state(&library);

        let result = library.issue_book("C4", "U001");
        assert!(matches!(
            result.unwrap_err(),
            LibraryError::BorrowNotPermitted { ref reason, .. } if reason == "borrowing limit of 3 reached"
        ));

        assert_eq!(state(&library), before);
        assert!(library.find_book_by_id("C4").unwrap().is_available());
    }

    #[rstest]
    fn test_user_lookup_is_normalized(mut library: Library) {
        assert!(library.find_user_by_id(" u002 ").is_some());

        library.issue_book(" B002 ", "u002").unwrap();
        assert!(library.find_user_by_id("U002").unwrap().has_borrowed_book("B002"));
    }

    #[rstest]
    #[case::unknown_book("B999", "U001", LibraryError::book_not_found("B999"))]
    #[case::unknown_user("B001", "U999", LibraryError::user_not_found("U999"))]
    #[case::already_available("B001", "U001", LibraryError::book_already_available("B001"))]
    fn test_return_book_failures_leave_state_untouched(
        mut library: Library,
        #[case] book_id: &str,
        #[case] user_id: &str,
        #[case] expected: LibraryError,
    ) {
        let before = state(&library);

        let result = library.return_book(book_id, user_id);
        assert_eq!(result.unwrap_err(), expected);

        assert_eq!(state(&library), before);
    }

    #[rstest]
    fn test_return_by_wrong_user_is_refused(mut library: Library) {
        library.issue_book("B001", "U001").unwrap();
        let before = state(&library);

        let result = library.return_book("B001", "U003");
        assert_eq!(result.unwrap_err(), LibraryError::book_not_held("U003", "B001"));
        assert_eq!(state(&library), before);
    }

    #[rstest]
    #[case::regular("U001")]
    #[case::premium("u004")]
    fn test_seeded_unavailable_book_can_be_returned(mut library: Library, #[case] user_id: &str) {
        let before_held = library
            .find_user_by_id(user_id)
            .unwrap()
            .current_books_count();

        let tx = library.return_book("B004", user_id).unwrap().clone();

        assert_eq!(tx.tx_type(), TransactionType::Return);
        assert_eq!(tx.book_id(), "B004");
        assert!(library.find_book_by_id("B004").unwrap().is_available());
        assert_eq!(
            library.find_user_by_id(user_id).unwrap().current_books_count(),
            before_held
        );

        // Back on the shelf, it can be lent like any other book
        library.issue_book("B004", "U002").unwrap();
        assert!(library.find_user_by_id("U002").unwrap().has_borrowed_book("B004"));
    }

    #[rstest]
    fn test_second_return_of_seeded_book_is_refused(mut library: Library) {
        library.return_book("B004", "U001").unwrap();

        let result = library.return_book("B004", "U003");
        assert_eq!(result.unwrap_err(), LibraryError::book_already_available("B004"));
        assert_eq!(library.ledger().len(), 1);
    }

    #[rstest]
    fn test_repeated_cycles_track_latest_borrow(mut library: Library) {
        library.issue_book("B001", "U001").unwrap();
        library.return_book("B001", "U001").unwrap();
        let second = library.issue_book("B001", "U002").unwrap().id().to_string();

        let open = library.ledger().outstanding_borrow("B001").unwrap();
        assert_eq!(open.id(), second);
        assert_eq!(open.user_id(), "U002");

        library.return_book("B001", "U002").unwrap();
        assert!(library.ledger().outstanding_borrow("B001").is_none());
        assert_eq!(library.ledger().for_book("B001").count(), 4);
    }

    #[rstest]
    fn test_premium_renewals_capped(mut library: Library) {
        library.issue_book("B001", "U002").unwrap();

        assert_eq!(library.renew_book("B001", "U002").unwrap(), 1);
        assert_eq!(library.renew_book("B001", "U002").unwrap(), 2);

        let result = library.renew_book("B001", "U002");
        assert!(matches!(
            result.unwrap_err(),
            LibraryError::RenewalNotPermitted { ref reason, .. } if reason == "renewal limit of 2 reached"
        ));

        // Still held, nothing recorded for renewals
        assert!(library.find_user_by_id("U002").unwrap().has_borrowed_book("B001"));
        assert_eq!(library.ledger().len(), 1);
    }

    #[rstest]
    #[case::regular_user("B001", "U001", "Regular User accounts cannot renew")]
    #[case::premium_not_holding("B002", "U002", "book not borrowed by user")]
    fn test_renewal_refusals(
        mut library: Library,
        #[case] book_id: &str,
        #[case] user_id: &str,
        #[case] expected_reason: &str,
    ) {
        library.issue_book("B001", "U001").unwrap();

        let result = library.renew_book(book_id, user_id);
        match result.unwrap_err() {
            LibraryError::RenewalNotPermitted { reason, .. } => assert_eq!(reason, expected_reason),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    fn test_due_date_follows_loan_duration(mut library: Library) {
        let today = Local::now().date_naive();
        library.issue_book("B001", "U001").unwrap();
        library.issue_book("B002", "U002").unwrap();

        let regular_due = library.due_date("B001").unwrap();
        let premium_due = library.due_date("B002").unwrap();

        // Allow for the test running across midnight
        assert!((regular_due - today).num_days() >= 14);
        assert!((premium_due - today).num_days() >= 30);
        assert_eq!((premium_due - regular_due).num_days(), 16);

        assert!(library.due_date("B003").is_none());
    }

    #[rstest]
    fn test_duplicate_ids_rejected(mut library: Library) {
        let book = Book::new("B001", "Copy", "Someone", "Misc", true);
        assert_eq!(library.add_book(book), Err(LibraryError::duplicate_book("B001")));

        let user = User::premium("u001", "Alias", "alias@email.com").unwrap();
        assert_eq!(library.add_user(user), Err(LibraryError::duplicate_user("U001")));

        assert_eq!(library.books().len(), 5);
        assert_eq!(library.users().len(), 4);
    }

    #[test]
    fn test_empty_library() {
        let mut library = Library::new();

        assert!(library.books().is_empty());
        assert!(library.users().is_empty());
        assert!(library.ledger().is_empty());
        assert_eq!(
            library.issue_book("B001", "U001").unwrap_err(),
            LibraryError::book_not_found("B001")
        );
    }
}
