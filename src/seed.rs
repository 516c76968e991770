//! Sample catalog data
//!
//! The menu starts from this fixed set unless CSV files are supplied.
//! B004 is seeded as already out.

use crate::core::Library;
use crate::types::{Book, LibraryError, User};

/// The five sample books
pub fn sample_books() -> Vec<Book> {
    vec![
        Book::new("B001", "To Kill a Mockingbird", "Harper Lee", "Fiction", true),
        Book::new("B002", "1984", "George Orwell", "Dystopian Fiction", true),
        Book::new("B003", "Pride and Prejudice", "Jane Austen", "Romance", true),
        Book::new("B004", "The Great Gatsby", "F. Scott Fitzgerald", "Classic", false),
        Book::new("B005", "The Catcher in the Rye", "J.D. Salinger", "Fiction", true),
    ]
}

/// The four sample users, alternating Regular and Premium
pub fn sample_users() -> Result<Vec<User>, LibraryError> {
    Ok(vec![
        User::regular("U001", "Alice Johnson", "alice@email.com")?,
        User::premium("U002", "Bob Smith", "bob@email.com")?,
        User::regular("U003", "Carol Davis", "carol@email.com")?,
        User::premium("U004", "David Wilson", "david@email.com")?,
    ])
}

/// A library holding the sample books and users
pub fn seeded_library() -> Result<Library, LibraryError> {
    let mut library = Library::new();
    for book in sample_books() {
        library.add_book(book)?;
    }
    for user in sample_users()? {
        library.add_user(user)?;
    }
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MembershipTier;

    #[test]
    fn test_seeded_library_contents() {
        let library = seeded_library().unwrap();

        assert_eq!(library.books().len(), 5);
        assert_eq!(library.users().len(), 4);
        assert!(library.ledger().is_empty());

        let unavailable: Vec<_> = library
            .books()
            .iter()
            .filter(|b| !b.is_available())
            .map(|b| b.id())
            .collect();
        assert_eq!(unavailable, vec!["B004"]);

        let tiers: Vec<_> = library.users().iter().map(|u| u.tier()).collect();
        assert_eq!(
            tiers,
            vec![
                MembershipTier::Regular,
                MembershipTier::Premium,
                MembershipTier::Regular,
                MembershipTier::Premium,
            ]
        );
    }
}
