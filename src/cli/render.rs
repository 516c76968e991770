//! Text rendering for the menu
//!
//! Every function writes to a caller-supplied writer so the menu can be
//! driven against stdout or an in-memory buffer alike.

use crate::core::Library;
use crate::io::csv_format::TIMESTAMP_FORMAT;
use crate::types::{Book, MembershipTier, User};
use std::io::{self, Write};

pub fn write_books_table(books: &[Book], out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "{:<8} {:<25} {:<20} {:<18} {:<10}",
        "Book ID", "Title", "Author", "Category", "Available"
    )?;
    writeln!(out, "{}", "-".repeat(85))?;

    for book in books {
        writeln!(
            out,
            "{:<8} {:<25} {:<20} {:<18} {:<10}",
            book.id(),
            book.title(),
            book.author(),
            book.category(),
            if book.is_available() { "Yes" } else { "No" }
        )?;
    }
    Ok(())
}

pub fn write_users_table(users: &[User], out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "{:<8} {:<20} {:<25} {:<14} {:<6}",
        "User ID", "Name", "Email", "Type", "Books"
    )?;
    writeln!(out, "{}", "-".repeat(77))?;

    for user in users {
        writeln!(
            out,
            "{:<8} {:<20} {:<25} {:<14} {}/{}",
            user.id(),
            user.name(),
            user.email(),
            user.user_type(),
            user.current_books_count(),
            user.max_books_allowed()
        )?;
    }
    Ok(())
}

/// Detailed user profile
///
/// Base fields first, then the tier's loan terms, then (Premium only) the
/// renewal privilege and usage.
pub fn write_user_info(user: &User, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "User ID: {}", user.id())?;
    writeln!(out, "Name: {}", user.name())?;
    writeln!(out, "Email: {}", user.email())?;
    writeln!(out, "User Type: {}", user.user_type())?;
    writeln!(out, "Registration Date: {}", user.registration_date())?;
    writeln!(
        out,
        "Current Books: {}/{}",
        user.current_books_count(),
        user.max_books_allowed()
    )?;

    writeln!(out, "Loan Duration: {} days", user.loan_duration_days())?;
    writeln!(out, "Late Fee Rate: ${} per day", user.late_fee_rate())?;

    if user.tier() == MembershipTier::Premium {
        let policy = user.policy();
        writeln!(
            out,
            "Renewal Privilege: {}",
            if policy.renewal_privilege { "Yes" } else { "No" }
        )?;
        writeln!(
            out,
            "Renewals Used: {}/{}",
            user.renewal_count(),
            policy.max_renewals
        )?;
    }
    Ok(())
}

/// Ledger history with ids resolved to names where still known
pub fn write_transactions_table(library: &Library, out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "{:<10} {:<8} {:<20} {:<25} {:<19}",
        "Tx ID", "Type", "User", "Book", "Timestamp"
    )?;
    writeln!(out, "{}", "-".repeat(85))?;

    for tx in library.ledger().transactions() {
        let user = library
            .find_user_by_id(tx.user_id())
            .map_or(tx.user_id(), User::name);
        let book = library
            .find_book_by_id(tx.book_id())
            .map_or(tx.book_id(), Book::title);
        writeln!(
            out,
            "{:<10} {:<8} {:<20} {:<25} {}",
            tx.id(),
            tx.tx_type().to_string(),
            user,
            book,
            tx.timestamp().format(TIMESTAMP_FORMAT)
        )?;
    }
    Ok(())
}

/// Side-by-side profiles of the sample Regular (U001) and Premium (U002) users
pub fn write_polymorphism_demo(library: &Library, out: &mut dyn Write) -> io::Result<()> {
    let (Some(regular), Some(premium)) =
        (library.find_user_by_id("U001"), library.find_user_by_id("U002"))
    else {
        writeln!(
            out,
            "Sample users not found. Please ensure sample data is initialized."
        )?;
        return Ok(());
    };

    writeln!(out, "Showing how different user types behave differently:")?;
    for (index, (heading, user)) in [("Regular User Info", regular), ("Premium User Info", premium)]
        .into_iter()
        .enumerate()
    {
        writeln!(out)?;
        writeln!(out, "{}. {}:", index + 1, heading)?;
        write_user_info(user, out)?;
        writeln!(out, "   Max books allowed: {}", user.max_books_allowed())?;
        writeln!(out, "   Loan duration: {} days", user.loan_duration_days())?;
    }

    writeln!(out)?;
    writeln!(out, "3. Polymorphic behavior demonstration:")?;
    writeln!(
        out,
        "   Same method call, different behaviors based on user type!"
    )?;
    Ok(())
}
