//! Interactive menu loop
//!
//! The menu reads commands from any [`BufRead`] and writes prompts and results
//! to any [`Write`], so the same loop serves the terminal and the tests. The
//! [`Library`] is borrowed for the lifetime of the session and every action is
//! a single call into it.

use crate::cli::render;
use crate::core::Library;
use crate::types::{Book, LibraryError, MembershipTier, User};
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use tracing::debug;

/// Actions offered by the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DisplayBooks,
    IssueBook,
    ReturnBook,
    DisplayUsers,
    AddBook,
    AddUser,
    DemonstratePolymorphism,
    RenewBook,
    TransactionHistory,
    Exit,
}

impl MenuChoice {
    /// All choices in menu order; the position plus one is the menu number
    pub const ALL: [MenuChoice; 10] = [
        MenuChoice::DisplayBooks,
        MenuChoice::IssueBook,
        MenuChoice::ReturnBook,
        MenuChoice::DisplayUsers,
        MenuChoice::AddBook,
        MenuChoice::AddUser,
        MenuChoice::DemonstratePolymorphism,
        MenuChoice::RenewBook,
        MenuChoice::TransactionHistory,
        MenuChoice::Exit,
    ];

    /// Parse a menu number; anything else is an invalid choice
    pub fn parse(input: &str) -> Option<Self> {
        let number: usize = input.trim().parse().ok()?;
        Self::ALL.get(number.checked_sub(1)?).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::DisplayBooks => "Display All Books",
            MenuChoice::IssueBook => "Issue Book",
            MenuChoice::ReturnBook => "Return Book",
            MenuChoice::DisplayUsers => "Display All Users",
            MenuChoice::AddBook => "Add New Book",
            MenuChoice::AddUser => "Add New User",
            MenuChoice::DemonstratePolymorphism => "Demonstrate Polymorphism",
            MenuChoice::RenewBook => "Renew Book",
            MenuChoice::TransactionHistory => "Display Transaction History",
            MenuChoice::Exit => "Exit",
        }
    }
}

type Step = Result<ControlFlow<()>, LibraryError>;

/// A menu session over explicit input and output ports
pub struct Menu<'a, R, W> {
    library: &'a mut Library,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(library: &'a mut Library, input: R, output: W) -> Self {
        Menu {
            library,
            input,
            output,
        }
    }

    /// Run until the user picks Exit or input runs out
    ///
    /// Business-rule refusals are printed and the loop continues; only I/O
    /// failures end the session with an error.
    pub fn run(&mut self) -> Result<(), LibraryError> {
        writeln!(self.output, "=== Welcome to Library Management System ===")?;

        loop {
            self.write_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                debug!(input = line.as_str(), "Invalid menu choice");
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            };

            debug!(?choice, "Menu choice");
            if self.handle(choice)?.is_break() {
                break;
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn write_menu(&mut self) -> Result<(), LibraryError> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Library Management System Menu ===")?;
        for (index, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, choice.label())?;
        }
        write!(
            self.output,
            "Enter your choice (1-{}): ",
            MenuChoice::ALL.len()
        )?;
        self.output.flush()?;
        Ok(())
    }

    /// Next input line without its line ending, or `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>, LibraryError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>, LibraryError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn handle(&mut self, choice: MenuChoice) -> Step {
        writeln!(self.output)?;
        writeln!(self.output, "=== {} ===", choice.label())?;

        match choice {
            MenuChoice::DisplayBooks => {
                render::write_books_table(self.library.books(), &mut self.output)?;
            }
            MenuChoice::IssueBook => return self.issue_book(),
            MenuChoice::ReturnBook => return self.return_book(),
            MenuChoice::DisplayUsers => {
                render::write_users_table(self.library.users(), &mut self.output)?;
            }
            MenuChoice::AddBook => return self.add_book(),
            MenuChoice::AddUser => return self.add_user(),
            MenuChoice::DemonstratePolymorphism => {
                render::write_polymorphism_demo(self.library, &mut self.output)?;
            }
            MenuChoice::RenewBook => return self.renew_book(),
            MenuChoice::TransactionHistory => {
                render::write_transactions_table(self.library, &mut self.output)?;
            }
            MenuChoice::Exit => {
                writeln!(
                    self.output,
                    "Thank you for using the Library Management System!"
                )?;
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Prompt for book id then user id
    fn prompt_ids(&mut self) -> Result<Option<(String, String)>, LibraryError> {
        let Some(book_id) = self.prompt("Enter Book ID: ")? else {
            return Ok(None);
        };
        let Some(user_id) = self.prompt("Enter User ID: ")? else {
            return Ok(None);
        };
        Ok(Some((book_id, user_id)))
    }

    fn issue_book(&mut self) -> Step {
        let Some((book_id, user_id)) = self.prompt_ids()? else {
            return Ok(ControlFlow::Break(()));
        };

        match self.library.issue_book(&book_id, &user_id) {
            Ok(tx) => {
                let tx_id = tx.id().to_string();
                writeln!(self.output, "Book issued successfully!")?;
                writeln!(self.output, "Transaction ID: {tx_id}")?;
                if let Some(due) = self.library.due_date(&book_id) {
                    writeln!(self.output, "Due date: {due}")?;
                }
            }
            Err(e) => writeln!(self.output, "Could not issue book: {e}")?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn return_book(&mut self) -> Step {
        let Some((book_id, user_id)) = self.prompt_ids()? else {
            return Ok(ControlFlow::Break(()));
        };

        match self.library.return_book(&book_id, &user_id) {
            Ok(tx) => {
                let tx_id = tx.id().to_string();
                writeln!(self.output, "Book returned successfully!")?;
                writeln!(self.output, "Transaction ID: {tx_id}")?;
            }
            Err(e) => writeln!(self.output, "Could not return book: {e}")?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn renew_book(&mut self) -> Step {
        let Some((book_id, user_id)) = self.prompt_ids()? else {
            return Ok(ControlFlow::Break(()));
        };

        match self.library.renew_book(&book_id, &user_id) {
            Ok(used) => {
                let max = self
                    .library
                    .find_user_by_id(&user_id)
                    .map_or(0, |user| user.policy().max_renewals);
                writeln!(self.output, "Loan renewed! Renewals used: {used}/{max}")?;
            }
            Err(e) => writeln!(self.output, "Could not renew book: {e}")?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn add_book(&mut self) -> Step {
        let Some(id) = self.prompt("Enter Book ID: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(title) = self.prompt("Enter Title: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(author) = self.prompt("Enter Author: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(category) = self.prompt("Enter Category: ")? else {
            return Ok(ControlFlow::Break(()));
        };

        let book = Book::new(id.trim(), title.trim(), author.trim(), category.trim(), true);
        match self.library.add_book(book) {
            Ok(()) => writeln!(self.output, "Book added successfully!")?,
            Err(e) => writeln!(self.output, "Could not add book: {e}")?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn add_user(&mut self) -> Step {
        let Some(id) = self.prompt("Enter User ID: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(name) = self.prompt("Enter Name: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(email) = self.prompt("Enter Email: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(premium) = self.prompt("Is this a premium user? (y/n): ")? else {
            return Ok(ControlFlow::Break(()));
        };

        let tier = match premium.trim().to_lowercase().as_str() {
            "y" | "yes" => MembershipTier::Premium,
            _ => MembershipTier::Regular,
        };

        match User::new(&id, &name, &email, tier).and_then(|user| self.library.add_user(user)) {
            Ok(()) => writeln!(self.output, "User added successfully!")?,
            Err(e) if e.is_validation() => writeln!(self.output, "Invalid user details: {e}")?,
            Err(e) => writeln!(self.output, "Could not add user: {e}")?,
        }
        Ok(ControlFlow::Continue(()))
    }
}
