//! CSV reader with iterator interface
//!
//! Provides a streaming iterator over catalog rows (books or users) from a
//! CSV file, plus loaders that feed those rows into a [`Library`].
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `open()`
//! - Individual row errors are yielded as `Err` items carrying the file line
//!   the row starts on
//! - Loaders log and skip bad rows, so one typo does not empty the catalog

use crate::core::Library;
use crate::io::csv_format::{BookRow, CsvRow, UserRow};
use crate::types::LibraryError;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs;
use std::io::{Cursor, ErrorKind};
use std::marker::PhantomData;
use std::path::Path;
use tracing::{info, warn};

/// Streaming reader over rows of type `T`
///
/// The file is read into memory once; rows are parsed one at a time.
#[derive(Debug)]
pub struct RowReader<T> {
    reader: csv::Reader<Cursor<Vec<u8>>>,
    headers: StringRecord,
    record: StringRecord,
    _row: PhantomData<T>,
}

impl<T: CsvRow> RowReader<T> {
    /// Open a CSV file for row-by-row reading
    ///
    /// The reader trims whitespace from every field and tolerates short rows
    /// so optional trailing columns can be left off.
    pub fn open(path: &Path) -> Result<Self, LibraryError> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LibraryError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LibraryError::from(e),
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(Cursor::new(bytes));
        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            _row: PhantomData,
        })
    }

    /// File line on which the current record starts
    ///
    /// The recorded position is where reading resumed after the previous
    /// record, so blank lines skipped by the parser are counted here.
    fn record_line(&self) -> Option<u64> {
        let start = self.record.position()?;
        let offset = usize::try_from(start.byte()).ok()?;
        let source = self.reader.get_ref().get_ref();

        let skipped = source
            .get(offset..)?
            .iter()
            .take_while(|&&b| b == b'\n' || b == b'\r')
            .filter(|&&b| b == b'\n')
            .count();
        Some(start.line() + skipped as u64)
    }
}

/// Attach a line number to a row error
fn at_line(error: LibraryError, line: Option<u64>) -> LibraryError {
    match error {
        LibraryError::CsvError { line: None, message } => LibraryError::CsvError { line, message },
        other => LibraryError::CsvError {
            line,
            message: other.to_string(),
        },
    }
}

impl<T: CsvRow> Iterator for RowReader<T> {
    type Item = Result<T::Output, LibraryError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Err(e) => Some(Err(LibraryError::from(e))),
            Ok(true) => {
                let line = self.record_line();
                let row = self
                    .record
                    .deserialize::<T>(Some(&self.headers))
                    .map_err(|e| LibraryError::CsvError {
                        line,
                        message: e.to_string(),
                    });
                Some(row.and_then(|row| row.convert().map_err(|e| at_line(e, line))))
            }
        }
    }
}

/// Load books from a CSV file into the library
///
/// # Returns
///
/// The number of books added. Malformed rows and duplicate ids are skipped.
pub fn load_books(path: &Path, library: &mut Library) -> Result<usize, LibraryError> {
    let mut added = 0;
    for result in RowReader::<BookRow>::open(path)? {
        match result.and_then(|book| library.add_book(book)) {
            Ok(()) => added += 1,
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping book row"),
        }
    }
    info!(path = %path.display(), added, "Books loaded");
    Ok(added)
}

/// Load users from a CSV file into the library
///
/// # Returns
///
/// The number of users added. Invalid rows and duplicate ids are skipped.
pub fn load_users(path: &Path, library: &mut Library) -> Result<usize, LibraryError> {
    let mut added = 0;
    for result in RowReader::<UserRow>::open(path)? {
        match result.and_then(|user| library.add_user(user)) {
            Ok(()) => added += 1,
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping user row"),
        }
    }
    info!(path = %path.display(), added, "Users loaded");
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Book, MembershipTier, User};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_open_missing_file() {
        let result = RowReader::<BookRow>::open(Path::new("nonexistent.csv"));
        assert!(matches!(result, Err(LibraryError::FileNotFound { .. })));
    }

    #[test]
    fn test_reads_books_with_whitespace_and_short_rows() {
        let file = create_temp_csv(
            "id,title,author,category,available\n\
             B010 , Dune , Frank Herbert , Science Fiction , false\n\
             B011,Emma,Jane Austen,Romance\n",
        );

        let books: Vec<Book> = RowReader::<BookRow>::open(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id(), "B010");
        assert_eq!(books[0].title(), "Dune");
        assert!(!books[0].is_available());
        assert!(books[1].is_available());
    }

    #[test]
    fn test_row_errors_include_line_numbers() {
        let file = create_temp_csv(
            "id,name,email,type\n\
             U010,Frank,frank@email.com,regular\n\
             U011,Grace,not-an-email,premium\n\
             U012,Heidi,heidi@email.com,premium\n",
        );

        let rows: Vec<Result<User, LibraryError>> =
            RowReader::<UserRow>::open(file.path()).unwrap().collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_ok());
        assert!(matches!(
            rows[1],
            Err(LibraryError::CsvError { line: Some(3), .. })
        ));
        assert_eq!(rows[2].as_ref().unwrap().tier(), MembershipTier::Premium);
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let file = create_temp_csv(
            "id,name,email,type\n\
             \n\
             U010,Frank,frank@email.com,regular\n\
             \n\
             U011,Grace,not-an-email,premium\n",
        );

        let rows: Vec<Result<User, LibraryError>> =
            RowReader::<UserRow>::open(file.path()).unwrap().collect();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_ok());
        assert_eq!(
            rows[1].as_ref().unwrap_err().to_string(),
            "CSV error at line 5: Invalid email format: 'not-an-email'"
        );
    }

    #[test]
    fn test_line_numbers_after_multiline_field() {
        let file = create_temp_csv(
            "id,title,author,category,available\n\
             B010,\"War and\nPeace\",Leo Tolstoy,Classic,true\n\
             B011,Emma,Jane Austen,Romance,perhaps\n",
        );

        let rows: Vec<Result<Book, LibraryError>> =
            RowReader::<BookRow>::open(file.path()).unwrap().collect();

        assert_eq!(rows[0].as_ref().unwrap().title(), "War and\nPeace");
        assert!(matches!(
            rows[1],
            Err(LibraryError::CsvError { line: Some(4), .. })
        ));
    }

    #[test]
    fn test_unknown_user_type_reports_line() {
        let file = create_temp_csv(
            "id,name,email,type\n\
             U010,Frank,frank@email.com,regular\n\
             U011,Ivan,ivan@email.com,gold\n",
        );

        let rows: Vec<Result<User, LibraryError>> =
            RowReader::<UserRow>::open(file.path()).unwrap().collect();

        assert!(rows[0].is_ok());
        assert!(matches!(
            rows[1],
            Err(LibraryError::CsvError { line: Some(3), .. })
        ));
    }

    #[test]
    fn test_load_books_skips_bad_rows_and_duplicates() {
        let file = create_temp_csv(
            "id,title,author,category,available\n\
             B010,Dune,Frank Herbert,Science Fiction,true\n\
             B011,Emma,Jane Austen,Romance,perhaps\n\
             B010,Dune Again,Frank Herbert,Science Fiction,true\n\
             B012,Beloved,Toni Morrison,Fiction,\n",
        );
        let mut library = Library::new();

        let added = load_books(file.path(), &mut library).unwrap();

        assert_eq!(added, 2);
        let ids: Vec<_> = library.books().iter().map(|b| b.id()).collect();
        assert_eq!(ids, vec!["B010", "B012"]);
        assert_eq!(library.find_book_by_id("B010").unwrap().title(), "Dune");
    }

    #[test]
    fn test_load_users() {
        let file = create_temp_csv(
            "id,name,email,type\n\
             u010,Frank,Frank@Email.com,regular\n\
             U011,,grace@email.com,premium\n\
             U012,Heidi,heidi@email.com,premium\n",
        );
        let mut library = Library::new();

        let added = load_users(file.path(), &mut library).unwrap();

        assert_eq!(added, 2);
        assert_eq!(library.find_user_by_id("U010").unwrap().email(), "frank@email.com");
        assert!(library.find_user_by_id("U011").is_none());
    }
}
