//! Book record for the library catalog

/// Book identifier
pub type BookId = String;

/// A catalogued book
///
/// Identity is fixed at construction. Availability is flipped by the
/// [`Library`](crate::core::Library) when the book is issued or returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    category: String,
    available: bool,
}

impl Book {
    /// Create a new book record
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        available: bool,
    ) -> Self {
        Book {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            category: category.into(),
            available,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Whether the book is on the shelf
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}
