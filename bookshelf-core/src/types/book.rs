//! The Book entity managed by the catalog

use serde::{Deserialize, Serialize};

/// Identifier assigned by a store. `0` means "not yet stored".
pub type BookId = u32;

/// Metadata about a single book in the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Store-assigned identifier, `0` until the book has been added
    pub id: BookId,

    /// Book title (not unique)
    pub title: String,

    /// Author name
    pub author: String,

    /// Publication date, free-form
    pub published_date: String,

    /// Public URL of the cover image
    pub image_url: Option<String>,

    /// Book description/summary
    pub description: Option<String>,
}

impl Book {
    /// Create an unsaved book with the given title and author
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    /// Whether this book has not been assigned an identifier yet
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    /// Site-relative path of the book's detail page
    pub fn path(&self) -> String {
        format!("/books/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_has_no_id() {
        let book = Book::new("Dune", "Frank Herbert");
        assert_eq!(book.id, 0);
        assert!(book.is_new());
        assert!(book.image_url.is_none());
        assert!(book.description.is_none());
    }

    #[test]
    fn test_path_uses_id() {
        let mut book = Book::new("Dune", "Frank Herbert");
        book.id = 42;
        assert!(!book.is_new());
        assert_eq!(book.path(), "/books/42");
    }
}
