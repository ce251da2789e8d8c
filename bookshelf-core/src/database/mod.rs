//! Persistence abstraction for the catalog
//!
//! Handlers only ever see `Arc<dyn BookDatabase>`; the concrete backend is
//! picked once at startup.

mod memory;
mod sql;

pub use memory::MemoryDatabase;
pub use sql::SqlDatabase;

use crate::error::DatabaseError;
use crate::types::{Book, BookId};
use async_trait::async_trait;

/// Result type for database operations
pub type DatabaseResult<T> = std::result::Result<T, DatabaseError>;

/// Thread-safe access to a database of books
#[async_trait]
pub trait BookDatabase: Send + Sync {
    /// List all books, ordered by title
    async fn list_books(&self) -> DatabaseResult<Vec<Book>>;

    /// Retrieve a book by its ID
    async fn get_book(&self, id: BookId) -> DatabaseResult<Book>;

    /// Save a new book, assigning it a fresh ID.
    ///
    /// Fails with [`DatabaseError::AlreadyExists`] if `book.id` is already set.
    async fn add_book(&self, book: &mut Book) -> DatabaseResult<BookId>;

    /// Remove a book by its ID
    async fn delete_book(&self, id: BookId) -> DatabaseResult<()>;

    /// Replace every field of the stored book with the same ID
    async fn update_book(&self, book: &Book) -> DatabaseResult<()>;

    /// Release the underlying connection
    async fn close(&self) -> DatabaseResult<()> {
        Ok(())
    }
}

/// Sort books by title, the order every `list_books` implementation returns
pub(crate) fn sort_by_title(books: &mut [Book]) {
    books.sort_by(|a, b| a.title.cmp(&b.title));
}
