//! Bookshelf Core Library
//!
//! This crate provides the catalog entity, the persistence abstraction with its
//! in-memory and SQL backends, and the blob storage used for cover images.

pub mod database;
pub mod error;
pub mod storage;
pub mod types;

pub use database::{BookDatabase, MemoryDatabase, SqlDatabase};
pub use error::{DatabaseError, StorageError};
pub use types::{Book, BookId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_creation() {
        let book = Book::new("Test Book", "Test Author");
        assert_eq!(book.title, "Test Book");
        assert_eq!(book.author, "Test Author");
        assert!(book.is_new());
    }
}
