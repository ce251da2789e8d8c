//! In-memory book database (for testing and local development)

use super::{sort_by_title, BookDatabase, DatabaseResult};
use crate::error::DatabaseError;
use crate::types::{Book, BookId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// A process-local book database guarded by a single lock
pub struct MemoryDatabase {
    inner: Mutex<Inner>,
}

struct Inner {
    books: HashMap<BookId, Book>,
    /// Next ID to hand out; never reused, even after a delete
    next_id: BookId,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                books: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self, op: &'static str) -> DatabaseResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| DatabaseError::backend(op, "memory database lock poisoned"))
    }
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookDatabase for MemoryDatabase {
    async fn list_books(&self) -> DatabaseResult<Vec<Book>> {
        let mut books: Vec<Book> = {
            let inner = self.lock("list")?;
            inner.books.values().cloned().collect()
        };
        sort_by_title(&mut books);
        Ok(books)
    }

    async fn get_book(&self, id: BookId) -> DatabaseResult<Book> {
        self.lock("get")?
            .books
            .get(&id)
            .cloned()
            .ok_or(DatabaseError::NotFound(id))
    }

    async fn add_book(&self, book: &mut Book) -> DatabaseResult<BookId> {
        if !book.is_new() {
            return Err(DatabaseError::AlreadyExists(book.title.clone()));
        }

        let mut inner = self.lock("add")?;
        let id = inner.next_id;
        inner.next_id = id
            .checked_add(1)
            .ok_or_else(|| DatabaseError::backend("add", "book IDs exhausted"))?;

        book.id = id;
        inner.books.insert(id, book.clone());
        Ok(id)
    }

    async fn delete_book(&self, id: BookId) -> DatabaseResult<()> {
        self.lock("delete")?
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or(DatabaseError::NotFound(id))
    }

    async fn update_book(&self, book: &Book) -> DatabaseResult<()> {
        let mut inner = self.lock("update")?;
        match inner.books.get_mut(&book.id) {
            Some(stored) => {
                *stored = book.clone();
                Ok(())
            }
            None => Err(DatabaseError::NotFound(book.id)),
        }
    }
}
