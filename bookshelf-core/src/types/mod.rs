//! Catalog types

mod book;

pub use book::{Book, BookId};
