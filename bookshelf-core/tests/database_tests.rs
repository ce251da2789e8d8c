//! Behaviour shared by every BookDatabase backend
//!
//! Each check runs against the in-memory store and against the SQL store on
//! an in-memory SQLite database.

use bookshelf_core::database::{BookDatabase, MemoryDatabase, SqlDatabase};
use bookshelf_core::{Book, DatabaseError};
use proptest::prelude::*;

async fn backends() -> Vec<(&'static str, Box<dyn BookDatabase>)> {
    let sql = SqlDatabase::connect("sqlite::memory:")
        .await
        .expect("Failed to open SQLite");
    sql.migrate().await.expect("Failed to create schema");

    vec![
        ("memory", Box::new(MemoryDatabase::new())),
        ("sql", Box::new(sql)),
    ]
}

fn sample_book() -> Book {
    Book {
        id: 0,
        title: "t-1700000000".to_string(),
        author: "testy mc testface".to_string(),
        published_date: "1700000000".to_string(),
        image_url: Some("https://example.com/cover.png".to_string()),
        description: Some("desc".to_string()),
    }
}

#[tokio::test]
async fn test_crud_cycle() {
    for (name, db) in backends().await {
        let mut book = sample_book();
        let id = db.add_book(&mut book).await.unwrap();
        assert!(id > 0, "{name}: id must be positive");
        assert_eq!(book.id, id, "{name}: add must set the id");

        book.description = Some("newdesc".to_string());
        db.update_book(&book).await.unwrap();

        let got = db.get_book(id).await.unwrap();
        assert_eq!(got.description.as_deref(), Some("newdesc"), "{name}");

        db.delete_book(id).await.unwrap();

        let err = db.get_book(id).await.unwrap_err();
        assert!(err.is_not_found(), "{name}: got {err:?}");
    }
}

#[tokio::test]
async fn test_get_returns_every_field() {
    for (name, db) in backends().await {
        let original = sample_book();
        let mut book = original.clone();
        let id = db.add_book(&mut book).await.unwrap();

        let got = db.get_book(id).await.unwrap();
        assert_eq!(got, Book { id, ..original }, "{name}");
    }
}

#[tokio::test]
async fn test_add_rejects_existing_id() {
    for (name, db) in backends().await {
        let mut book = sample_book();
        book.id = 99;

        let err = db.add_book(&mut book).await.unwrap_err();
        assert!(
            matches!(err, DatabaseError::AlreadyExists(ref title) if title == "t-1700000000"),
            "{name}: got {err:?}"
        );
        assert!(db.list_books().await.unwrap().is_empty(), "{name}");
    }
}

#[tokio::test]
async fn test_update_missing_book_is_not_found() {
    for (name, db) in backends().await {
        let mut existing = Book::new("Existing", "Someone");
        db.add_book(&mut existing).await.unwrap();

        let mut ghost = sample_book();
        ghost.id = existing.id + 1000;

        let err = db.update_book(&ghost).await.unwrap_err();
        assert!(err.is_not_found(), "{name}: got {err:?}");

        let books = db.list_books().await.unwrap();
        assert_eq!(books, vec![existing.clone()], "{name}: no mutation expected");
    }
}

#[tokio::test]
async fn test_delete_missing_book_is_not_found() {
    for (name, db) in backends().await {
        let err = db.delete_book(12345).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(12345)), "{name}");
    }
}

#[tokio::test]
async fn test_list_empty_store() {
    for (name, db) in backends().await {
        assert!(db.list_books().await.unwrap().is_empty(), "{name}");
    }
}

#[tokio::test]
async fn test_list_sorted_by_title() {
    for (name, db) in backends().await {
        db.add_book(&mut Book::new("B", "second")).await.unwrap();
        db.add_book(&mut Book::new("A", "first")).await.unwrap();

        let titles: Vec<String> = db
            .list_books()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["A", "B"], "{name}");
    }
}

#[tokio::test]
async fn test_duplicate_titles_allowed() {
    for (name, db) in backends().await {
        let a = db.add_book(&mut Book::new("Twin", "one")).await.unwrap();
        let b = db.add_book(&mut Book::new("Twin", "two")).await.unwrap();

        assert_ne!(a, b, "{name}");
        assert_eq!(db.list_books().await.unwrap().len(), 2, "{name}");
    }
}

#[tokio::test]
async fn test_ids_never_reused() {
    for (name, db) in backends().await {
        let first = db.add_book(&mut Book::new("Gone", "x")).await.unwrap();
        db.delete_book(first).await.unwrap();
        let second = db.add_book(&mut Book::new("Here", "y")).await.unwrap();

        assert_ne!(first, second, "{name}");
    }
}

#[tokio::test]
async fn test_close_releases_connection() {
    for (name, db) in backends().await {
        db.close().await.unwrap_or_else(|e| panic!("{name}: {e}"));
    }
}

proptest! {
    #[test]
    fn prop_list_is_sorted_for_any_insertion_order(
        titles in proptest::collection::vec("[a-zA-Z0-9 ]{0,12}", 0..20)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let listed = rt.block_on(async {
            let db = MemoryDatabase::new();
            for title in &titles {
                db.add_book(&mut Book::new(title.clone(), "author")).await.unwrap();
            }
            db.list_books().await.unwrap()
        });

        let mut expected = titles.clone();
        expected.sort();
        let got: Vec<String> = listed.into_iter().map(|b| b.title).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_ids_are_fresh_and_positive(count in 1usize..50, deletes in 0usize..50) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let ids = rt.block_on(async {
            let db = MemoryDatabase::new();
            let mut ids = Vec::new();
            for i in 0..count {
                let id = db.add_book(&mut Book::new(format!("{i}"), "a")).await.unwrap();
                if i < deletes {
                    db.delete_book(id).await.unwrap();
                }
                ids.push(id);
            }
            ids
        });

        prop_assert!(ids.iter().all(|&id| id > 0));
        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(unique.len(), ids.len());
    }
}
