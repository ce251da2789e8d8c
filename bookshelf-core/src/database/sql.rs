//! Relational book database backed by sqlx
//!
//! Uses the `Any` driver so the same statements run against MySQL in
//! production and SQLite in tests. Each trait operation issues one statement.

use super::{BookDatabase, DatabaseResult};
use crate::error::DatabaseError;
use crate::types::{Book, BookId};
use async_trait::async_trait;
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::{AnyPool, Row};

/// Schema for MySQL deployments.
///
/// Text columns are VARCHAR: MySQL sends TEXT as a blob on the wire, which the
/// `Any` driver will not decode into `String`.
const MYSQL_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    author VARCHAR(255) NOT NULL,
    published_date VARCHAR(255) NOT NULL,
    image_url VARCHAR(2048) NOT NULL,
    description VARCHAR(8000) NOT NULL
)
"#;

/// Schema for SQLite; AUTOINCREMENT keeps deleted IDs from being reused
const SQLITE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    published_date TEXT NOT NULL,
    image_url TEXT NOT NULL,
    description TEXT NOT NULL
)
"#;

const INSERT_BOOK: &str = r#"
INSERT INTO books (title, author, published_date, image_url, description)
VALUES (?, ?, ?, ?, ?)
"#;

const INSERT_BOOK_RETURNING_ID: &str = r#"
INSERT INTO books (title, author, published_date, image_url, description)
VALUES (?, ?, ?, ?, ?)
RETURNING id
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    MySql,
    Sqlite,
}

/// Persists books to a SQL database
pub struct SqlDatabase {
    pool: AnyPool,
    dialect: Dialect,
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    published_date: String,
    image_url: String,
    description: String,
}

/// Optional text columns are stored as empty strings rather than NULL
fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

impl TryFrom<BookRow> for Book {
    type Error = DatabaseError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let id = BookId::try_from(row.id)
            .map_err(|_| DatabaseError::backend("decode", format!("invalid ID {}", row.id)))?;
        Ok(Book {
            id,
            title: row.title,
            author: row.author,
            published_date: row.published_date,
            image_url: non_empty(row.image_url),
            description: non_empty(row.description),
        })
    }
}

impl SqlDatabase {
    /// Connect to the database at `url` (`mysql://...` or `sqlite:...`)
    pub async fn connect(url: &str) -> DatabaseResult<Self> {
        install_default_drivers();

        let dialect = if url.starts_with("sqlite:") {
            Dialect::Sqlite
        } else {
            Dialect::MySql
        };

        // Every connection to `sqlite::memory:` opens a separate database,
        // so keep exactly one connection alive for the pool's lifetime.
        let options = if url.contains(":memory:") {
            AnyPoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            AnyPoolOptions::new().max_connections(10)
        };

        let pool = options
            .connect(url)
            .await
            .map_err(|e| DatabaseError::backend("connect", e))?;

        tracing::info!(dialect = ?dialect, "connected to book database");
        Ok(Self { pool, dialect })
    }

    /// Create the `books` table if it does not exist yet
    pub async fn migrate(&self) -> DatabaseResult<()> {
        let schema = match self.dialect {
            Dialect::MySql => MYSQL_SCHEMA,
            Dialect::Sqlite => SQLITE_SCHEMA,
        };
        sqlx::query(schema)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::backend("migrate", e))?;
        Ok(())
    }

    async fn exists(&self, id: BookId) -> DatabaseResult<bool> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM books WHERE id = ?")
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::backend("update", e))?;
        Ok(found.is_some())
    }
}

#[async_trait]
impl BookDatabase for SqlDatabase {
    async fn list_books(&self) -> DatabaseResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, published_date, image_url, description
            FROM books
            ORDER BY title
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::backend("list", e))?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn get_book(&self, id: BookId) -> DatabaseResult<Book> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, published_date, image_url, description
            FROM books
            WHERE id = ?
            "#,
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::backend("get", e))?;

        row.ok_or(DatabaseError::NotFound(id))?.try_into()
    }

    async fn add_book(&self, book: &mut Book) -> DatabaseResult<BookId> {
        // A set primary key means the record was already created
        if !book.is_new() {
            return Err(DatabaseError::AlreadyExists(book.title.clone()));
        }

        let sql = match self.dialect {
            // The SQLite `Any` driver never reports the inserted rowid
            Dialect::Sqlite => INSERT_BOOK_RETURNING_ID,
            Dialect::MySql => INSERT_BOOK,
        };
        let insert = sqlx::query(sql)
            .bind(book.title.clone())
            .bind(book.author.clone())
            .bind(book.published_date.clone())
            .bind(book.image_url.clone().unwrap_or_default())
            .bind(book.description.clone().unwrap_or_default());

        let raw_id = match self.dialect {
            Dialect::Sqlite => {
                let row = insert
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| DatabaseError::backend("add", e))?;
                Some(row.try_get::<i64, _>("id").map_err(|e| DatabaseError::backend("add", e))?)
            }
            Dialect::MySql => insert
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::backend("add", e))?
                .last_insert_id(),
        };

        let id = raw_id
            .and_then(|id| BookId::try_from(id).ok())
            .filter(|&id| id != 0)
            .ok_or_else(|| {
                DatabaseError::backend("add", format!("no ID assigned to {}", book.title))
            })?;

        book.id = id;
        Ok(id)
    }

    async fn delete_book(&self, id: BookId) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::backend("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(id));
        }
        Ok(())
    }

    async fn update_book(&self, book: &Book) -> DatabaseResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author = ?, published_date = ?, image_url = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(book.title.clone())
        .bind(book.author.clone())
        .bind(book.published_date.clone())
        .bind(book.image_url.clone().unwrap_or_default())
        .bind(book.description.clone().unwrap_or_default())
        .bind(i64::from(book.id))
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::backend("update", e))?;

        // MySQL reports zero affected rows when nothing changed
        if result.rows_affected() == 0 && !self.exists(book.id).await? {
            return Err(DatabaseError::NotFound(book.id));
        }
        Ok(())
    }

    async fn close(&self) -> DatabaseResult<()> {
        self.pool.close().await;
        tracing::info!("book database connection closed");
        Ok(())
    }
}
