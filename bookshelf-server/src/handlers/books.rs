//! Catalog handlers

use super::form::BookForm;
use crate::error::{AppError, InvalidId};
use crate::state::AppState;
use axum::{
    extract::{FromRequest, Path, Request, State},
    response::{Html, Redirect},
};
use bookshelf_core::{Book, BookId};

/// Parse a book ID from the URL path; zero never names a stored book
pub fn parse_book_id(raw: &str) -> Result<BookId, InvalidId> {
    if raw.is_empty() {
        return Err(InvalidId::Empty);
    }
    let id: BookId = raw
        .parse()
        .map_err(|_| InvalidId::Malformed(raw.to_string()))?;
    if id == 0 {
        return Err(InvalidId::Zero(raw.to_string()));
    }
    Ok(id)
}

fn id_from_path(state: &AppState, raw: &str) -> Result<BookId, AppError> {
    parse_book_id(raw).map_err(|e| {
        let message = e.to_string();
        state.app_error(e, message)
    })
}

/// Load the book named by the URL path
async fn book_from_path(state: &AppState, raw: &str) -> Result<Book, AppError> {
    let id = id_from_path(state, raw)?;
    state.db.get_book(id).await.map_err(|e| {
        let message = format!("could not find book: {e}");
        state.app_error(e, message)
    })
}

/// Redirect `/` to the catalog
pub async fn index() -> Redirect {
    Redirect::to("/books")
}

/// List all books
pub async fn list_books(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let books = state.db.list_books().await.map_err(|e| {
        let message = format!("could not list books: {e}");
        state.app_error(e, message)
    })?;

    state.render(state.views.list(&books))
}

/// Show a single book
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let book = book_from_path(&state, &id).await?;
    state.render(state.views.detail(&book))
}

/// Empty form for a new book
pub async fn add_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state.render(state.views.edit(None))
}

/// Form pre-filled with an existing book
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let book = book_from_path(&state, &id).await?;
    state.render(state.views.edit(Some(&book)))
}

/// Add a book from the submitted form
pub async fn create_book(
    State(state): State<AppState>,
    form: BookForm,
) -> Result<Redirect, AppError> {
    let mut book = form.into_book(&state).await?;

    let id = state.db.add_book(&mut book).await.map_err(|e| {
        let message = format!("could not save book: {e}");
        state.app_error(e, message)
    })?;

    tracing::info!(id, title = %book.title, "book added");
    Ok(Redirect::to(&format!("/books/{id}")))
}

/// Replace the details of an existing book
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: BookForm,
) -> Result<Redirect, AppError> {
    let id = id_from_path(&state, &id)?;

    let mut book = form.into_book(&state).await?;
    book.id = id;

    state.db.update_book(&book).await.map_err(|e| {
        let message = format!("UpdateBook: {e}");
        state.app_error(e, message)
    })?;

    tracing::info!(id, "book updated");
    Ok(Redirect::to(&book.path()))
}

/// Delete a book by ID
pub async fn delete_book(state: &AppState, raw: &str) -> Result<Redirect, AppError> {
    let id = id_from_path(state, raw)?;

    state.db.delete_book(id).await.map_err(|e| {
        let message = format!("DeleteBook: {e}");
        state.app_error(e, message)
    })?;

    tracing::info!(id, "book deleted");
    Ok(Redirect::to("/books"))
}

/// `POST /books/{id}` updates, `POST /books/{id}:delete` deletes.
///
/// Both share one path segment, so the suffix is split off here.
pub async fn post_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    req: Request,
) -> Result<Redirect, AppError> {
    match id.strip_suffix(":delete") {
        Some(raw) => delete_book(&state, raw).await,
        None => {
            let form = BookForm::from_request(req, &state).await?;
            update_book(State(state), Path(id), form).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book_id() {
        assert_eq!(parse_book_id("42"), Ok(42));
        assert_eq!(parse_book_id(""), Err(InvalidId::Empty));
        assert_eq!(parse_book_id("0"), Err(InvalidId::Zero("0".to_string())));
        assert_eq!(
            parse_book_id("abc"),
            Err(InvalidId::Malformed("abc".to_string()))
        );
        assert_eq!(
            parse_book_id("-1"),
            Err(InvalidId::Malformed("-1".to_string()))
        );
        assert!(matches!(
            parse_book_id("99999999999"),
            Err(InvalidId::Malformed(_))
        ));
    }
}
