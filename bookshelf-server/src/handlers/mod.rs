//! Request handlers

mod books;
mod form;

pub use books::*;
pub use form::BookForm;

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::Html};

/// Fixed entry written by the log trigger
pub const LOG_MESSAGE: &str = "Hey, you triggered a custom log entry. Good job!";

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Write a custom entry to the log sink
pub async fn send_log(State(state): State<AppState>) -> Html<&'static str> {
    tracing::info!("{LOG_MESSAGE}");
    state.log.record(LOG_MESSAGE);

    Html("<html>Log sent!</html>")
}

/// Report a fixed error through the error carrier
pub async fn send_error(State(state): State<AppState>) -> Result<Html<&'static str>, AppError> {
    let message = "<html>Logging an error. Error Reporting(it may take a minute or two for the error to appear).</html>";
    Err(state.app_error(anyhow::anyhow!("uh oh! an error occurred"), message))
}
