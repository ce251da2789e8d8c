//! Handler error carrier

use crate::logging::LogSink;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::backtrace::Backtrace;
use std::fmt;
use thiserror::Error;

/// A book ID in the URL path that cannot name a stored book
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidId {
    #[error("no book with empty ID")]
    Empty,

    #[error("failed to convert({0})")]
    Malformed(String),

    #[error("invalid ID(string: {0})")]
    Zero(String),
}

/// A failed request: the cause, what the user sees, and where it happened.
///
/// Every application error maps to 500. The status is stored per error so
/// individual call sites can differentiate later without touching handlers.
#[derive(Debug)]
pub struct AppError {
    cause: anyhow::Error,
    message: String,
    status: StatusCode,
    backtrace: Backtrace,
    sink: LogSink,
}

impl AppError {
    pub fn new(sink: LogSink, cause: impl Into<anyhow::Error>, message: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            backtrace: Backtrace::force_capture(),
            sink,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.message, self.cause)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(
            status_code = %self.status.as_u16(),
            message = %self.message,
            error = %format!("{:#}", self.cause),
            "Handler error"
        );

        self.sink.record(&format!(
            "Handler error: status code: {}, message: {}, underlying err: {:#}\n{}",
            self.status.as_u16(),
            self.message,
            self.cause,
            self.backtrace
        ));

        (self.status, self.message).into_response()
    }
}
