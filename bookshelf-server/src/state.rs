//! Application state

use crate::config::{DatabaseKind, Settings};
use crate::error::AppError;
use crate::logging::LogSink;
use crate::views::{RenderResult, Views};
use anyhow::{Context, Result};
use axum::response::Html;
use bookshelf_core::database::{BookDatabase, MemoryDatabase, SqlDatabase};
use bookshelf_core::storage::{BlobStore, LocalStorage};
use std::path::PathBuf;
use std::sync::Arc;

/// A bucket directory and the route it is served under
#[derive(Debug, Clone)]
pub struct LocalUploads {
    pub dir: PathBuf,
    pub route: String,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Active book database
    pub db: Arc<dyn BookDatabase>,

    /// Bucket for cover images; `None` disables uploads
    pub storage: Option<Arc<dyn BlobStore>>,

    /// Local bucket served by this process, if any
    pub local_uploads: Option<LocalUploads>,

    /// Page renderer, built once at startup
    pub views: Arc<Views>,

    /// Sink for log entries and error reports
    pub log: LogSink,
}

impl AppState {
    /// State around `db` with uploads disabled and logging to stderr
    pub fn new(db: Arc<dyn BookDatabase>) -> Self {
        Self {
            db,
            storage: None,
            local_uploads: None,
            views: Arc::new(Views::default()),
            log: LogSink::stderr(),
        }
    }

    pub fn with_storage(mut self, storage: Arc<dyn BlobStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Use a local directory as the bucket.
    ///
    /// A `base_url` path such as `/covers` is also served by this process; an
    /// absolute URL is left to whatever fronts the directory.
    pub fn with_local_uploads(mut self, dir: impl Into<PathBuf>, base_url: &str) -> Self {
        let dir = dir.into();
        let route = base_url.trim_end_matches('/');
        self.local_uploads = if route.starts_with('/') && route.len() > 1 {
            Some(LocalUploads {
                dir: dir.clone(),
                route: route.to_string(),
            })
        } else {
            tracing::info!(base_url, "uploads are served externally");
            None
        };
        self.with_storage(Arc::new(LocalStorage::new(dir, base_url)))
    }

    pub fn with_log_sink(mut self, log: LogSink) -> Self {
        self.log = log;
        self
    }

    /// Create application state from settings
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let db: Arc<dyn BookDatabase> = match settings.database {
            DatabaseKind::Memory => {
                tracing::warn!("using the in-memory database; books are lost on exit");
                Arc::new(MemoryDatabase::new())
            }
            DatabaseKind::MySql | DatabaseKind::Sqlite => {
                let db = SqlDatabase::connect(&settings.database_url())
                    .await
                    .context("failed to connect to the book database")?;
                db.migrate()
                    .await
                    .context("failed to create the books table")?;
                Arc::new(db)
            }
        };

        let mut state = Self::new(db);
        if let Some(dir) = &settings.upload_dir {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("failed to create upload directory {}", dir.display()))?;
            state = state.with_local_uploads(dir, &settings.upload_url);
        }

        Ok(state)
    }

    /// Wrap a handler failure into the error carrier
    pub fn app_error(&self, cause: impl Into<anyhow::Error>, message: impl Into<String>) -> AppError {
        AppError::new(self.log.clone(), cause, message)
    }

    /// Turn a rendered page into a response body
    pub fn render(&self, page: RenderResult) -> Result<Html<String>, AppError> {
        page.map(Html)
            .map_err(|e| self.app_error(e, "could not render page"))
    }
}
