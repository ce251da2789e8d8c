//! Routes

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use bookshelf_core::storage::IMAGE_CACHE_CONTROL;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::index))
        .route(
            "/books",
            get(handlers::list_books).post(handlers::create_book),
        )
        .route("/books/add", get(handlers::add_form))
        .route(
            "/books/:id",
            get(handlers::book_detail)
                .post(handlers::post_book)
                .put(handlers::update_book),
        )
        .route("/books/:id/edit", get(handlers::edit_form))
        // Health checks never touch the database
        .route("/_ah/health", get(handlers::health_check))
        .route("/logs", get(handlers::send_log))
        .route("/errors", get(handlers::send_error));

    if let Some(uploads) = &state.local_uploads {
        let service = ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                HeaderValue::from_static(IMAGE_CACHE_CONTROL),
            ))
            .service(ServeDir::new(&uploads.dir));
        router = router.nest_service(&uploads.route, service);
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
