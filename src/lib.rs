use std::{path::Path, sync::Arc};

use axum::{middleware, routing::get, Router};
use tower_http::services::ServeDir;

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod store;

use store::MessageStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MessageStore>,
}

impl AppState {
    pub fn new(store: Arc<MessageStore>) -> Self {
        Self { store }
    }
}

/// Routes the guestbook API. Unmatched paths fall through to `static_dir` when one is given.
pub fn build_app(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route(
            "/api/messages",
            get(http::handlers::list_messages).post(http::handlers::create_message),
        )
        .route("/health", get(http::handlers::health));

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
