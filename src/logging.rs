use std::time::Instant;

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Response extension set by the create handler so the request summary can name the new message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedMessageId(pub u64);

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started_at = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();
    let message_id = response
        .extensions()
        .get::<CreatedMessageId>()
        .map(|created| created.0);

    info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = elapsed_ms,
        message_id,
        "request summary"
    );

    // 404s are mostly static asset misses; other 4xx mean the API body was refused.
    if status.is_client_error() && status != StatusCode::NOT_FOUND {
        warn!(method = %method, path = %path, status = status.as_u16(), "request rejected");
    }

    response
}
