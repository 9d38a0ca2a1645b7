use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;

/// Access log middleware - records method and URI, then hands the request on
pub async fn access_log(request: Request, next: Next) -> Response {
    info!(target: "http", "{} {}", request.method(), request.uri());
    next.run(request).await
}
