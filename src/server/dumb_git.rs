//! Dumb git HTTP `info/refs` shim
//!
//! Intercepts `GET /<repo>/info/refs` and answers it with an advertisement
//! built from the repository's loose refs. Every other request passes
//! through to the next handler untouched.

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dumbgit_refs::path::{refs_target, RefsTarget};
use dumbgit_refs::{format_advertisement, Error, RefReader};
use std::sync::Arc;
use tracing::{debug, error};

use crate::config::{Config, TagsErrorPolicy};

/// Body of every 404 written by the shim
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Dumb git middleware state
#[derive(Clone)]
pub struct DumbGitState {
    pub config: Arc<Config>,
    pub reader: Arc<dyn RefReader>,
}

pub async fn dumb_git_middleware(
    State(state): State<DumbGitState>,
    request: Request,
    next: Next,
) -> Response {
    let repo = match refs_target(&state.config.dir, request.uri().path()) {
        RefsTarget::Other => return next.run(request).await,
        RefsTarget::Undecodable => {
            debug!(path = %request.uri().path(), "undecodable info/refs path");
            return (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response();
        }
        RefsTarget::Repo(repo) => repo,
    };

    debug!(repo = %repo.display(), "advertising refs");

    match state.reader.read_refs(&repo) {
        Ok(refs) => {
            // No Content-Type header
            let mut response = Response::new(Body::from(format_advertisement(&refs)));
            *response.status_mut() = StatusCode::OK;
            response
        }
        Err(err) if err.is_fatal() && state.config.refs.on_tags_error == TagsErrorPolicy::Exit => {
            exit_on_tags_error(&err)
        }
        Err(err) => {
            debug!(repo = %repo.display(), error = %err, "refs unavailable");
            (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
        }
    }
}

/// Terminate the server because `refs/tags` could not be listed.
///
/// Severity mismatch: an unreadable `refs/heads` costs one request a 404,
/// this costs every connected client its connection. Configure
/// `refs.on_tags_error = "not-found"` to downgrade it to a 404 as well.
fn exit_on_tags_error(err: &Error) -> ! {
    error!(error = %err, "refs/tags unreadable, exiting");
    eprintln!("dumbgit: {}", err);
    std::process::exit(1);
}
