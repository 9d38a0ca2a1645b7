mod access_log;
mod conn;
mod dumb_git;

use anyhow::{Context, Result};
use axum::{middleware, Router};
use dumbgit_refs::{FsRefReader, RefReader};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tracing::{info, warn};

use crate::config::{Config, READ_TIMEOUT, WRITE_TIMEOUT};

pub use dumb_git::{DumbGitState, NOT_FOUND_BODY};

pub struct DumbGitServer {
    config: Arc<Config>,
    reader: Arc<dyn RefReader>,
}

impl DumbGitServer {
    pub fn new(config: Config) -> Self {
        let reader = Arc::new(FsRefReader::new(config.refs.tag_source));
        Self {
            config: Arc::new(config),
            reader,
        }
    }

    /// Replace the filesystem ref reader
    pub fn with_reader(mut self, reader: Arc<dyn RefReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Handler chain, outermost first: timeouts, access log, dumb git
    /// shim, static files from `config.dir`.
    pub fn router(&self) -> Router {
        let git_state = DumbGitState {
            config: self.config.clone(),
            reader: self.reader.clone(),
        };

        Router::new()
            .fallback_service(ServeDir::new(&self.config.dir))
            .layer(middleware::from_fn_with_state(
                git_state,
                dumb_git::dumb_git_middleware,
            ))
            .layer(middleware::from_fn(access_log::access_log))
            .layer(RequestBodyTimeoutLayer::new(READ_TIMEOUT))
            .layer(TimeoutLayer::new(WRITE_TIMEOUT))
    }

    /// Bind `host:port` and serve until the process stops
    pub async fn run(self) -> Result<()> {
        let addr = self.config.bind_address();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener, one task per connection
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr()?;
        info!(target: "http", "Listening on {}", addr);

        let router = self.router();
        loop {
            let (stream, remote) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    // Usually fd exhaustion; back off instead of spinning
                    warn!(target: "http", error = %err, "accept failed");
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    continue;
                }
            };
            tokio::spawn(conn::serve_connection(stream, remote, router.clone()));
        }
    }
}
