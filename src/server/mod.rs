//! HTTP server for the browser assistant
//!
//! This module wires the analyzer, fetcher, and store together behind a
//! JSON API and serves the embedded single-page UI. Routes:
//!
//! - `GET /` — the UI
//! - `POST /api/ingest` — analyze a URL or raw markup
//! - `GET/POST/PATCH/DELETE /api/tasks` — task CRUD

mod error;
mod ingest;
mod tasks;

pub use error::ApiError;
pub use ingest::{IngestMeta, IngestRequest, IngestResponse};

use crate::error::Error;
use crate::store::Database;
use axum::Router;
use axum::response::Html;
use axum::routing::{get, post};
use std::net::SocketAddr;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Store handle cloned into each handler
    pub db: Database,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/ingest", post(ingest::ingest))
        .route(
            "/api/tasks",
            get(tasks::list_tasks)
                .post(tasks::create_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .with_state(state)
}

/// Start the HTTP server and serve until shutdown
pub async fn start_server(host: &str, port: u16, db: Database) -> Result<(), Error> {
    let state = AppState { db };
    let app = router(state);

    let host_addr: std::net::IpAddr = host
        .parse()
        .map_err(|e| Error::Server(format!("Invalid host address '{}': {}", host, e)))?;
    let addr = SocketAddr::from((host_addr, port));

    info!("Serving pagelens at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind {}: {}", addr, e)))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}

/// Serve the embedded UI page
async fn serve_index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}
