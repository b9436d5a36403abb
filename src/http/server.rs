//! HTTP server wiring.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    response::{IntoResponse, Json},
    routing::{get, patch, post},
};
use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{tasks, users};
use crate::service::Tracker;
use crate::validation::RequestValidator;

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub tracker: Tracker,
    pub validator: Arc<RequestValidator>,
}

impl AppState {
    pub fn new(tracker: Tracker, validator: RequestValidator) -> Self {
        Self {
            tracker,
            validator: Arc::new(validator),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/v1/users", post(users::create_user).get(users::list_users))
        .route("/v1/users/info", get(users::user_info))
        .route(
            "/v1/users/{id}",
            patch(users::update_user).delete(users::delete_user),
        )
        .route("/v1/tasks/start/{user_id}", post(tasks::start_task))
        .route("/v1/tasks/end/{id}", patch(tasks::end_task))
        .route("/v1/tasks/summary-time/{user_id}", get(tasks::summary_time))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle for a running server.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    join: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the listener is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal graceful shutdown and wait for in-flight requests to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = self.join.await {
            tracing::error!("Server task failed: {}", e);
        }
    }
}

/// Bind `host:port` and serve in the background.
pub async fn start_server(state: AppState, host: &str, port: u16) -> anyhow::Result<ServerHandle> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;

    info!("Time tracker listening on http://{}", addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let join = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("Server shutting down");
            })
            .await
        {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(ServerHandle {
        addr,
        shutdown_tx: Some(shutdown_tx),
        join,
    })
}
