//! In-memory todos API with a self-describing OpenAPI contract.
//!
//! # Overview
//! [`store::TodoStore`] owns the collection and every CRUD rule. The axum
//! router in this module wraps one store instance, maps store results to
//! status codes, and serves the generated OpenAPI document under `/docs`.
//!
//! # Design
//! - The store is a plain value with no interior locking. The router owns it
//!   behind [`Db`] and takes the write guard for every mutation.
//! - Request bodies are lenient: malformed or missing JSON reads as `{}`.
//! - Path ids are coerced numerically; an id that does not coerce is a 404.

pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;
pub mod telemetry;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::openapi::OpenApi;

pub use error::ApiError;
pub use model::{ErrorBody, NewTodo, Todo, TodoPatch};
pub use store::{StoreError, TodoStore};

/// Shared handle to the single store instance.
pub type Db = Arc<RwLock<TodoStore>>;

/// Router over `store`, advertising `http://localhost:3000` in its docs.
pub fn app(store: TodoStore) -> Router {
    router(store, docs::openapi("http://localhost:3000"))
}

/// Router over `store` serving `doc` under `/docs`.
pub fn router(store: TodoStore, doc: OpenApi) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route(routes::TODOS_PATH, get(routes::list_todos).post(routes::create_todo))
        .route(
            routes::TODO_PATH,
            get(routes::get_todo)
                .patch(routes::update_todo)
                .delete(routes::delete_todo),
        )
        .with_state(db)
        .merge(docs::router(doc))
        .layer(TraceLayer::new_for_http())
}

/// Serve `app` on `listener` until Ctrl-C or SIGTERM, then drain in-flight requests.
pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }
    info!("shutdown signal received, draining connections");
}
