//! Per-account todo-list service.
//!
//! # Overview
//! An axum router over a SQLite-backed [`TodoStore`]. Every route lives under
//! `/todo/{account}` and every store call is scoped to that account.
//!
//! # Design
//! - The route table below is the whole dispatcher; typed extractors turn
//!   bad segments into 400s before a handler runs.
//! - Handlers are stateless. The only shared state is the store's pool.
//! - Errors render as `{"error": {"message": ...}}` (see [`AppError`]).

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod store;
pub mod telemetry;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;

pub use config::Config;
pub use error::AppError;
pub use model::{AccountName, ListStatus, NewTodo, TodoItem};
pub use store::{StoreError, TodoStore};

pub fn app(store: TodoStore) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/todo/{account}", get(handlers::list_todos))
        .route("/todo/{account}/active/{active}", get(handlers::list_by_active))
        .route("/todo/{account}/highs/{priority}", get(handlers::list_by_priority))
        .route("/todo/{account}/cat/{category}", get(handlers::list_by_category))
        .route("/todo/{account}/id/{id}", get(handlers::get_by_id))
        .route("/todo/{account}/add", post(handlers::add_todo))
        .route("/todo/{account}/ctitle/{id}", post(handlers::change_title))
        .route("/todo/{account}/cpri/{id}", post(handlers::change_priority))
        .route("/todo/{account}/cactive/{id}", post(handlers::change_active))
        .route("/todo/{account}/rmtitle", delete(handlers::remove_by_title))
        .route("/todo/{account}/rmpri", delete(handlers::remove_by_priority))
        .route("/todo/{account}/rminactive", delete(handlers::remove_inactive))
        .route("/todo/{account}/rmid", delete(handlers::remove_by_id))
        .fallback(handlers::unknown_route)
        .method_not_allowed_fallback(handlers::unknown_route)
        .with_state(store)
}

pub async fn run(listener: TcpListener, store: TodoStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}
