//! Axum route handlers for the dbrelay gateway.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use dbrelay_store::SqlStore;

use crate::error::GatewayError;

// ── Shared state ─────────────────────────────────────────────────────────────

type Store = Arc<SqlStore>;

// ── Request types ─────────────────────────────────────────────────────────────

/// Query-string contract shared by `/query` and `/execute`.
#[derive(Debug, Deserialize)]
pub struct SqlParams {
    /// The statement to forward to the database, verbatim.
    pub sql: Option<String>,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router with the given store handle.
pub fn create_router(store: Store) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/query", get(query))
        .route("/execute", get(execute))
        .with_state(store)
        .layer(TraceLayer::new_for_http())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /` — fixed greeting, no side effects.
pub async fn hello() -> &'static str {
    "Hello, World!"
}

/// `GET /query?sql=...` — run the statement over a read-only handle and
/// return all resulting rows as a JSON array of arrays.
///
/// # Errors
/// Returns [`GatewayError::MissingSql`] if the parameter is absent, or
/// [`GatewayError::Store`] with the driver's text if execution fails,
/// including a write attempted over the read-only handle.
pub async fn query(
    State(store): State<Store>,
    Query(params): Query<SqlParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let sql = params.sql.ok_or(GatewayError::MissingSql)?;
    let rows: Vec<Vec<serde_json::Value>> = store.query(&sql).await?;
    Ok(Json(rows))
}

/// `GET /execute?sql=...` — apply the statement over a read-write handle.
/// Success is an empty 200 body; the statement is committed before the
/// connection is released.
///
/// # Errors
/// Returns [`GatewayError::MissingSql`] if the parameter is absent, or
/// [`GatewayError::Store`] with the driver's text if execution fails.
pub async fn execute(
    State(store): State<Store>,
    Query(params): Query<SqlParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let sql = params.sql.ok_or(GatewayError::MissingSql)?;
    store.execute(&sql).await?;
    Ok(StatusCode::OK)
}
