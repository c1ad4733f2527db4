//! Entry point for the `dbrelay-gateway` HTTP server.

use std::sync::Arc;

use dbrelay_gateway::routes::create_router;
use dbrelay_store::SqlStore;
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let addr = std::env::var("DBRELAY_LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:80".to_owned());
    let db_path = std::env::var("DBRELAY_DB_PATH")
        .unwrap_or_else(|_| "/tmp/database.sqlite".to_owned());

    let store = Arc::new(SqlStore::new(db_path));
    if let Err(e) = store.ensure_schema().await {
        tracing::error!(path = %store.path().display(), error = %e, "failed to prepare database");
        std::process::exit(1);
    }

    let app = create_router(store);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "dbrelay-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
