//! HTTP server implementation

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use super::handlers::{
    delete_entry, get_entry, get_list_element, get_map_value, list_keys, set_entry, stats_handler,
};
use crate::store::Store;

/// Run the HTTP server until it stops
pub async fn run_web_server(addr: &str, store: Arc<Store>) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/storage", get(list_keys))
        .route(
            "/storage/:key",
            get(get_entry).post(set_entry).delete(delete_entry),
        )
        .route("/storage/:key/index/:index", get(get_list_element))
        .route("/storage/:key/field/:sub_key", get(get_map_value))
        .route("/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(store);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("storage API available at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
