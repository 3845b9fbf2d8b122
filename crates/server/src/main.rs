use std::{net::SocketAddr, sync::Arc};

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use server_api::ApiContext;
use storage::open_store;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::{
    healthz, http_create_grid, http_list_grids, http_list_products, http_list_templates,
    method_not_allowed, not_found,
};
use app_state::AppState;
use config::{load_settings, prepare_database_url};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let database_url = settings
        .database_url
        .as_deref()
        .map(prepare_database_url)
        .transpose()?;
    let store = open_store(database_url.as_deref()).await.map_err(|error| {
        error!(
            database_url = database_url.as_deref().unwrap_or("memory"),
            %error,
            "failed to open grid store; verify parent directory exists and permissions are correct"
        );
        error
    })?;
    info!(
        backend = if database_url.is_some() { "sqlite" } else { "memory" },
        "grid store opened"
    );

    let state = AppState {
        api: ApiContext::new(store),
        body_limit_bytes: settings.body_limit_bytes,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.body_limit_bytes;
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/products",
            get(http_list_products).fallback(method_not_allowed),
        )
        .route(
            "/templates",
            get(http_list_templates).fallback(method_not_allowed),
        )
        .route(
            "/grids",
            get(http_list_grids)
                .post(http_create_grid)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
