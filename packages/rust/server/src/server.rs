use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use okrcopilot_shared::{OkrError, Result};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use super::handlers::{
    handle_apply_edit, handle_health, handle_process, handle_published, handle_publish,
    handle_resolve_baseline,
};
use super::{AppState, MAX_BODY_SIZE, REQUEST_TIMEOUT_SECS};

/// Bind `host:port` and serve the API until Ctrl-C.
pub async fn run_server(
    host: &str,
    port: u16,
    state: AppState,
    cors_origins: &[String],
) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| OkrError::config(format!("invalid bind address '{host}:{port}': {e}")))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| OkrError::Network(format!("bind {addr}: {e}")))?;

    run_server_with_listener(listener, state, cors_origins).await
}

/// Serve the API from a pre-bound listener.
pub async fn run_server_with_listener(
    listener: tokio::net::TcpListener,
    state: AppState,
    cors_origins: &[String],
) -> Result<()> {
    let local = listener
        .local_addr()
        .map_err(|e| OkrError::Network(format!("listener address: {e}")))?;

    print_banner(&local, &state);
    tracing::info!(%local, "OKR API listening");

    let app = build_app(state, cors_origins);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| OkrError::Network(format!("serve: {e}")))?;

    tracing::info!("OKR API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn print_banner(local: &SocketAddr, state: &AppState) {
    println!("OKR Copilot API listening on http://{local}");
    println!("  POST /api/process-okr");
    println!("  POST /api/resolve-baseline");
    println!("  POST /api/apply-edit");
    println!("  POST /api/publish-okr");
    println!("  GET  /api/published-okrs");
    println!("  GET  /health");
    println!("  Keeping the latest {} published OKRs", state.store.capacity());
}

/// Router with all routes and transport layers applied.
pub fn build_app(state: AppState, cors_origins: &[String]) -> Router {
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/api/process-okr", post(handle_process))
        .route("/api/resolve-baseline", post(handle_resolve_baseline))
        .route("/api/apply-edit", post(handle_apply_edit))
        .route("/api/publish-okr", post(handle_publish))
        .route("/api/published-okrs", get(handle_published));

    let mut app = app
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ));

    if !cors_origins.is_empty() {
        let origins: Vec<_> = cors_origins.iter().filter_map(|o| o.parse().ok()).collect();
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers([axum::http::header::CONTENT_TYPE]),
        );
    }

    app
}
