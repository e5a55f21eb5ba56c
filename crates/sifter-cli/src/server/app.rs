//! Axum application setup.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::handlers;
use super::state::AppState;
use super::ServeConfig;
use crate::web::static_handler;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState, body_limit: usize) -> Router {
    // The UI may be served from a dev server on another port
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // LLM assistant routes
    let api_routes = Router::new()
        .route("/suggestions", post(handlers::suggestions))
        .route("/story", post(handlers::story))
        .route("/visualization", post(handlers::visualization))
        .route("/chat", post(handlers::chat));

    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/analyze-csv", post(handlers::analyze_csv))
        .nest("/api", api_routes)
        .fallback(static_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(
    state: AppState,
    config: &ServeConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state, config.body_limit);
    let addr = format!("{}:{}", config.host, config.port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
