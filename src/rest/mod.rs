// rest/mod.rs — Public REST API server.
//
// Axum HTTP server in front of the engine and the mailer. CORS is wide
// open; the SPA may be served from anywhere during development.
//
// Endpoints:
//   POST /api/mood-scan
//   POST /api/itineraries
//   POST /api/send-quote
//   GET  /api/health

pub mod routes;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("EchoVibe API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/mood-scan", post(routes::mood::mood_scan))
        .route("/api/itineraries", post(routes::itineraries::itineraries))
        .route("/api/send-quote", post(routes::quote::send_quote));

    // Production bundle fallback; dev setups serve the SPA from Vite.
    if let Some(dir) = ctx.config.static_root() {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(CorsLayer::permissive()).with_state(ctx)
}
