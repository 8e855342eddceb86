//! Backdrop Module Service — the ambient geometric background.
//!
//! Generates the randomized shapes and connecting lines drawn behind the
//! bookmark UI. Has no access to bookmark data.
//!
//! Default: http://127.0.0.1:9110/

mod generator;
mod routes;

use routes::AppState;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::time::Instant;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let port: u16 = std::env::var("BACKDROP_MODULE_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9110);

    let state = Arc::new(AppState {
        start_time: Instant::now(),
        scenes_generated: AtomicU64::new(0),
    });

    let cors = tower_http::cors::CorsLayer::permissive();

    let app = axum::Router::new()
        .route("/rpc/scene", axum::routing::get(routes::scene))
        .route("/rpc/scene/advance", axum::routing::post(routes::advance))
        .route("/rpc/status", axum::routing::get(routes::status))
        .with_state(state)
        .layer(cors);

    let addr = format!("127.0.0.1:{}", port);
    log::info!("[BACKDROP] Backdrop Module Service listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("[BACKDROP] Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("[BACKDROP] Server error: {}", e);
        std::process::exit(1);
    }
}
