//! Liveness and storage status for the bookmark service.

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use super::{lock_store, ApiResponse};
use crate::AppState;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
struct Liveness {
    status: &'static str,
    version: &'static str,
    uptime_secs: u64,
}

/// What the running store is backed by and when it last wrote
#[derive(Debug, Serialize)]
struct StoreStatus {
    storage_backend: &'static str,
    slot_key: String,
    bookmark_count: usize,
    last_persisted_at: Option<String>,
    port: u16,
}

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/health")
            .route("", web::get().to(liveness))
            .route("/store", web::get().to(store_status)),
    );
}

/// GET /api/health
async fn liveness(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::ok(Liveness {
        status: "ok",
        version: VERSION,
        uptime_secs: state.started_at.elapsed().as_secs(),
    }))
}

/// GET /api/health/store
async fn store_status(state: web::Data<AppState>) -> impl Responder {
    let store = match lock_store(&state) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    HttpResponse::Ok().json(ApiResponse::ok(StoreStatus {
        storage_backend: store.backend_name(),
        slot_key: store.slot_key().to_string(),
        bookmark_count: store.len(),
        last_persisted_at: store.last_persisted_at().map(|t| t.to_rfc3339()),
        port: state.config.port,
    }))
}
