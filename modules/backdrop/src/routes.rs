//! Axum route handlers for the backdrop module RPC API.

use crate::generator;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use backdrop_types::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

pub struct AppState {
    pub start_time: Instant,
    pub scenes_generated: AtomicU64,
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn check_count(name: &str, count: usize) -> Result<usize, String> {
    if count > generator::MAX_ELEMENTS {
        Err(format!("{} must be at most {}", name, generator::MAX_ELEMENTS))
    } else {
        Ok(count)
    }
}

// GET /rpc/scene
pub async fn scene(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SceneQuery>,
) -> (StatusCode, Json<RpcResponse<Scene>>) {
    let counts = check_count("shapes", query.shapes.unwrap_or(generator::DEFAULT_SHAPES)).and_then(|shapes| {
        check_count("connections", query.connections.unwrap_or(generator::DEFAULT_CONNECTIONS))
            .map(|connections| (shapes, connections))
    });
    let (shapes, connections) = match counts {
        Ok(c) => c,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(RpcResponse::err(e))),
    };

    let scene = generator::generate_scene(&mut rng_for(query.seed), shapes, connections);
    state.scenes_generated.fetch_add(1, Ordering::Relaxed);
    log::debug!("[BACKDROP] Generated scene with {} shapes, {} connections", shapes, connections);

    (StatusCode::OK, Json(RpcResponse::ok(scene)))
}

// POST /rpc/scene/advance
pub async fn advance(Json(mut scene): Json<Scene>) -> (StatusCode, Json<RpcResponse<Scene>>) {
    if let Err(e) = check_count("shapes", scene.shapes.len())
        .and_then(|_| check_count("connections", scene.connections.len()))
    {
        return (StatusCode::BAD_REQUEST, Json(RpcResponse::err(e)));
    }

    generator::advance(&mut rng_for(None), &mut scene);
    (StatusCode::OK, Json(RpcResponse::ok(scene)))
}

// GET /rpc/status
pub async fn status(State(state): State<Arc<AppState>>) -> (StatusCode, Json<RpcResponse<ServiceStatus>>) {
    let status = ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
        scenes_generated: state.scenes_generated.load(Ordering::Relaxed),
    };

    (StatusCode::OK, Json(RpcResponse::ok(status)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            start_time: Instant::now(),
            scenes_generated: AtomicU64::new(0),
        })
    }

    #[tokio::test]
    async fn test_scene_defaults_and_counter() {
        let state = state();
        let (code, Json(resp)) = scene(State(state.clone()), Query(SceneQuery::default())).await;
        assert_eq!(code, StatusCode::OK);
        let data = resp.data.unwrap();
        assert_eq!(data.shapes.len(), generator::DEFAULT_SHAPES);
        assert_eq!(data.connections.len(), generator::DEFAULT_CONNECTIONS);
        assert_eq!(state.scenes_generated.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_seeded_scene_is_reproducible() {
        let query = || SceneQuery {
            seed: Some(99),
            shapes: Some(3),
            connections: Some(2),
        };
        let (_, Json(a)) = scene(State(state()), Query(query())).await;
        let (_, Json(b)) = scene(State(state()), Query(query())).await;
        assert_eq!(a.data, b.data);
    }

    #[tokio::test]
    async fn test_oversized_request_rejected() {
        let query = SceneQuery {
            seed: None,
            shapes: Some(generator::MAX_ELEMENTS + 1),
            connections: None,
        };
        let (code, Json(resp)) = scene(State(state()), Query(query)).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("shapes"));
    }

    #[tokio::test]
    async fn test_advance_keeps_element_counts() {
        let original = generator::generate_scene(&mut StdRng::seed_from_u64(5), 4, 6);
        let (code, Json(resp)) = advance(Json(original.clone())).await;
        assert_eq!(code, StatusCode::OK);
        let moved = resp.data.unwrap();
        assert_eq!(moved.shapes.len(), 4);
        assert_eq!(moved.connections.len(), 6);
        assert_eq!(moved.shapes[0].kind, original.shapes[0].kind);
    }
}
