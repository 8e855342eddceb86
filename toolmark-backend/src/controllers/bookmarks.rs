//! Bookmarks REST API, the presentation layer's entry point.
//!
//! Mutations (add/remove) go through the shared `BookmarkStore`; reads return
//! a view derived from the current collection and the request's query.

use actix_web::{error::InternalError, http::header, web, HttpResponse, Responder};
use serde::Serialize;

use super::{lock_store, ApiResponse};
use crate::bookmarks::{derive_view, query, BookmarkError, QueryParams};
use crate::models::NewBookmark;
use crate::AppState;

#[derive(Debug, Serialize)]
struct RemoveResult {
    id: String,
    removed: bool,
}

fn error_response(e: &BookmarkError) -> HttpResponse {
    match e {
        BookmarkError::Validation { .. } => HttpResponse::BadRequest().json(ApiResponse::err(e.to_string())),
        BookmarkError::Storage(msg) => {
            log::error!("[BOOKMARKS] {}", msg);
            HttpResponse::InternalServerError().json(ApiResponse::err("Failed to save bookmarks"))
        }
    }
}

/// GET /api/bookmarks?search=&category=
async fn list_bookmarks(data: web::Data<AppState>, query: web::Query<QueryParams>) -> impl Responder {
    let store = match lock_store(&data) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let view = derive_view(store.list(), &query);
    HttpResponse::Ok().json(ApiResponse::ok(view))
}

/// POST /api/bookmarks
async fn add_bookmark(data: web::Data<AppState>, body: web::Json<NewBookmark>) -> impl Responder {
    let mut store = match lock_store(&data) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.add(&body.name, &body.url, &body.category) {
        Ok(bookmark) => HttpResponse::Created().json(ApiResponse::ok(bookmark)),
        Err(e) => error_response(&e),
    }
}

/// DELETE /api/bookmarks/{id}
async fn remove_bookmark(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let mut store = match lock_store(&data) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.remove(&id) {
        Ok(removed) => HttpResponse::Ok().json(ApiResponse::ok(RemoveResult { id, removed })),
        Err(e) => error_response(&e),
    }
}

/// GET /api/bookmarks/categories
async fn list_categories(data: web::Data<AppState>) -> impl Responder {
    let store = match lock_store(&data) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(ApiResponse::ok(query::category_options(store.list())))
}

/// GET /api/bookmarks/{id}/open: redirect to the bookmarked tool
async fn open_bookmark(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let store = match lock_store(&data) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.get(&id) {
        Some(bookmark) => HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, bookmark.url.as_str()))
            .finish(),
        None => HttpResponse::NotFound().json(ApiResponse::err(format!("Bookmark not found: {}", id))),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    let json_cfg = web::JsonConfig::default().error_handler(|err, _req| {
        let resp = HttpResponse::BadRequest().json(ApiResponse::err(format!("Invalid bookmark payload: {}", err)));
        InternalError::from_response(err, resp).into()
    });

    cfg.service(
        web::scope("/api/bookmarks")
            .app_data(json_cfg)
            .route("", web::get().to(list_bookmarks))
            .route("", web::post().to(add_bookmark))
            .route("/categories", web::get().to(list_categories))
            .route("/{id}", web::delete().to(remove_bookmark))
            .route("/{id}/open", web::get().to(open_bookmark)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmarks::BookmarkStore;
    use crate::db::{MemorySlots, SlotStorage};
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    fn app_state(slots: Arc<MemorySlots>) -> web::Data<AppState> {
        let store = BookmarkStore::open(slots, "aiBookmarks").expect("Failed to open store");
        web::Data::new(AppState {
            store: Arc::new(Mutex::new(store)),
            config: crate::config::Config::from_lookup(|_| None),
            started_at: Instant::now(),
        })
    }

    #[actix_web::test]
    async fn test_add_list_and_remove() {
        let slots = Arc::new(MemorySlots::new());
        let app = test::init_service(App::new().app_data(app_state(slots.clone())).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/bookmarks")
            .set_json(json!({"name": "ChatGPT", "url": "https://chat.openai.com", "category": "chat"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/bookmarks")
            .set_json(json!({"name": "Midjourney", "url": "https://midjourney.com", "category": "image"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/api/bookmarks?search=chat&category=all").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["visible"], 1);
        assert_eq!(body["data"]["total"], 2);
        assert_eq!(body["data"]["bookmarks"][0]["name"], "ChatGPT");
        assert_eq!(body["data"]["categories"][1], json!({"value": "chat", "label": "Chat"}));

        let req = test::TestRequest::delete().uri(&format!("/api/bookmarks/{}", id)).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["removed"], true);

        let req = test::TestRequest::get().uri("/api/bookmarks").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["category"], "all");
        assert_eq!(slots.write_count(), 3);
    }

    #[actix_web::test]
    async fn test_add_with_empty_field_is_bad_request_without_write() {
        let slots = Arc::new(MemorySlots::new());
        let app = test::init_service(App::new().app_data(app_state(slots.clone())).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/bookmarks")
            .set_json(json!({"name": "", "url": "https://x.com", "category": "tools"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "name must not be empty");

        // missing field behaves like an empty one
        let req = test::TestRequest::post()
            .uri("/api/bookmarks")
            .set_json(json!({"name": "X", "url": "https://x.com"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        assert_eq!(slots.write_count(), 0);
        assert!(slots.get("aiBookmarks").unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_malformed_payload_is_bad_request() {
        let slots = Arc::new(MemorySlots::new());
        let app = test::init_service(App::new().app_data(app_state(slots)).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/bookmarks")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_remove_missing_id_is_ok() {
        let slots = Arc::new(MemorySlots::new());
        let app = test::init_service(App::new().app_data(app_state(slots.clone())).configure(config)).await;

        let req = test::TestRequest::delete().uri("/api/bookmarks/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"], json!({"id": "nope", "removed": false}));
        assert_eq!(slots.write_count(), 1);
    }

    #[actix_web::test]
    async fn test_categories_and_open() {
        let raw = r#"[
            {"id":"1","name":"ChatGPT","url":"https://chat.openai.com","category":"chat"},
            {"id":"2","name":"DALL-E","url":"https://openai.com/dall-e","category":"image"},
            {"id":"3","name":"Claude","url":"https://claude.ai","category":"chat"}
        ]"#;
        let slots = Arc::new(MemorySlots::with_slot("aiBookmarks", raw));
        let app = test::init_service(App::new().app_data(app_state(slots)).configure(config)).await;

        let req = test::TestRequest::get().uri("/api/bookmarks/categories").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let values: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["value"].as_str().unwrap())
            .collect();
        assert_eq!(values, vec!["all", "chat", "image"]);

        let req = test::TestRequest::get().uri("/api/bookmarks/3/open").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "https://claude.ai");

        let req = test::TestRequest::get().uri("/api/bookmarks/42/open").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/api/bookmarks?category=image").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["visible"], 1);
        assert_eq!(body["data"]["bookmarks"][0]["id"], "2");

        // a cleared category select submits `category=`
        let req = test::TestRequest::get().uri("/api/bookmarks?search=&category=").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["visible"], 3);
        assert_eq!(body["data"]["category"], "all");
    }
}
