use actix_web::{web, HttpResponse};
use serde::Serialize;
use std::sync::MutexGuard;

use crate::bookmarks::BookmarkStore;
use crate::AppState;

pub mod bookmarks;
pub mod health;

/// JSON envelope shared by every `/api` handler
#[derive(Debug, Serialize)]
pub(crate) struct ApiResponse<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub(crate) fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub(crate) fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Lock the shared store, or build the 500 response for a poisoned lock
pub(crate) fn lock_store(data: &web::Data<AppState>) -> Result<MutexGuard<'_, BookmarkStore>, HttpResponse> {
    data.store.lock().map_err(|_| {
        log::error!("[BOOKMARKS] Store lock poisoned");
        HttpResponse::InternalServerError().json(ApiResponse::err("Bookmark store unavailable"))
    })
}
