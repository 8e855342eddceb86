use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::{Arc, Mutex};

mod bookmarks;
mod config;
mod controllers;
mod db;
mod models;

use bookmarks::BookmarkStore;
use config::{Config, StorageBackend};
use db::{Database, MemorySlots, SlotStorage};

pub struct AppState {
    /// Single writer for the bookmark collection; every mutation holds the
    /// lock across its slot write.
    pub store: Arc<Mutex<BookmarkStore>>,
    pub config: Config,
    /// Server start time for uptime calculation
    pub started_at: std::time::Instant,
}

fn open_slots(config: &Config) -> std::io::Result<Arc<dyn SlotStorage>> {
    match config.storage {
        StorageBackend::Sqlite => {
            log::info!("Initializing database at {}", config.database_url);
            let db = Database::new(&config.database_url)
                .map_err(|e| std::io::Error::other(format!("Failed to initialize database: {}", e)))?;
            Ok(Arc::new(db))
        }
        StorageBackend::Memory => {
            log::warn!("Using in-memory bookmark storage; bookmarks will not survive a restart");
            Ok(Arc::new(MemorySlots::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Toolmark v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    let port = config.port;

    let slots = open_slots(&config)?;
    let store = BookmarkStore::open(slots, config.slot_key.clone())
        .map_err(|e| std::io::Error::other(format!("Failed to load bookmarks: {}", e)))?;
    if store.is_empty() {
        log::info!("[BOOKMARKS] No bookmarks saved under '{}' yet", store.slot_key());
    }
    let store = Arc::new(Mutex::new(store));
    let started_at = std::time::Instant::now();

    log::info!("Toolmark listening on http://0.0.0.0:{}", port);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(AppState {
                store: Arc::clone(&store),
                config: config.clone(),
                started_at,
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::bookmarks::config)
    })
    .bind(("0.0.0.0", port))?
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            log::warn!("Failed to listen for Ctrl+C");
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop).await.is_err() {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
