pub mod config;
pub mod database;
pub mod diary;
pub mod error;
pub mod logging;

pub use config::Config;
pub use database::{create_pool, run_migrations};
pub use error::{AppError, AppResult};
use axum::{Router, routing::{get, post}};
use diary::{DiaryService, EntryStore};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub diary: DiaryService,
}

impl AppState {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            diary: DiaryService::new(store),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let diary_routes = Router::new()
        .route("/diary/api", post(diary::handlers::create_entry))
        .route(
            "/diary/api/list/{year}/{month}/{day}",
            get(diary::handlers::list_for_date),
        );

    Router::new()
        .route("/", get(root))
        .merge(diary_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "Food Diary API - v0.1.0"
}
