use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Datelike, NaiveDate};
use diet_diary::{
    create_router,
    diary::{MemoryEntryStore, PgEntryStore},
    run_migrations, AppState,
};
use http_body_util::BodyExt;
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tower::ServiceExt;

#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn post_json<T: Serialize>(&self, uri: &str, body: &T) -> (StatusCode, serde_json::Value) {
        self.post_raw(uri, serde_json::to_string(body).unwrap()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .method("POST")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        read_json(response).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .method("GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        read_json(response).await
    }
}

async fn read_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

#[allow(dead_code)]
pub fn list_uri(date: NaiveDate) -> String {
    format!(
        "/diary/api/list/{}/{}/{}",
        date.year(),
        date.month(),
        date.day()
    )
}

/// App backed by a fresh in-memory store; nothing is shared between tests.
#[allow(dead_code)]
pub fn spawn_app() -> TestApp {
    let state = Arc::new(AppState::new(Arc::new(MemoryEntryStore::new())));
    let router = create_router(state.clone());
    TestApp { router, state }
}

/// App backed by Postgres, emptied before use. Errors when no database is
/// configured so callers can skip.
#[allow(dead_code)]
pub async fn setup_pg_app() -> Result<TestApp, String> {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| "TEST_DATABASE_URL or DATABASE_URL must be set for integration tests".to_string())?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await
        .map_err(|e| format!("Failed to connect to database: {e}"))?;

    run_migrations(&pool)
        .await
        .map_err(|e| format!("Failed to run migrations: {e}"))?;

    let state = Arc::new(AppState::new(Arc::new(PgEntryStore::new(pool))));
    state
        .diary
        .store()
        .delete_all()
        .await
        .map_err(|e| format!("Failed to reset diary_entries: {e}"))?;

    let router = create_router(state.clone());
    Ok(TestApp { router, state })
}
