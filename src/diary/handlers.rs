use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::{
    diary::{
        extract::{DatePath, EntryPayload},
        models::{DiaryEntry, EntriesForDate},
    },
    error::{AppError, AppResult},
    AppState,
};

pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    EntryPayload(payload): EntryPayload,
) -> AppResult<(StatusCode, Json<DiaryEntry>)> {
    let entry = state.diary.create_entry(payload).await.map_err(|e| {
        if let AppError::Validation(reason) = &e {
            tracing::warn!(reason = %reason, "Diary entry rejected (400)");
        }
        e
    })?;

    tracing::info!(
        entry_id = entry.id,
        date     = %entry.date,
        "Created diary entry"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_for_date(
    State(state): State<Arc<AppState>>,
    DatePath(date): DatePath,
) -> AppResult<Json<EntriesForDate>> {
    let result = state.diary.get_for_date(date).await?;

    tracing::debug!(
        date    = %date,
        entries = result.entries.len(),
        total   = result.total_points,
        "Listed diary entries"
    );

    Ok(Json(result))
}
