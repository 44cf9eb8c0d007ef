//! History Handlers

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use std::sync::Arc;

use crate::application::{GetHistoryEntry, HistoryEntry, ListHistory};
use crate::domain::audio::AudioName;
use crate::infrastructure::http::dto::{HistoryEntryDto, HistoryQuery, HistoryResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

fn to_dto(state: &AppState, entry: HistoryEntry) -> HistoryEntryDto {
    // 旧库中可能残留非法文件名，不为其生成 URL
    let audio_url = entry
        .audio_file
        .as_deref()
        .and_then(|file| AudioName::parse(file).ok())
        .map(|name| state.audio_url(name.as_str()));
    HistoryEntryDto::from_entry(entry, audio_url)
}

/// GET /history[?limit=N]
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let entries = state
        .list_history_handler
        .handle(ListHistory { limit: query.limit })
        .await?;

    let history = entries
        .into_iter()
        .map(|entry| to_dto(&state, entry))
        .collect();

    Ok(Json(HistoryResponse { history }))
}

/// GET /history/:id
pub async fn get_history_entry(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<HistoryEntryDto>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let entry = state
        .get_history_entry_handler
        .handle(GetHistoryEntry { id })
        .await?;

    Ok(Json(to_dto(&state, entry)))
}
