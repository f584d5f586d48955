use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::state::AppState,
    domain::Room,
    error::{AppError, Result},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Room>>> {
    let rooms = state.service_context.room_repo.list().await?;
    Ok(Json(rooms))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Room>> {
    let room = state
        .service_context
        .room_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

    Ok(Json(room))
}
