//! Task CRUD endpoints

use crate::server::AppState;
use crate::server::error::ApiError;
use crate::store::{NewTask, TaskPatch};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

/// `GET /api/tasks`
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let tasks = state.db.list_tasks().await?;
    Ok(Json(json!({ "tasks": tasks })))
}

/// `POST /api/tasks`
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<NewTask>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Task title is required.".to_string()));
    }

    let task = state.db.create_task(payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "task": task }))))
}

/// `PATCH /api/tasks`
pub async fn update_task(
    State(state): State<AppState>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Value>, ApiError> {
    let task = state.db.update_task(patch).await?;
    Ok(Json(json!({ "task": task })))
}

/// Query parameters for task deletion
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    id: Option<i64>,
}

/// `DELETE /api/tasks?id=`
pub async fn delete_task(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<Value>, ApiError> {
    let id = params
        .id
        .ok_or_else(|| ApiError::BadRequest("Task id is required.".to_string()))?;

    if !state.db.delete_task(id).await? {
        return Err(ApiError::NotFound(format!("No task with id {}", id)));
    }

    Ok(Json(json!({ "success": true })))
}
