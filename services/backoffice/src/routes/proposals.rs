//! Commercial proposal (KP) routes

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::models::{Kp, KpPayload};
use crate::proposals::StatusError;
use crate::state::AppState;

fn not_found() -> ApiError {
    ApiError::NotFound("КП не знайдено".to_string())
}

fn map_status_error(err: StatusError) -> ApiError {
    match err {
        StatusError::InvalidStatus(_) => ApiError::BadRequest(
            "Невірний статус. Дозволені: draft, sent, paid, cancelled".to_string(),
        ),
        StatusError::NotFound => not_found(),
        StatusError::Store(err) => ApiError::Store(err),
    }
}

/// Get all commercial proposals
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let proposals = state.proposals.find_all().await?;
    Ok(Json(proposals))
}

/// Get a single proposal by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let kp = state
        .proposals
        .find_by_id(&id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(kp))
}

/// Create a new commercial proposal
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<KpPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let kp = Kp::new(payload);
    state.proposals.insert(&kp).await?;
    Ok(Json(json!({"id": kp.id, "message": "КП створено"})))
}

/// Replace a proposal's business fields; status and history stay put
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<KpPayload>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.proposals.update_fields(&id, &payload).await? {
        return Err(not_found());
    }
    Ok(Json(json!({"id": id, "message": "КП оновлено"})))
}

/// Delete a proposal
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.proposals.delete(&id).await? {
        return Err(not_found());
    }
    Ok(Json(json!({"message": "КП видалено"})))
}

/// Status transition request
#[derive(Deserialize)]
pub struct KpStatusUpdate {
    pub status: String,
}

/// Move a proposal to a new status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<KpStatusUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .lifecycle
        .set_status(&id, &update.status)
        .await
        .map_err(map_status_error)?;

    Ok(Json(json!({
        "id": outcome.id,
        "status": outcome.status,
        "status_label": outcome.label,
        "message": "Статус оновлено"
    })))
}

/// Funnel statistics over all proposals
pub async fn funnel(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let report = state.lifecycle.funnel().await.map_err(map_status_error)?;
    Ok(Json(report))
}
