//! Price calculation routes

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::error::ApiError;
use crate::models::{Calculation, CalculationMetaUpdate, CalculationPayload};
use crate::state::AppState;

fn not_found() -> ApiError {
    ApiError::NotFound("Розрахунок не знайдено".to_string())
}

/// Get all calculations
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let calculations = state.calculations.find_all().await?;
    Ok(Json(calculations))
}

/// Create a new calculation
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CalculationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let calculation = Calculation::new(payload);
    state.calculations.insert(&calculation).await?;
    Ok(Json(calculation))
}

/// Get a calculation by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let calculation = state
        .calculations
        .find_by_id(&id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(calculation))
}

/// Flip whether a calculation counts toward the revenue totals
pub async fn toggle_total(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let included = state
        .calculations
        .toggle_included(&id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(json!({"include_in_total": included})))
}

/// Update the order metadata on a calculation
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<CalculationMetaUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let calculation = state
        .calculations
        .update_meta(&id, &update)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(calculation))
}

/// Delete a calculation
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.calculations.delete(&id).await? {
        return Err(not_found());
    }
    Ok(Json(json!({"message": "Розрахунок видалено"})))
}
