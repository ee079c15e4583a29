//! Instruction routes

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::error::ApiError;
use crate::models::{Instruction, InstructionPayload};
use crate::state::AppState;

fn not_found() -> ApiError {
    ApiError::NotFound("Инструкция не найдена".to_string())
}

/// Get all instructions
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let instructions = state.instructions.find_all().await?;
    Ok(Json(instructions))
}

/// Create a new instruction
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<InstructionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let instruction = Instruction::new(payload);
    state.instructions.insert(&instruction).await?;
    Ok(Json(instruction))
}

/// Replace an instruction
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<InstructionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let instruction = state
        .instructions
        .update(&id, &payload)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(instruction))
}

/// Delete an instruction
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.instructions.delete(&id).await? {
        return Err(not_found());
    }
    Ok(Json(json!({"message": "Инструкция удалена"})))
}
