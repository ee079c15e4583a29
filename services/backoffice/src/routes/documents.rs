//! Generated document routes

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::error::ApiError;
use crate::models::{Document, DocumentPayload};
use crate::state::AppState;

/// Get all documents
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let documents = state.documents.find_all().await?;
    Ok(Json(documents))
}

/// Create a new document
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<DocumentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let document = Document::new(payload);
    state.documents.insert(&document).await?;
    Ok(Json(document))
}

/// Delete a document
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.documents.delete(&id).await? {
        return Err(ApiError::NotFound("Документ не найден".to_string()));
    }
    Ok(Json(json!({"message": "Документ удалён"})))
}
