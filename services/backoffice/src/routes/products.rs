//! Product catalog routes

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::error::ApiError;
use crate::models::{Product, ProductPayload};
use crate::state::AppState;

/// Get all products
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products = state.products.find_all().await?;
    Ok(Json(products))
}

/// Create a new product
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let product = Product::new(payload);
    state.products.insert(&product).await?;
    Ok(Json(product))
}

/// Replace a product
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .products
        .update(&id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Продукт не найден".to_string()))?;
    Ok(Json(product))
}

/// Delete a product
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.products.delete(&id).await? {
        return Err(ApiError::NotFound("Продукт не найден".to_string()));
    }
    Ok(Json(json!({"message": "Продукт удалён"})))
}
