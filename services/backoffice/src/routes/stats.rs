//! Dashboard statistics route

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

/// Dashboard overview: entity counts, revenue of included calculations,
/// and the five most recent of them
pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products_count = state.products.count().await?;
    let documents_count = state.documents.count().await?;
    let calculations_count = state.calculations.count_included().await?;
    let total_revenue = state.calculations.total_revenue().await?;
    let recent_calculations = state.calculations.recent_included(5).await?;

    Ok(Json(json!({
        "products_count": products_count,
        "calculations_count": calculations_count,
        "documents_count": documents_count,
        "total_revenue": total_revenue,
        "recent_calculations": recent_calculations
    })))
}
