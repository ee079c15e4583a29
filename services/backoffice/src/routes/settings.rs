//! Settings and calculator-price routes

use axum::{extract::State, response::IntoResponse, Json};

use crate::error::ApiError;
use crate::models::{CalculatorPricesUpdate, SettingsUpdate};
use crate::state::AppState;

/// Get the settings document, creating defaults on first read
pub async fn get_settings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let settings = state.settings.settings().await?;
    Ok(Json(settings))
}

/// Apply a partial settings update
pub async fn update_settings(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = state.settings.update_settings(&update).await?;
    Ok(Json(settings))
}

/// Get the calculator prices, creating defaults on first read
pub async fn get_calculator_prices(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let prices = state.settings.calculator_prices().await?;
    Ok(Json(prices))
}

/// Apply a partial calculator-price update
pub async fn update_calculator_prices(
    State(state): State<AppState>,
    Json(update): Json<CalculatorPricesUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let prices = state.settings.update_calculator_prices(&update).await?;
    Ok(Json(prices))
}
