//! Back-office service routes

use axum::{
    middleware,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use serde_json::json;

use crate::middleware::auth_middleware;
use crate::state::AppState;

pub mod auth;
pub mod calculations;
pub mod documents;
pub mod instructions;
pub mod products;
pub mod proposals;
pub mod settings;
pub mod stats;

/// Create the router for the back-office service.
///
/// Everything business-facing sits behind the session gate; the login
/// exchange, logout, the banner and the health check stay open.
pub fn create_router(state: AppState) -> Router {
    let open_routes = Router::new()
        .route("/", get(root))
        .route("/auth/session", post(auth::create_session))
        .route("/auth/logout", post(auth::logout));

    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            put(products::update).delete(products::delete),
        )
        .route(
            "/calculations",
            get(calculations::list).post(calculations::create),
        )
        .route(
            "/calculations/:id",
            get(calculations::get)
                .patch(calculations::update)
                .delete(calculations::delete),
        )
        .route(
            "/calculations/:id/toggle-total",
            patch(calculations::toggle_total),
        )
        .route("/documents", get(documents::list).post(documents::create))
        .route("/documents/:id", delete(documents::delete))
        .route(
            "/instructions",
            get(instructions::list).post(instructions::create),
        )
        .route(
            "/instructions/:id",
            put(instructions::update).delete(instructions::delete),
        )
        .route("/kp", get(proposals::list).post(proposals::create))
        .route("/kp/stats/funnel", get(proposals::funnel))
        .route(
            "/kp/:id",
            get(proposals::get)
                .put(proposals::update)
                .delete(proposals::delete),
        )
        .route("/kp/:id/status", patch(proposals::set_status))
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route(
            "/calculator-prices",
            get(settings::get_calculator_prices).put(settings::update_calculator_prices),
        )
        .route("/stats", get(stats::dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", open_routes.merge(protected_routes))
        .with_state(state)
}

/// Service banner
pub async fn root() -> impl IntoResponse {
    Json(json!({"message": "PoliBest 911 API"}))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "backoffice"
    }))
}
