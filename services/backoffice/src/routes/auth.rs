//! Authentication routes

use axum::{
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::auth::{AuthError, IdentityError};
use crate::error::ApiError;
use crate::middleware::{token_from_request, SESSION_COOKIE};
use crate::models::User;
use crate::state::AppState;

/// Request carrying the opaque id from the OAuth frontend
#[derive(Deserialize)]
pub struct SessionData {
    pub session_id: String,
}

/// Login response: the user plus the bearer token for client storage
#[derive(Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: User,
    pub session_token: String,
}

/// Exchange the external session id for a session token
pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<SessionData>,
) -> Result<impl IntoResponse, ApiError> {
    match state.authenticator.create_session(&payload.session_id).await {
        Ok(issued) => Ok(Json(LoginResponse {
            user: issued.user,
            session_token: issued.session_token,
        })),
        Err(AuthError::AccessDenied { email }) => Err(ApiError::AccessDenied { email }),
        Err(AuthError::Upstream(IdentityError::Rejected(status))) => {
            error!("Identity provider rejected session: {}", status);
            Err(ApiError::InvalidSession)
        }
        Err(err) => {
            error!("Auth error: {}", err);
            Err(ApiError::AuthenticationFailed)
        }
    }
}

/// Current user data
pub async fn me(Extension(user): Extension<User>) -> impl IntoResponse {
    Json(user)
}

/// Drop the session and tell the client to clear its cookie.
///
/// Deliberately not behind the auth gate: an expired or unknown token must
/// still log out cleanly.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = token_from_request(&jar, &headers) {
        state.authenticator.logout(&token).await?;
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"));

    Ok((jar, Json(json!({"message": "Logged out"}))))
}
