use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::{LoginRequest, LoginResponse, UserInfo};
use once_cell::sync::Lazy;

use crate::system::auth::auth_api_client::AuthApiClient;
use crate::system::auth::extractor::{CurrentSession, CurrentUser};
use crate::system::auth::session_store::sessions;
use crate::system::auth::{self, AuthError};

static AUTH_CLIENT: Lazy<AuthApiClient> = Lazy::new(AuthApiClient::from_config);

/// Login handler
pub async fn login(Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, StatusCode> {
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    match auth::login(&AUTH_CLIENT, sessions(), &request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::warn!("Login failed for {}: {}", request.username, e);
            Err(match e {
                AuthError::InvalidCredentials(_) | AuthError::SessionExpired => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::Upstream(_) => StatusCode::BAD_GATEWAY,
                AuthError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            })
        }
    }
}

/// Logout handler (protected by middleware)
pub async fn logout(CurrentUser(claims): CurrentUser) -> StatusCode {
    if sessions().remove(&claims.sid).is_some() {
        tracing::info!("User {} logged out, session {}", claims.email, claims.sid);
    }
    StatusCode::OK
}

/// Get current user handler (protected by middleware)
pub async fn current_user(CurrentSession(session): CurrentSession) -> Json<UserInfo> {
    Json(session.user)
}
