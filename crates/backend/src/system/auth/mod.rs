pub mod auth_api_client;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod session_store;

use contracts::system::auth::{LoginRequest, LoginResponse};
use thiserror::Error;

use crate::shared::graphql::GraphQlError;
use auth_api_client::AuthApiClient;
use session_store::{Session, SessionStore};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("authentication service unavailable: {0}")]
    Upstream(GraphQlError),

    #[error("session already expired")]
    SessionExpired,

    #[error("failed to issue access token: {0}")]
    Token(String),
}

impl From<GraphQlError> for AuthError {
    fn from(e: GraphQlError) -> Self {
        match e {
            // Неверный логин/пароль сервис возвращает ошибкой GraphQL
            GraphQlError::GraphQl(message) => AuthError::InvalidCredentials(message),
            GraphQlError::EmptyData => AuthError::InvalidCredentials(e.to_string()),
            GraphQlError::Http { .. } if e.is_unauthorized() => {
                AuthError::InvalidCredentials(e.to_string())
            }
            other => AuthError::Upstream(other),
        }
    }
}

/// Вход: удалённая аутентификация, новая сессия, локальный JWT
pub async fn login(
    client: &AuthApiClient,
    store: &SessionStore,
    request: &LoginRequest,
) -> Result<LoginResponse, AuthError> {
    let remote = client
        .authenticate(
            &request.username,
            &request.password,
            request.twofactorauth.as_deref(),
        )
        .await?;

    let session = Session::from_remote(remote);
    if session.is_expired_at(chrono::Utc::now().timestamp_millis()) {
        return Err(AuthError::SessionExpired);
    }

    let access_token =
        jwt::generate_access_token(&session).map_err(|e| AuthError::Token(e.to_string()))?;

    tracing::info!("User {} logged in, session {}", session.user.email, session.id);

    let response = LoginResponse {
        access_token,
        expires_at: session.expires_at_ms,
        user: session.user.clone(),
    };
    store.purge_expired();
    store.insert(session);

    Ok(response)
}
