use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};

use super::session_store::sessions;

/// Middleware that requires valid JWT authentication and a live session
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Check Bearer prefix
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Validate token
    let claims = super::jwt::validate_token(token).map_err(|_| StatusCode::UNAUTHORIZED)?;

    // Сессия могла истечь или быть закрыта через logout
    let session = sessions()
        .get(&claims.sid)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Add claims and session to request extensions for use in handlers
    req.extensions_mut().insert(claims);
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
