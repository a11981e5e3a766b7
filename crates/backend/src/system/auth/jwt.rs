use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use rand::Rng;

use super::session_store::Session;

pub(crate) const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Секрет из конфигурации либо случайный на время жизни процесса
static JWT_SECRET: Lazy<String> = Lazy::new(|| {
    match crate::shared::config::get_config().auth.jwt_secret.clone() {
        Some(secret) => secret,
        None => {
            tracing::info!("auth.jwt_secret is not set, generating a random secret");
            generate_jwt_secret()
        }
    }
});

/// Generate JWT access token; never outlives the remote session
pub fn generate_access_token(session: &Session) -> Result<String> {
    let now = Utc::now();
    let lifetime_exp = (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp();
    let session_exp = session.expires_at_ms / 1000;

    let claims = TokenClaims {
        sub: session.user.id.clone(),
        sid: session.id.clone(),
        email: session.user.email.clone(),
        role: session.user.role.clone(),
        exp: lifetime_exp.min(session_exp).max(0) as usize,
        iat: now.timestamp() as usize,
    };

    encode_claims(&claims, &JWT_SECRET)
}

/// Validate JWT token and extract claims
pub fn validate_token(token: &str) -> Result<TokenClaims> {
    decode_claims(token, &JWT_SECRET)
}

fn encode_claims(claims: &TokenClaims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

fn decode_claims(token: &str, secret: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}
