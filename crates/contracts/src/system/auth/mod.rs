use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Код двухфакторной аутентификации, если включена
    #[serde(default)]
    pub twofactorauth: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Время истечения сессии, unix epoch в миллисекундах
    pub expires_at: i64,
    pub user: UserInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub api_type: Option<String>,
}

/// Профиль текущего пользователя
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub country: String,
    #[serde(default)]
    pub steps_required: Vec<String>,
    #[serde(default)]
    pub company: Option<CompanyInfo>,
}

impl UserInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user_id
    pub sid: String, // session id
    pub email: String,
    pub role: String,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}
