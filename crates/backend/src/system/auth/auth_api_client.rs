use contracts::system::auth::{CompanyInfo, UserInfo};
use serde::{Deserialize, Deserializer};
use serde_json::json;

use crate::shared::graphql::{post_graphql, GraphQlError};

const CLIENT_NAME_HEADER: (&str, &str) = ("apollographql-client-name", "@nivoda/public-gateway");
const CLIENT_VERSION_HEADER: (&str, &str) = ("apollographql-client-version", "0.0.1");

const AUTHENTICATE_USER: &str = r#"
query authenticateUser($username: String!, $password: String!, $twofactorauth: String) {
  authenticate {
    username_and_password(
      username: $username
      password: $password
      twofactorauth: $twofactorauth
    ) {
      token
      expires
      user {
        id
        firstName
        lastName
        country
        email
        role
        steps_required
        company {
          id
          name
          api_type
        }
      }
    }
  }
}
"#;

/// Сессия, выданная сервисом аутентификации
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSession {
    pub token: String,
    /// unix epoch, миллисекунды; None или 0 - срок не указан
    #[serde(default)]
    pub expires: Option<i64>,
    pub user: RemoteUser,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, rename = "steps_required")]
    pub steps_required: Option<Vec<String>>,
    #[serde(default)]
    pub company: Option<RemoteCompany>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCompany {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub api_type: Option<String>,
}

/// Gateway отдаёт null вместо пустых строк
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<RemoteUser> for UserInfo {
    fn from(user: RemoteUser) -> Self {
        UserInfo {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            country: user.country,
            steps_required: user.steps_required.unwrap_or_default(),
            company: user.company.map(|c| CompanyInfo {
                id: c.id,
                name: c.name,
                api_type: c.api_type,
            }),
        }
    }
}

#[derive(Deserialize)]
struct AuthenticateData {
    authenticate: AuthenticatePayload,
}

#[derive(Deserialize)]
struct AuthenticatePayload {
    username_and_password: RemoteSession,
}

/// Клиент сервиса аутентификации (public gateway)
pub struct AuthApiClient {
    client: reqwest::Client,
    api_url: String,
}

impl AuthApiClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            api_url: api_url.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(crate::shared::config::get_config().auth.api_url.clone())
    }

    /// Вход по логину и паролю
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        twofactorauth: Option<&str>,
    ) -> Result<RemoteSession, GraphQlError> {
        let data: AuthenticateData = post_graphql(
            &self.client,
            &self.api_url,
            None,
            &[CLIENT_NAME_HEADER, CLIENT_VERSION_HEADER],
            AUTHENTICATE_USER,
            json!({
                "username": username,
                "password": password,
                "twofactorauth": twofactorauth,
            }),
        )
        .await?;

        Ok(data.authenticate.username_and_password)
    }
}
