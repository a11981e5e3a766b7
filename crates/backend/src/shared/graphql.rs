use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Ошибки обращения к удалённому GraphQL API
#[derive(Debug, Error)]
pub enum GraphQlError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Response contains no data")]
    EmptyData,
}

impl GraphQlError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GraphQlError::Http { status: 401 | 403, .. })
    }
}

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorItem>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorItem {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Ошибки в ответе важнее данных: частичный ответ считается ошибкой
    pub fn into_result(self) -> Result<T, GraphQlError> {
        if !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(GraphQlError::GraphQl(messages.join("; ")));
        }
        self.data.ok_or(GraphQlError::EmptyData)
    }
}

/// POST GraphQL-запроса; `bearer` добавляется в Authorization, `extra_headers` как есть
pub async fn post_graphql<V, T>(
    client: &reqwest::Client,
    url: &str,
    bearer: Option<&str>,
    extra_headers: &[(&str, &str)],
    query: &str,
    variables: V,
) -> Result<T, GraphQlError>
where
    V: Serialize,
    T: DeserializeOwned,
{
    let mut request = client
        .post(url)
        .header("Accept", "application/json")
        .json(&GraphQlRequest { query, variables });

    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }
    for (name, value) in extra_headers {
        request = request.header(*name, *value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| GraphQlError::Network(format!("{}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GraphQlError::Http {
            status: status.as_u16(),
            body,
        });
    }

    let envelope: GraphQlResponse<T> = response
        .json()
        .await
        .map_err(|e| GraphQlError::Decode(e.to_string()))?;

    envelope.into_result()
}
