use async_trait::async_trait;
use contracts::domain::a001_jewellery::CreateJewelleryInput;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::shared::catalog::CatalogApiClient;
use crate::shared::graphql::GraphQlError;

/// Каталог отклонил запрос или не ответил
#[derive(Debug, Error)]
pub enum RemoteSubmissionError {
    #[error(transparent)]
    Catalog(#[from] GraphQlError),

    #[error("submission timed out after {0:?}")]
    Timeout(Duration),
}

/// Отправка одного нормализованного запроса в каталог.
/// Вызывается конкурентно из нескольких задач.
#[async_trait]
pub trait ItemSubmitter: Send + Sync {
    /// Возвращает id созданного изделия
    async fn submit(&self, input: &CreateJewelleryInput) -> Result<String, RemoteSubmissionError>;
}

/// Отправка через мутацию createJewellery от имени пользователя
pub struct CatalogSubmitter {
    client: Arc<CatalogApiClient>,
    token: String,
}

impl CatalogSubmitter {
    pub fn new(client: Arc<CatalogApiClient>, token: String) -> Self {
        Self { client, token }
    }
}

#[async_trait]
impl ItemSubmitter for CatalogSubmitter {
    async fn submit(&self, input: &CreateJewelleryInput) -> Result<String, RemoteSubmissionError> {
        let created = self.client.create_jewellery(&self.token, input).await?;
        Ok(created.id)
    }
}
