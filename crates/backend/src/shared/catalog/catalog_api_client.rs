use contracts::domain::a001_jewellery::{
    CreateJewelleryInput, FilteredRings, FilteredRingsRequest, Jewellery, PaginatedJewellery,
    UpdateJewelleryInput,
};
use serde::Deserialize;
use serde_json::json;

use super::queries;
use crate::shared::graphql::{post_graphql, GraphQlError};

/// HTTP-клиент удалённого GraphQL API каталога
pub struct CatalogApiClient {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Deserialize)]
struct CreateJewelleryData {
    #[serde(rename = "createJewellery")]
    create_jewellery: Jewellery,
}

#[derive(Deserialize)]
struct UpdateJewelleryData {
    #[serde(rename = "updateJewellery")]
    update_jewellery: Jewellery,
}

#[derive(Deserialize)]
struct DeleteJewelleryData {
    #[serde(rename = "deleteJewellery")]
    delete_jewellery: serde_json::Value,
}

#[derive(Deserialize)]
struct GetAllJewelleryData {
    #[serde(rename = "getAllJewellery")]
    get_all_jewellery: PaginatedJewellery,
}

#[derive(Deserialize)]
struct GetFilteredRingsData {
    #[serde(rename = "getFilteredRings")]
    get_filtered_rings: FilteredRings,
}

#[derive(Deserialize)]
struct OneJewelleryData {
    #[serde(rename = "oneJewellery")]
    one_jewellery: Option<Jewellery>,
}

#[derive(Deserialize)]
struct RingFilterOptionsData {
    #[serde(rename = "getAllRingFilterOptions")]
    get_all_ring_filter_options: serde_json::Value,
}

impl CatalogApiClient {
    pub fn new(api_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            api_url: api_url.into(),
        }
    }

    /// Клиент по текущей конфигурации
    pub fn from_config() -> Self {
        let config = crate::shared::config::get_config();
        Self::new(
            config.catalog.api_url.clone(),
            config.catalog.request_timeout_secs,
        )
    }

    /// Мутация createJewellery
    pub async fn create_jewellery(
        &self,
        token: &str,
        input: &CreateJewelleryInput,
    ) -> Result<Jewellery, GraphQlError> {
        let data: CreateJewelleryData = post_graphql(
            &self.client,
            &self.api_url,
            Some(token),
            &[],
            &queries::create_jewellery(),
            json!({ "data": input }),
        )
        .await?;
        Ok(data.create_jewellery)
    }

    /// Мутация updateJewellery
    pub async fn update_jewellery(
        &self,
        token: &str,
        input: &UpdateJewelleryInput,
    ) -> Result<Jewellery, GraphQlError> {
        let data: UpdateJewelleryData = post_graphql(
            &self.client,
            &self.api_url,
            Some(token),
            &[],
            &queries::update_jewellery(),
            json!({ "data": input }),
        )
        .await?;
        Ok(data.update_jewellery)
    }

    /// Мутация deleteJewellery; true если каталог подтвердил удаление
    pub async fn delete_jewellery(&self, token: &str, id: &str) -> Result<bool, GraphQlError> {
        let data: DeleteJewelleryData = post_graphql(
            &self.client,
            &self.api_url,
            Some(token),
            &[],
            queries::DELETE_JEWELLERY,
            json!({ "id": id }),
        )
        .await?;
        Ok(!matches!(
            data.delete_jewellery,
            serde_json::Value::Bool(false) | serde_json::Value::Null
        ))
    }

    /// Список изделий с пагинацией
    pub async fn get_all_jewellery(
        &self,
        token: &str,
        ids: Option<&[String]>,
        limit: u64,
        offset: u64,
    ) -> Result<PaginatedJewellery, GraphQlError> {
        let data: GetAllJewelleryData = post_graphql(
            &self.client,
            &self.api_url,
            Some(token),
            &[],
            &queries::get_all_jewellery(),
            json!({ "ids": ids, "limit": limit, "offset": offset }),
        )
        .await?;
        Ok(data.get_all_jewellery)
    }

    /// Кольца с фильтрами; параметры фильтра передаются без изменений
    pub async fn get_filtered_rings(
        &self,
        token: &str,
        request: &FilteredRingsRequest,
    ) -> Result<FilteredRings, GraphQlError> {
        let data: GetFilteredRingsData = post_graphql(
            &self.client,
            &self.api_url,
            Some(token),
            &[],
            &queries::get_filtered_rings(),
            request,
        )
        .await?;
        Ok(data.get_filtered_rings)
    }

    /// Одно изделие по id или sku
    pub async fn get_one_jewellery(
        &self,
        token: &str,
        id: Option<&str>,
        sku: Option<&str>,
    ) -> Result<Option<Jewellery>, GraphQlError> {
        let data: OneJewelleryData = post_graphql(
            &self.client,
            &self.api_url,
            Some(token),
            &[],
            &queries::get_one_jewellery(),
            json!({ "id": id, "sku": sku }),
        )
        .await?;
        Ok(data.one_jewellery)
    }

    pub async fn get_all_ring_filter_options(
        &self,
        token: &str,
    ) -> Result<serde_json::Value, GraphQlError> {
        let data: RingFilterOptionsData = post_graphql(
            &self.client,
            &self.api_url,
            Some(token),
            &[],
            &queries::get_all_ring_filter_options(),
            json!({}),
        )
        .await?;
        Ok(data.get_all_ring_filter_options)
    }
}
