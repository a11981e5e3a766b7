use axum::{
    extract::{Json, Path, Query},
    http::StatusCode,
};
use contracts::domain::a001_jewellery::{
    CreateJewelleryInput, FilteredRings, FilteredRingsRequest, Jewellery, JewelleryPage,
    UpdateJewelleryInput,
};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::sync::Arc;

use crate::shared::catalog::CatalogApiClient;
use crate::shared::graphql::GraphQlError;
use crate::system::auth::extractor::CurrentSession;

static CATALOG: Lazy<Arc<CatalogApiClient>> =
    Lazy::new(|| Arc::new(CatalogApiClient::from_config()));

const DEFAULT_PAGE_SIZE: u64 = 50;
const MAX_PAGE_SIZE: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct JewelleryListParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Ошибка каталога в HTTP-статус
fn upstream_status(context: &str, e: &GraphQlError) -> StatusCode {
    if e.is_unauthorized() {
        tracing::warn!("{}: catalog rejected token: {}", context, e);
        StatusCode::UNAUTHORIZED
    } else {
        tracing::error!("{}: {}", context, e);
        StatusCode::BAD_GATEWAY
    }
}

/// GET /api/jewellery
pub async fn list_paginated(
    CurrentSession(session): CurrentSession,
    Query(params): Query<JewelleryListParams>,
) -> Result<Json<JewelleryPage>, StatusCode> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0);

    match CATALOG
        .get_all_jewellery(&session.remote_token, None, limit, offset)
        .await
    {
        Ok(page) => Ok(Json(JewelleryPage::new(
            page.items,
            page.total_count,
            limit,
            offset,
        ))),
        Err(e) => Err(upstream_status("Failed to list jewellery", &e)),
    }
}

/// POST /api/jewellery/filtered
pub async fn list_filtered_rings(
    CurrentSession(session): CurrentSession,
    Json(request): Json<FilteredRingsRequest>,
) -> Result<Json<FilteredRings>, StatusCode> {
    CATALOG
        .get_filtered_rings(&session.remote_token, &request)
        .await
        .map(Json)
        .map_err(|e| upstream_status("Failed to load filtered rings", &e))
}

/// GET /api/jewellery/filter-options
pub async fn filter_options(
    CurrentSession(session): CurrentSession,
) -> Result<Json<serde_json::Value>, StatusCode> {
    CATALOG
        .get_all_ring_filter_options(&session.remote_token)
        .await
        .map(Json)
        .map_err(|e| upstream_status("Failed to load ring filter options", &e))
}

/// GET /api/jewellery/:id
pub async fn get_by_id(
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<Json<Jewellery>, StatusCode> {
    match CATALOG
        .get_one_jewellery(&session.remote_token, Some(&id), None)
        .await
    {
        Ok(Some(item)) => Ok(Json(item)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(upstream_status("Failed to get jewellery", &e)),
    }
}

/// GET /api/jewellery/by-sku/:sku
pub async fn get_by_sku(
    CurrentSession(session): CurrentSession,
    Path(sku): Path<String>,
) -> Result<Json<Jewellery>, StatusCode> {
    match CATALOG
        .get_one_jewellery(&session.remote_token, None, Some(&sku))
        .await
    {
        Ok(Some(item)) => Ok(Json(item)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(upstream_status("Failed to get jewellery by SKU", &e)),
    }
}

/// POST /api/jewellery
pub async fn create(
    CurrentSession(session): CurrentSession,
    Json(input): Json<CreateJewelleryInput>,
) -> Result<Json<Jewellery>, StatusCode> {
    if input.jewellery.sku.trim().is_empty() && input.jewellery.nivoda_stock_id.trim().is_empty()
    {
        return Err(StatusCode::BAD_REQUEST);
    }

    match CATALOG.create_jewellery(&session.remote_token, &input).await {
        Ok(item) => {
            tracing::info!("Jewellery {} created by {}", item.id, session.user.email);
            Ok(Json(item))
        }
        Err(e) => Err(upstream_status("Failed to create jewellery", &e)),
    }
}

/// PUT /api/jewellery
pub async fn update(
    CurrentSession(session): CurrentSession,
    Json(input): Json<UpdateJewelleryInput>,
) -> Result<Json<Jewellery>, StatusCode> {
    if input.jewellery.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
        return Err(StatusCode::BAD_REQUEST);
    }

    CATALOG
        .update_jewellery(&session.remote_token, &input)
        .await
        .map(Json)
        .map_err(|e| upstream_status("Failed to update jewellery", &e))
}

/// DELETE /api/jewellery/:id
pub async fn delete(
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    match CATALOG.delete_jewellery(&session.remote_token, &id).await {
        Ok(true) => {
            tracing::info!("Jewellery {} deleted by {}", id, session.user.email);
            Ok(StatusCode::OK)
        }
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(upstream_status("Failed to delete jewellery", &e)),
    }
}
