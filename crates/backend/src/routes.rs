use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::{api::handlers, system};

/// Максимальный размер загружаемого CSV
const UPLOAD_LIMIT_BYTES: usize = 20 * 1024 * 1024;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // A001 JEWELLERY (catalog proxy)
        // ========================================
        .route(
            "/api/jewellery",
            get(handlers::a001_jewellery::list_paginated)
                .post(handlers::a001_jewellery::create)
                .put(handlers::a001_jewellery::update)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/jewellery/filtered",
            post(handlers::a001_jewellery::list_filtered_rings)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/jewellery/filter-options",
            get(handlers::a001_jewellery::filter_options)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/jewellery/by-sku/:sku",
            get(handlers::a001_jewellery::get_by_sku)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/jewellery/:id",
            get(handlers::a001_jewellery::get_by_id)
                .delete(handlers::a001_jewellery::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // U501 IMPORT FROM CSV
        // ========================================
        .route(
            "/api/u501/import/start",
            post(handlers::usecases::u501_start_import)
                .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES))
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/u501/import/:session_id/progress",
            get(handlers::usecases::u501_get_progress)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/u501/import/template",
            get(handlers::usecases::u501_download_template),
        )
}
