use axum::extract::{Json, Multipart, Path};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::system::auth::extractor::{CurrentSession, CurrentUser};
use crate::usecases;

// ============================================================================
// UseCase u501: Import from CSV
// ============================================================================

static CSV_IMPORT_EXECUTOR: Lazy<Arc<usecases::u501_import_from_csv::ImportExecutor>> =
    Lazy::new(|| {
        let tracker = Arc::new(usecases::u501_import_from_csv::ProgressTracker::new());
        Arc::new(usecases::u501_import_from_csv::ImportExecutor::new(tracker))
    });

const TEMPLATE_FILE_NAME: &str = "shopify-jewelry-template.csv";

/// POST /api/u501/import/start (multipart, поле `file`)
pub async fn u501_start_import(
    CurrentSession(session): CurrentSession,
    mut multipart: Multipart,
) -> Result<Json<contracts::usecases::u501_import_from_csv::ImportResponse>, StatusCode> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Malformed multipart upload: {}", e);
        StatusCode::BAD_REQUEST
    })? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("import.csv").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read uploaded file: {}", e);
            StatusCode::BAD_REQUEST
        })?;
        upload = Some((file_name, bytes.to_vec()));
    }

    let Some((file_name, bytes)) = upload else {
        return Err(StatusCode::BAD_REQUEST);
    };
    if bytes.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    Ok(Json(CSV_IMPORT_EXECUTOR.start_import(
        file_name,
        bytes,
        session.remote_token,
        session.user.id,
    )))
}

/// GET /api/u501/import/:session_id/progress
/// Чужая сессия отдаёт 404, как несуществующая
pub async fn u501_get_progress(
    CurrentUser(claims): CurrentUser,
    Path(session_id): Path<String>,
) -> Result<Json<contracts::usecases::u501_import_from_csv::ImportProgress>, StatusCode> {
    match CSV_IMPORT_EXECUTOR.get_progress(&session_id, &claims.sub) {
        Some(progress) => Ok(Json(progress)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// GET /api/u501/import/template
pub async fn u501_download_template() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", TEMPLATE_FILE_NAME),
            ),
        ],
        contracts::domain::a001_jewellery::CSV_TEMPLATE,
    )
}
