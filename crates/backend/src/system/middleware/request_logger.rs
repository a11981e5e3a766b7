use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::format_number;

/// Middleware для логирования HTTP запросов: метод, путь, статус, размер ответа, длительность.
/// Ответы 4xx/5xx пишутся уровнем warn.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                "{} {} -> {} | body error: {} | {}ms",
                method,
                path,
                parts.status.as_u16(),
                e,
                start.elapsed().as_millis()
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let status = parts.status.as_u16();
    let size = format_number(bytes.len());
    let elapsed = start.elapsed().as_millis();

    if parts.status.is_client_error() || parts.status.is_server_error() {
        tracing::warn!("{} {} -> {} | {} bytes | {}ms", method, path, status, size, elapsed);
    } else {
        tracing::info!("{} {} -> {} | {} bytes | {}ms", method, path, status, size, elapsed);
    }

    Response::from_parts(parts, Body::from(bytes))
}
