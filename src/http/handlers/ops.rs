use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "message": "payment webhook receiver is running",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
