use crate::error::WebhookError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

pub async fn verify_payment(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    // Method wins over any body rejection.
    if method != Method::POST {
        return reject(&state, WebhookError::MethodNotAllowed(method.to_string()));
    }
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return reject(&state, WebhookError::from(rejection)),
    };

    let service = &state.webhook_service;
    match service.process(&method, &headers, &body).await {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(e) => reject(&state, e),
    }
}

fn reject(state: &AppState, e: WebhookError) -> Response {
    let status = e.status();
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), error = %e, "webhook processing failed");
    } else {
        tracing::warn!(status = status.as_u16(), error = %e, "webhook rejected");
    }
    e.into_response_with(state.expose_error_details)
}
