use crate::domain::payment::ErrorEnvelope;
use axum::extract::rejection::BytesRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("method {0} is not allowed, use POST")]
    MethodNotAllowed(String),

    #[error("{0}")]
    MalformedRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("webhook signature does not match payload")]
    SignatureInvalid,

    #[error("payment id not found in webhook payload")]
    PaymentIdMissing,

    #[error("{message}")]
    ProviderVerificationFailed {
        payment_id: String,
        provider_status: Option<u16>,
        message: String,
    },

    #[error("{message}")]
    ProcessingFailed {
        payment_id: String,
        message: String,
        verification: serde_json::Value,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebhookError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            WebhookError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            WebhookError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            WebhookError::SignatureInvalid => StatusCode::UNAUTHORIZED,
            WebhookError::PaymentIdMissing => StatusCode::BAD_REQUEST,
            WebhookError::ProviderVerificationFailed { .. } => StatusCode::BAD_REQUEST,
            WebhookError::ProcessingFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            WebhookError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WebhookError::MethodNotAllowed(_) => "Method not allowed",
            WebhookError::MalformedRequest(_) => "Malformed request",
            WebhookError::PayloadTooLarge(_) => "Payload too large",
            WebhookError::SignatureInvalid => "Invalid signature",
            WebhookError::PaymentIdMissing => "Invalid payment data",
            WebhookError::ProviderVerificationFailed { .. } => "Payment verification failed",
            WebhookError::ProcessingFailed { .. } => "Processing failed",
            WebhookError::Internal(_) => "Internal server error",
        }
    }

    /// Renders the error envelope. The internal error chain is only included
    /// when `expose_details` is set.
    pub fn to_envelope(&self, expose_details: bool) -> ErrorEnvelope {
        let (payment_id, details) = match self {
            WebhookError::ProviderVerificationFailed {
                payment_id,
                provider_status,
                message,
            } => (
                Some(payment_id.clone()),
                Some(json!({
                    "providerStatus": provider_status,
                    "providerMessage": message,
                })),
            ),
            WebhookError::ProcessingFailed {
                payment_id,
                verification,
                ..
            } => (
                Some(payment_id.clone()),
                Some(json!({ "verification": verification })),
            ),
            WebhookError::Internal(e) if expose_details => {
                let chain: Vec<String> = e.chain().map(ToString::to_string).collect();
                (None, Some(json!({ "trace": chain })))
            }
            _ => (None, None),
        };

        ErrorEnvelope {
            success: false,
            error: self.label().to_string(),
            message: self.to_string(),
            payment_id,
            details,
        }
    }

    pub fn into_response_with(self, expose_details: bool) -> Response {
        let envelope = self.to_envelope(expose_details);
        let mut response = (self.status(), Json(envelope)).into_response();
        if matches!(self, WebhookError::MethodNotAllowed(_)) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}

impl From<BytesRejection> for WebhookError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            WebhookError::PayloadTooLarge(rejection.body_text())
        } else {
            WebhookError::MalformedRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}
