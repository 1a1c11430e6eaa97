use crate::error::WebhookError;
use serde::Serialize;
use serde_json::Value;

pub mod http;
pub mod mock;

/// Provider payment statuses that count as settled. Compared case-insensitively.
pub const ACCEPTED_STATUSES: &[&str] = &["succeeded", "completed", "paid", "processed"];

const STATUS_PATHS: &[&[&str]] = &[
    &["data", "status"],
    &["data", "state"],
    &["data", "payment_status"],
    &["status"],
    &["state"],
    &["payment_status"],
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderVerification {
    pub verified: bool,
    pub skipped: bool,
    pub status: String,
}

impl ProviderVerification {
    pub fn skipped() -> Self {
        Self {
            verified: true,
            skipped: true,
            status: "skipped".to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait PaymentVerifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn verify(&self, payment_id: &str) -> Result<ProviderVerification, WebhookError>;
}

pub fn is_accepted_status(status: &str) -> bool {
    let status = status.trim();
    ACCEPTED_STATUSES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(status))
}

/// Reads the status-like field from a provider lookup response.
pub fn status_from_body(body: &Value) -> Option<String> {
    STATUS_PATHS.iter().find_map(|path| {
        let mut current = body;
        for key in *path {
            current = current.get(*key)?;
        }
        current.as_str().map(str::to_string)
    })
}

/// Applies the allow-list to a status reported by the provider.
pub fn evaluate_status(
    payment_id: &str,
    status: Option<String>,
) -> Result<ProviderVerification, WebhookError> {
    match status {
        Some(status) if is_accepted_status(&status) => Ok(ProviderVerification {
            verified: true,
            skipped: false,
            status,
        }),
        Some(status) => Err(WebhookError::ProviderVerificationFailed {
            payment_id: payment_id.to_string(),
            provider_status: Some(200),
            message: format!("payment status '{status}' is not a completed status"),
        }),
        None => Err(WebhookError::ProviderVerificationFailed {
            payment_id: payment_id.to_string(),
            provider_status: Some(200),
            message: "provider response carried no payment status".to_string(),
        }),
    }
}
