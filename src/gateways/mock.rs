use crate::error::WebhookError;
use crate::gateways::{evaluate_status, PaymentVerifier, ProviderVerification};

/// Verifier that answers every lookup from a fixed behavior, for local runs and tests.
pub struct MockPaymentVerifier {
    pub behavior: String,
}

impl MockPaymentVerifier {
    pub fn with_status(status: &str) -> Self {
        Self {
            behavior: status.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl PaymentVerifier for MockPaymentVerifier {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn verify(&self, payment_id: &str) -> Result<ProviderVerification, WebhookError> {
        match self.behavior.as_str() {
            "SKIP" => Ok(ProviderVerification::skipped()),
            "NOT_FOUND" => Err(WebhookError::ProviderVerificationFailed {
                payment_id: payment_id.to_string(),
                provider_status: Some(404),
                message: "provider returned HTTP 404: mock not found".to_string(),
            }),
            "NETWORK_ERROR" => Err(anyhow::anyhow!("mock network error").into()),
            status => evaluate_status(payment_id, Some(status.to_string())),
        }
    }
}
