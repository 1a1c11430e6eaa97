use crate::collaborators::Collaborators;
use crate::domain::event::classify;
use crate::domain::extract::extract_details;
use crate::domain::payment::{PaymentSummary, VerificationSummary, WebhookResponse};
use crate::error::WebhookError;
use crate::gateways::PaymentVerifier;
use crate::service::outcome_handlers::dispatch;
use crate::signature::{check_request, SignatureCheck};
use axum::http::{HeaderMap, Method};
use std::sync::Arc;

/// Runs one delivery through
/// `Received -> SignatureChecked -> FieldsExtracted -> ProviderVerified -> EventRouted`.
#[derive(Clone)]
pub struct WebhookService {
    pub webhook_secret: Option<String>,
    pub verifier: Arc<dyn PaymentVerifier>,
    pub collaborators: Collaborators,
}

impl WebhookService {
    pub async fn process(
        &self,
        method: &Method,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<WebhookResponse, WebhookError> {
        if method != Method::POST {
            return Err(WebhookError::MethodNotAllowed(method.to_string()));
        }

        let signature = check_request(self.webhook_secret.as_deref(), headers, body)?;
        match signature {
            SignatureCheck::Verified => tracing::debug!("webhook signature verified"),
            SignatureCheck::SkippedNoSecret => {
                tracing::debug!("no webhook secret configured, signature check skipped")
            }
            SignatureCheck::SkippedNoHeader => {
                tracing::warn!("no signature header, signature check skipped")
            }
        }

        let payload = parse_payload(body)?;
        let details = extract_details(&payload)?;
        tracing::info!(
            payment_id = %details.payment_id,
            event_type = details.event_type.as_deref().unwrap_or("unknown"),
            "webhook fields extracted"
        );

        let verification = self.verifier.verify(&details.payment_id).await?;
        let verification = VerificationSummary {
            verified: verification.verified,
            payment_id: details.payment_id.clone(),
            status: verification.status,
            verified_at: chrono::Utc::now(),
        };
        tracing::info!(
            payment_id = %details.payment_id,
            verifier = self.verifier.name(),
            status = %verification.status,
            "payment verified with provider"
        );

        let kind = classify(details.event_type.as_deref());
        let processing = dispatch(kind, &self.collaborators, &details)
            .await
            .map_err(|e| {
                let message = format!("{e:#}");
                tracing::error!(
                    payment_id = %details.payment_id,
                    error = %message,
                    "outcome handler failed"
                );
                WebhookError::ProcessingFailed {
                    payment_id: details.payment_id.clone(),
                    message,
                    verification: serde_json::to_value(&verification).unwrap_or_default(),
                }
            })?;

        Ok(WebhookResponse {
            success: true,
            message: "Payment verified and processed".to_string(),
            verification,
            payment: PaymentSummary::from(&details),
            processing,
        })
    }
}

fn parse_payload(body: &[u8]) -> Result<serde_json::Value, WebhookError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(WebhookError::MalformedRequest("request body is empty".to_string()));
    }
    let payload: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        WebhookError::MalformedRequest(format!("request body is not valid JSON: {e}"))
    })?;
    if !payload.is_object() {
        return Err(WebhookError::MalformedRequest(
            "request body must be a JSON object".to_string(),
        ));
    }
    Ok(payload)
}
