use crate::error::WebhookError;
use crate::gateways::{evaluate_status, status_from_body, PaymentVerifier, ProviderVerification};
use anyhow::Context;

/// Confirms payments against `GET {base_url}/payments/{id}`.
pub struct HttpPaymentVerifier {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl HttpPaymentVerifier {
    fn payment_url(&self, payment_id: &str) -> anyhow::Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .with_context(|| format!("invalid provider base url '{}'", self.base_url))?;
        let base = self.base_url.as_str();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("provider base url '{base}' cannot hold a path"))?
            .pop_if_empty()
            .push("payments")
            .push(payment_id);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl PaymentVerifier for HttpPaymentVerifier {
    fn name(&self) -> &'static str {
        "provider_http"
    }

    async fn verify(&self, payment_id: &str) -> Result<ProviderVerification, WebhookError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!(
                payment_id,
                "provider api key not configured, skipping payment verification"
            );
            return Ok(ProviderVerification::skipped());
        };

        let url = self.payment_url(payment_id)?;
        let resp = self
            .client
            .get(url)
            .bearer_auth(api_key)
            .header("Accept", "application/json")
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await;

        let resp = match resp {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                return Err(anyhow::anyhow!(
                    "provider verification timed out after {}ms",
                    self.timeout_ms
                )
                .into())
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context("provider verification request failed")
                    .into())
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(
                payment_id,
                provider_status = status.as_u16(),
                "provider rejected payment lookup"
            );
            return Err(WebhookError::ProviderVerificationFailed {
                payment_id: payment_id.to_string(),
                provider_status: Some(status.as_u16()),
                message: format!(
                    "provider returned HTTP {}: {}",
                    status.as_u16(),
                    body.chars().take(200).collect::<String>()
                ),
            });
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .context("provider verification response was not valid JSON")?;

        evaluate_status(payment_id, status_from_body(&body))
    }
}
