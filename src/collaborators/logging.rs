use crate::collaborators::{AccessControl, Notifier, PaymentStore};
use anyhow::Result;

/// Stateless collaborators that only log the side effect they stand in for.
///
/// Used by the binary until a real store, access layer and mailer are wired
/// in. Nothing is kept between requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPaymentStore;

#[async_trait::async_trait]
impl PaymentStore for LoggingPaymentStore {
    async fn upsert(
        &self,
        payment_id: &str,
        status: &str,
        attributes: serde_json::Value,
    ) -> Result<()> {
        tracing::info!(payment_id, status, %attributes, "payment upsert (not persisted)");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingAccessControl;

#[async_trait::async_trait]
impl AccessControl for LoggingAccessControl {
    async fn grant(&self, customer_id: &str, product_id: &str) -> Result<()> {
        tracing::info!(customer_id, product_id, "access grant (no backend)");
        Ok(())
    }

    async fn revoke(&self, customer_id: &str, product_id: &str) -> Result<()> {
        tracing::info!(customer_id, product_id, "access revoke (no backend)");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

#[async_trait::async_trait]
impl Notifier for LoggingNotifier {
    async fn send_confirmation(&self, customer_id: &str, payment_id: &str) -> Result<()> {
        tracing::info!(customer_id, payment_id, "payment confirmation (not sent)");
        Ok(())
    }
}
