//! Side-effect seams for the outcome handlers.
//!
//! The webhook core only talks to these traits. Deployments inject their own
//! store, access layer and notifier; [`logging`] holds stateless stand-ins and
//! [`memory`] holds doubles that keep what they were given.

use anyhow::Result;
use std::sync::Arc;

pub mod logging;
pub mod memory;

#[async_trait::async_trait]
pub trait PaymentStore: Send + Sync {
    async fn upsert(
        &self,
        payment_id: &str,
        status: &str,
        attributes: serde_json::Value,
    ) -> Result<()>;
}

#[async_trait::async_trait]
pub trait AccessControl: Send + Sync {
    async fn grant(&self, customer_id: &str, product_id: &str) -> Result<()>;

    async fn revoke(&self, customer_id: &str, product_id: &str) -> Result<()>;
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send_confirmation(&self, customer_id: &str, payment_id: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn PaymentStore>,
    pub access: Arc<dyn AccessControl>,
    pub notifier: Arc<dyn Notifier>,
}

impl Collaborators {
    pub fn logging_only() -> Self {
        Self {
            store: Arc::new(logging::LoggingPaymentStore),
            access: Arc::new(logging::LoggingAccessControl),
            notifier: Arc::new(logging::LoggingNotifier),
        }
    }
}
