//! Process-local doubles that keep everything they receive. Unbounded; meant
//! for tests, not for a long-running receiver.

use crate::collaborators::{AccessControl, Notifier, PaymentStore};
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredPayment {
    pub status: String,
    pub attributes: serde_json::Value,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Clone, Default)]
pub struct InMemoryPaymentStore {
    inner: Arc<RwLock<HashMap<String, StoredPayment>>>,
}

impl InMemoryPaymentStore {
    pub async fn get(&self, payment_id: &str) -> Option<StoredPayment> {
        self.inner.read().await.get(payment_id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[async_trait::async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn upsert(
        &self,
        payment_id: &str,
        status: &str,
        attributes: serde_json::Value,
    ) -> Result<()> {
        let mut guard = self.inner.write().await;
        guard.insert(
            payment_id.to_string(),
            StoredPayment {
                status: status.to_string(),
                attributes,
                updated_at: chrono::Utc::now(),
            },
        );
        tracing::debug!(payment_id, status, "payment upserted");
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAccessControl {
    grants: Arc<RwLock<HashSet<(String, String)>>>,
}

impl InMemoryAccessControl {
    pub async fn has_access(&self, customer_id: &str, product_id: &str) -> bool {
        self.grants
            .read()
            .await
            .contains(&(customer_id.to_string(), product_id.to_string()))
    }
}

#[async_trait::async_trait]
impl AccessControl for InMemoryAccessControl {
    async fn grant(&self, customer_id: &str, product_id: &str) -> Result<()> {
        self.grants
            .write()
            .await
            .insert((customer_id.to_string(), product_id.to_string()));
        tracing::debug!(customer_id, product_id, "access granted");
        Ok(())
    }

    async fn revoke(&self, customer_id: &str, product_id: &str) -> Result<()> {
        self.grants
            .write()
            .await
            .remove(&(customer_id.to_string(), product_id.to_string()));
        tracing::debug!(customer_id, product_id, "access revoked");
        Ok(())
    }
}

/// Keeps every confirmation it was asked to send.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<(String, String)>>>,
}

impl RecordingNotifier {
    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send_confirmation(&self, customer_id: &str, payment_id: &str) -> Result<()> {
        self.sent
            .write()
            .await
            .push((customer_id.to_string(), payment_id.to_string()));
        tracing::debug!(customer_id, payment_id, "payment confirmation recorded");
        Ok(())
    }
}
